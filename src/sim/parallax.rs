//! Three-layer parallax background scroll

use serde::{Deserialize, Serialize};

/// Number of background layers (far, middle, near)
pub const LAYER_COUNT: usize = 3;

/// Horizontal scroll offsets for each background layer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Parallax {
    pub offsets: [f32; LAYER_COUNT],
}

impl Parallax {
    /// Scroll each layer left by its speed, wrapping once a full tile width
    /// has gone by
    ///
    /// `layer_widths` are on-screen widths (texture width times scale).
    pub fn update(
        &mut self,
        dt: f32,
        layer_widths: &[f32; LAYER_COUNT],
        speeds: &[f32; LAYER_COUNT],
    ) {
        for ((offset, width), speed) in self.offsets.iter_mut().zip(layer_widths).zip(speeds) {
            *offset -= speed * dt;
            if *offset <= -width {
                *offset = 0.0;
            }
        }
    }

    /// X positions of the two side-by-side tiles that cover a layer
    pub fn tile_positions(&self, layer: usize, width: f32) -> [f32; 2] {
        let offset = self.offsets[layer];
        [offset, offset + width]
    }
}
