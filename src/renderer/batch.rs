//! CPU-side sprite batching
//!
//! Quads are expanded into two triangles each and grouped into draw calls.
//! Consecutive quads that share a texture are merged into one call, so the
//! submission order is also the paint order.

use super::vertex::SpriteVertex;
use crate::sim::{LAYER_COUNT, Rect};

/// Textures the renderer knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureId {
    /// Background layer, far (0) to near (2)
    Layer(usize),
    Player,
    Hazard,
    /// Rasterised message overlay
    Text,
}

impl TextureId {
    pub const ALL_LAYERS: [TextureId; LAYER_COUNT] =
        [TextureId::Layer(0), TextureId::Layer(1), TextureId::Layer(2)];
}

/// One textured rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    pub texture: TextureId,
    /// Destination in window pixels
    pub dest: Rect,
    /// Source in texture pixels
    pub src: Rect,
    pub color: [f32; 4],
}

/// A contiguous run of vertices that share the same texture binding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawCall {
    pub texture: TextureId,
    pub vertex_start: u32,
    pub vertex_count: u32,
}

#[derive(Debug, Default)]
pub struct SpriteBatch {
    pub vertices: Vec<SpriteVertex>,
    pub draw_calls: Vec<DrawCall>,
}

impl SpriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.draw_calls.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Append a quad; `texture_size` converts the source rect to UVs
    pub fn push(&mut self, quad: &Quad, texture_size: (u32, u32)) {
        let (tw, th) = (texture_size.0.max(1) as f32, texture_size.1.max(1) as f32);
        let u0 = quad.src.x / tw;
        let v0 = quad.src.y / th;
        let u1 = quad.src.right() / tw;
        let v1 = quad.src.bottom() / th;

        let d = quad.dest;
        let c = quad.color;
        let start = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&[
            SpriteVertex::new(d.x, d.y, u0, v0, c),
            SpriteVertex::new(d.x, d.bottom(), u0, v1, c),
            SpriteVertex::new(d.right(), d.y, u1, v0, c),
            SpriteVertex::new(d.right(), d.y, u1, v0, c),
            SpriteVertex::new(d.x, d.bottom(), u0, v1, c),
            SpriteVertex::new(d.right(), d.bottom(), u1, v1, c),
        ]);

        match self.draw_calls.last_mut() {
            Some(call) if call.texture == quad.texture => call.vertex_count += 6,
            _ => self.draw_calls.push(DrawCall {
                texture: quad.texture,
                vertex_start: start,
                vertex_count: 6,
            }),
        }
    }

    pub fn quad_count(&self) -> usize {
        self.vertices.len() / 6
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::vertex::colors::WHITE;

    fn quad(texture: TextureId, x: f32) -> Quad {
        Quad {
            texture,
            dest: Rect::new(x, 0.0, 10.0, 10.0),
            src: Rect::new(0.0, 0.0, 10.0, 10.0),
            color: WHITE,
        }
    }

    #[test]
    fn test_merges_consecutive_same_texture() {
        let mut batch = SpriteBatch::new();
        batch.push(&quad(TextureId::Hazard, 0.0), (100, 100));
        batch.push(&quad(TextureId::Hazard, 20.0), (100, 100));
        batch.push(&quad(TextureId::Player, 40.0), (100, 100));
        batch.push(&quad(TextureId::Hazard, 60.0), (100, 100));

        assert_eq!(batch.quad_count(), 4);
        assert_eq!(
            batch.draw_calls,
            vec![
                DrawCall {
                    texture: TextureId::Hazard,
                    vertex_start: 0,
                    vertex_count: 12,
                },
                DrawCall {
                    texture: TextureId::Player,
                    vertex_start: 12,
                    vertex_count: 6,
                },
                DrawCall {
                    texture: TextureId::Hazard,
                    vertex_start: 18,
                    vertex_count: 6,
                },
            ]
        );
    }

    #[test]
    fn test_uvs_from_source_rect() {
        let mut batch = SpriteBatch::new();
        let q = Quad {
            texture: TextureId::Player,
            dest: Rect::new(100.0, 200.0, 128.0, 128.0),
            src: Rect::new(256.0, 0.0, 128.0, 128.0),
            color: WHITE,
        };
        batch.push(&q, (768, 128));

        let top_left = batch.vertices[0];
        let bottom_right = batch.vertices[5];
        assert_eq!(top_left.position, [100.0, 200.0]);
        assert_eq!(top_left.uv, [256.0 / 768.0, 0.0]);
        assert_eq!(bottom_right.position, [228.0, 328.0]);
        assert_eq!(bottom_right.uv, [384.0 / 768.0, 1.0]);
    }

    #[test]
    fn test_clear() {
        let mut batch = SpriteBatch::new();
        batch.push(&quad(TextureId::Text, 0.0), (1, 1));
        batch.clear();
        assert!(batch.is_empty());
        assert!(batch.draw_calls.is_empty());
    }
}
