//! Sprite sheet and background loading
//!
//! Textures are read from the configured asset directory. A file that is
//! missing or fails to decode is replaced by a generated placeholder so the
//! game still runs; a warning names the file.

use std::path::Path;

use anyhow::Context;
use glam::Vec2;
use image::{Rgba, RgbaImage};

use crate::sim::{LAYER_COUNT, Stage};
use crate::tuning::{SheetGrid, Tuning};

pub const PLAYER_FILE: &str = "scarfy.png";
pub const HAZARD_FILE: &str = "nebula.png";
/// Far, middle, near
pub const LAYER_FILES: [&str; LAYER_COUNT] =
    ["farbuildings.png", "backbuildings.png", "foreground.png"];

/// Placeholder frame sizes
const FALLBACK_PLAYER_FRAME: u32 = 128;
const FALLBACK_HAZARD_FRAME: u32 = 100;
const FALLBACK_LAYER_SIZE: (u32, u32) = (256, 190);

/// An image split into equally sized animation frames
pub struct SpriteSheet {
    pub image: RgbaImage,
    pub grid: SheetGrid,
}

impl SpriteSheet {
    /// Size of one frame in pixels
    pub fn frame_size(&self) -> Vec2 {
        Vec2::new(
            self.image.width() as f32 / self.grid.columns as f32,
            self.image.height() as f32 / self.grid.rows as f32,
        )
    }
}

/// Everything the game draws
pub struct Assets {
    pub player: SpriteSheet,
    pub hazard: SpriteSheet,
    pub layers: [RgbaImage; LAYER_COUNT],
}

impl Assets {
    /// Load all textures from `dir`, substituting placeholders as needed
    pub fn load(dir: &Path, tuning: &Tuning) -> Self {
        let player = load_or_else(&dir.join(PLAYER_FILE), || {
            fallback_player(tuning.player_sheet)
        });
        let hazard = load_or_else(&dir.join(HAZARD_FILE), || {
            fallback_hazard(tuning.hazard_sheet)
        });
        let layers = [0, 1, 2].map(|i| {
            load_or_else(&dir.join(LAYER_FILES[i]), || fallback_layer(i))
        });

        Self {
            player: SpriteSheet {
                image: player,
                grid: tuning.player_sheet,
            },
            hazard: SpriteSheet {
                image: hazard,
                grid: tuning.hazard_sheet,
            },
            layers,
        }
    }

    /// Placeholder assets only (no disk access)
    pub fn generated(tuning: &Tuning) -> Self {
        Self {
            player: SpriteSheet {
                image: fallback_player(tuning.player_sheet),
                grid: tuning.player_sheet,
            },
            hazard: SpriteSheet {
                image: fallback_hazard(tuning.hazard_sheet),
                grid: tuning.hazard_sheet,
            },
            layers: [0, 1, 2].map(fallback_layer),
        }
    }

    /// World dimensions for a window of the given size
    pub fn stage(&self, width: u32, height: u32, tuning: &Tuning) -> Stage {
        Stage {
            width: width as f32,
            height: height as f32,
            player_frame: self.player.frame_size(),
            hazard_frame: self.hazard.frame_size(),
            layer_widths: [0, 1, 2]
                .map(|i| self.layers[i].width() as f32 * tuning.background_scale),
        }
    }
}

/// Decode a PNG into RGBA8
pub fn load_image(path: &Path) -> anyhow::Result<RgbaImage> {
    let image = image::open(path).with_context(|| format!("loading '{}'", path.display()))?;
    Ok(image.to_rgba8())
}

fn load_or_else(path: &Path, fallback: impl FnOnce() -> RgbaImage) -> RgbaImage {
    match load_image(path) {
        Ok(image) => {
            log::info!(
                "Loaded {} ({}x{})",
                path.display(),
                image.width(),
                image.height()
            );
            image
        }
        Err(err) => {
            log::warn!("{:#}; using generated placeholder", err);
            fallback()
        }
    }
}

/// Running figure: one coloured body per frame with bobbing legs
fn fallback_player(grid: SheetGrid) -> RgbaImage {
    let frame = FALLBACK_PLAYER_FRAME;
    let columns = grid.columns.max(1);
    let rows = grid.rows.max(1);
    RgbaImage::from_fn(frame * columns, frame * rows, |x, y| {
        let column = x / frame;
        let fx = (x % frame) as f32 / frame as f32;
        let fy = (y % frame) as f32 / frame as f32;
        let stride = (column as f32 / columns as f32 * std::f32::consts::TAU).sin() * 0.12;

        let head = (fx - 0.5).powi(2) + (fy - 0.2).powi(2) < 0.012;
        let body = (0.38..0.62).contains(&fx) && (0.3..0.7).contains(&fy);
        let left_leg = (fx - (0.42 + stride)).abs() < 0.05 && (0.7..1.0).contains(&fy);
        let right_leg = (fx - (0.58 - stride)).abs() < 0.05 && (0.7..1.0).contains(&fy);

        if head {
            Rgba([250, 220, 180, 255])
        } else if body {
            Rgba([200, 40, 60, 255])
        } else if left_leg || right_leg {
            Rgba([60, 60, 120, 255])
        } else {
            Rgba([0, 0, 0, 0])
        }
    })
}

/// Pulsing glow: radius changes with the frame column
fn fallback_hazard(grid: SheetGrid) -> RgbaImage {
    let frame = FALLBACK_HAZARD_FRAME;
    let columns = grid.columns.max(1);
    let rows = grid.rows.max(1);
    RgbaImage::from_fn(frame * columns, frame * rows, |x, y| {
        let column = x / frame;
        let phase = column as f32 / columns as f32 * std::f32::consts::TAU;
        let radius = 0.32 + 0.08 * phase.sin();
        let fx = (x % frame) as f32 / frame as f32 - 0.5;
        let fy = (y % frame) as f32 / frame as f32 - 0.5;
        let d = (fx * fx + fy * fy).sqrt();
        if d < radius {
            let t = 1.0 - d / radius;
            let alpha = (t * 255.0).clamp(0.0, 255.0) as u8;
            Rgba([255, (120.0 + 120.0 * t) as u8, 60, alpha.max(64)])
        } else {
            Rgba([0, 0, 0, 0])
        }
    })
}

/// City skyline silhouettes, darker and sparser the farther the layer
fn fallback_layer(layer: usize) -> RgbaImage {
    let (w, h) = FALLBACK_LAYER_SIZE;
    let shade = [40u8, 70, 110][layer.min(LAYER_COUNT - 1)];
    let block = [16u32, 24, 40][layer.min(LAYER_COUNT - 1)];
    let floor = [0.35f32, 0.5, 0.8][layer.min(LAYER_COUNT - 1)];
    RgbaImage::from_fn(w, h, |x, y| {
        let building = x / block;
        // Cheap hash for varying building heights
        let n = building.wrapping_mul(2_654_435_761) >> 24;
        let top = h as f32 * (floor - (n % 64) as f32 / 255.0);
        if (y as f32) >= top {
            Rgba([shade / 2, shade / 2, shade, 255])
        } else if layer == 0 {
            Rgba([10, 10, 30, 255])
        } else {
            Rgba([0, 0, 0, 0])
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_frame_sizes() {
        let tuning = Tuning::default();
        let assets = Assets::generated(&tuning);
        assert_eq!(assets.player.frame_size(), Vec2::new(128.0, 128.0));
        assert_eq!(assets.hazard.frame_size(), Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_stage_scales_layers() {
        let tuning = Tuning::default();
        let assets = Assets::generated(&tuning);
        let stage = assets.stage(1024, 760, &tuning);
        assert_eq!(stage.width, 1024.0);
        assert_eq!(stage.height, 760.0);
        assert_eq!(stage.layer_widths, [1024.0; 3]);
    }

    #[test]
    fn test_missing_directory_falls_back() {
        let tuning = Tuning::default();
        let assets = Assets::load(Path::new("no/such/dir"), &tuning);
        assert_eq!(assets.player.image.width(), 128 * 6);
        assert_eq!(assets.hazard.image.height(), 100 * 8);
    }

    #[test]
    fn test_load_image_error_names_file() {
        let err = load_image(Path::new("missing.png")).unwrap_err();
        assert!(format!("{:#}", err).contains("missing.png"));
    }
}
