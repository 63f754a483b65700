//! Turns a [`GameState`] into an ordered list of sprite quads
//!
//! Paint order while playing: background layers far to near, hazards, then
//! the player. The other phases show only the text overlay on black.

use super::batch::{Quad, SpriteBatch, TextureId};
use super::vertex::colors::WHITE;
use crate::sim::{AnimData, GamePhase, GameState, LAYER_COUNT, Rect};

/// Pixel sizes of the loaded textures
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextureSizes {
    pub layers: [(u32, u32); LAYER_COUNT],
    pub player: (u32, u32),
    pub hazard: (u32, u32),
    pub text: (u32, u32),
}

impl TextureSizes {
    pub fn get(&self, id: TextureId) -> (u32, u32) {
        match id {
            TextureId::Layer(i) => self.layers[i.min(LAYER_COUNT - 1)],
            TextureId::Player => self.player,
            TextureId::Hazard => self.hazard,
            TextureId::Text => self.text,
        }
    }
}

/// Rebuild `batch` for the current frame
pub fn build_scene(state: &GameState, sizes: &TextureSizes, batch: &mut SpriteBatch) {
    batch.clear();

    if state.phase == GamePhase::Playing {
        push_backgrounds(state, sizes, batch);

        for hazard in state.hazards.iter().filter(|h| on_screen(h, state.stage.width)) {
            push_sprite(batch, sizes, TextureId::Hazard, hazard);
        }

        push_sprite(batch, sizes, TextureId::Player, &state.player.anim);
    } else {
        let (w, h) = sizes.text;
        let full = Rect::new(0.0, 0.0, w as f32, h as f32);
        batch.push(
            &Quad {
                texture: TextureId::Text,
                dest: full,
                src: full,
                color: WHITE,
            },
            sizes.text,
        );
    }
}

fn push_backgrounds(state: &GameState, sizes: &TextureSizes, batch: &mut SpriteBatch) {
    let scale = state.tuning.background_scale;
    for (layer, id) in TextureId::ALL_LAYERS.into_iter().enumerate() {
        let (tw, th) = sizes.get(id);
        let src = Rect::new(0.0, 0.0, tw as f32, th as f32);
        let width = tw as f32 * scale;
        let height = th as f32 * scale;
        for x in state.parallax.tile_positions(layer, width) {
            batch.push(
                &Quad {
                    texture: id,
                    dest: Rect::new(x, 0.0, width, height),
                    src,
                    color: WHITE,
                },
                (tw, th),
            );
        }
    }
}

fn push_sprite(batch: &mut SpriteBatch, sizes: &TextureSizes, texture: TextureId, anim: &AnimData) {
    batch.push(
        &Quad {
            texture,
            dest: anim.screen_rect(),
            src: anim.rec,
            color: WHITE,
        },
        sizes.get(texture),
    );
}

fn on_screen(anim: &AnimData, screen_width: f32) -> bool {
    let rect = anim.screen_rect();
    rect.right() > 0.0 && rect.x < screen_width
}
