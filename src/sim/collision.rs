//! Player-versus-hazard collision
//!
//! Hazard sprites have soft glowing edges, so their hitbox is the frame
//! rectangle trimmed by a fixed inset. The player uses the full frame.

use super::anim::AnimData;
use super::rect::Rect;

/// Hitbox of a hazard: its on-screen frame shrunk by `inset` on every side
#[inline]
pub fn hazard_hitbox(hazard: &AnimData, inset: f32) -> Rect {
    hazard.screen_rect().inset(inset)
}

/// Hitbox of the player: the full on-screen frame
#[inline]
pub fn player_hitbox(player: &AnimData) -> Rect {
    player.screen_rect()
}

/// Index of the first hazard touching the player, if any
pub fn first_collision(player: &AnimData, hazards: &[AnimData], inset: f32) -> Option<usize> {
    let player_rect = player_hitbox(player);
    hazards
        .iter()
        .position(|hazard| hazard_hitbox(hazard, inset).overlaps(&player_rect))
}

/// True if any hazard touches the player
#[inline]
pub fn any_collision(player: &AnimData, hazards: &[AnimData], inset: f32) -> bool {
    first_collision(player, hazards, inset).is_some()
}
