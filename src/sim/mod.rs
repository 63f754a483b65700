//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only advances through the `dt` handed to `tick`
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod anim;
pub mod collision;
pub mod parallax;
pub mod physics;
pub mod rect;
pub mod state;
pub mod tick;

pub use anim::AnimData;
pub use collision::{any_collision, first_collision, hazard_hitbox, player_hitbox};
pub use parallax::{LAYER_COUNT, Parallax};
pub use physics::{Player, is_on_ground};
pub use rect::Rect;
pub use state::{GamePhase, GameState, Stage};
pub use tick::{TickInput, tick};
