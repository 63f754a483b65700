//! Data-driven game balance
//!
//! Every gameplay constant lives here so a settings file can override it.
//! `Default` reproduces the classic feel.

use anyhow::ensure;
use serde::{Deserialize, Serialize};

use crate::consts;

/// Grid layout of a sprite sheet (frames laid out in columns and rows)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetGrid {
    pub columns: u32,
    pub rows: u32,
}

impl SheetGrid {
    pub const fn new(columns: u32, rows: u32) -> Self {
        Self { columns, rows }
    }

    /// Index of the last frame in a row (the wrap point for animation)
    pub fn max_frame(&self) -> u32 {
        self.columns.saturating_sub(1)
    }
}

/// Gameplay tuning values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    /// Downward acceleration while airborne (px/s²)
    pub gravity: f32,
    /// Vertical velocity applied by a jump (negative = up)
    pub jump_velocity: f32,
    /// Jumps allowed before touching the ground again
    pub max_jumps: u32,
    /// Seconds per run-cycle frame
    pub player_frame_time: f32,
    pub player_sheet: SheetGrid,

    // === Hazards ===
    pub hazard_count: usize,
    /// Horizontal hazard velocity (px/s, negative = toward the player)
    pub hazard_velocity: f32,
    /// Gap between hazards on the very first round
    pub initial_spacing: f32,
    /// Random gap range used when a round is restarted (inclusive)
    pub respawn_spacing_min: u32,
    pub respawn_spacing_max: u32,
    /// Pixels trimmed from each side of a hazard hitbox
    pub collision_inset: f32,
    /// Seconds per hazard frame
    pub hazard_frame_time: f32,
    pub hazard_sheet: SheetGrid,

    // === Background ===
    /// Scale applied to background layer textures
    pub background_scale: f32,
    /// Scroll speed per layer, far to near (px/s)
    pub layer_speeds: [f32; 3],
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: consts::GRAVITY,
            jump_velocity: consts::JUMP_VELOCITY,
            max_jumps: consts::MAX_JUMPS,
            player_frame_time: 1.0 / 12.0,
            player_sheet: SheetGrid::new(6, 1),

            hazard_count: consts::HAZARD_COUNT,
            hazard_velocity: consts::HAZARD_VELOCITY,
            initial_spacing: 600.0,
            respawn_spacing_min: 600,
            respawn_spacing_max: 800,
            collision_inset: consts::COLLISION_INSET,
            hazard_frame_time: 1.0 / 16.0,
            hazard_sheet: SheetGrid::new(8, 8),

            background_scale: consts::BACKGROUND_SCALE,
            layer_speeds: consts::LAYER_SPEEDS,
        }
    }
}

impl Tuning {
    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(self.hazard_count > 0, "hazard_count must be at least 1");
        ensure!(self.max_jumps > 0, "max_jumps must be at least 1");
        ensure!(
            self.respawn_spacing_min <= self.respawn_spacing_max,
            "respawn spacing range is empty ({} > {})",
            self.respawn_spacing_min,
            self.respawn_spacing_max
        );
        ensure!(
            self.player_frame_time > 0.0 && self.hazard_frame_time > 0.0,
            "frame times must be positive"
        );
        ensure!(
            self.background_scale > 0.0,
            "background_scale must be positive"
        );
        for (name, grid) in [("player", self.player_sheet), ("hazard", self.hazard_sheet)] {
            ensure!(
                grid.columns > 0 && grid.rows > 0,
                "{} sheet grid must have at least one column and row",
                name
            );
        }
        Ok(())
    }
}
