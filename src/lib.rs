//! Dasher - a side-scrolling jump-and-dodge arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (animation, physics, collisions, game phases)
//! - `tuning`: Data-driven game balance
//! - `settings`: Window/asset configuration loaded from JSON
//! - `assets`: Sprite sheet loading with procedural fallbacks
//! - `input`, `time`: Keyboard state and fixed-timestep clock
//! - `renderer`: wgpu textured-quad rendering and text overlay
//! - `app`: winit application shell

pub mod app;
pub mod assets;
pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod time;
pub mod tuning;

pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (the classic 60 FPS target)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Longest wall-clock frame fed into the accumulator
    pub const MAX_FRAME_TIME: f64 = 0.25;

    /// Window defaults
    pub const WINDOW_WIDTH: u32 = 1024;
    pub const WINDOW_HEIGHT: u32 = 760;
    pub const WINDOW_TITLE: &str = "Dasher-Dapper by TonyHmt";

    /// Player physics
    pub const GRAVITY: f32 = 4000.0;
    pub const JUMP_VELOCITY: f32 = -1500.0;
    pub const MAX_JUMPS: u32 = 2;

    /// Hazards
    pub const HAZARD_COUNT: usize = 20;
    pub const HAZARD_VELOCITY: f32 = -600.0;
    pub const COLLISION_INSET: f32 = 20.0;

    /// Background
    pub const BACKGROUND_SCALE: f32 = 4.0;
    /// Far, middle, near
    pub const LAYER_SPEEDS: [f32; 3] = [20.0, 150.0, 300.0];
}
