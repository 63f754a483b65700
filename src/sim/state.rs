//! Game state and round setup
//!
//! Everything the simulation touches lives in [`GameState`]. Sizes that come
//! from loaded textures are captured once in a [`Stage`] so the simulation
//! never needs the renderer or the asset loader.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::anim::AnimData;
use super::parallax::{LAYER_COUNT, Parallax};
use super::physics::Player;
use super::rect::Rect;
use crate::tuning::Tuning;

/// Current phase of the main loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for the start key
    Intro,
    /// Active gameplay
    Playing,
    /// Player touched a hazard
    GameOver,
    /// Player passed the finish line
    Win,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Intro => "Intro",
            GamePhase::Playing => "Playing",
            GamePhase::GameOver => "GameOver",
            GamePhase::Win => "Win",
        }
    }
}

/// World dimensions derived from the window and loaded sprite sheets
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    pub width: f32,
    pub height: f32,
    /// Size of one player animation frame
    pub player_frame: Vec2,
    /// Size of one hazard animation frame
    pub hazard_frame: Vec2,
    /// On-screen width of each background layer (texture width times scale)
    pub layer_widths: [f32; LAYER_COUNT],
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    rng: Pcg32,
    pub phase: GamePhase,
    pub player: Player,
    /// Scrolling hazards, in spawn order (the last one marks the finish)
    pub hazards: Vec<AnimData>,
    /// Horizontal velocity of each hazard, indexed like `hazards`
    pub hazard_velocities: Vec<f32>,
    /// X coordinate the player must reach to win
    pub finish_line: f32,
    pub parallax: Parallax,
    /// Simulation ticks spent in the Playing phase this round
    pub round_ticks: u64,
    /// Rounds started so far (the first round counts)
    pub rounds: u32,
    pub stage: Stage,
    pub tuning: Tuning,
}

impl GameState {
    /// Create a fresh game on the intro screen
    pub fn new(seed: u64, stage: Stage, tuning: Tuning) -> Self {
        let player_anim = AnimData::new(
            Rect::at(Vec2::ZERO, stage.player_frame),
            Vec2::new(stage.width / 2.0, stage.height - stage.player_frame.y),
            tuning.player_frame_time,
        );

        let hazards: Vec<AnimData> = (0..tuning.hazard_count)
            .map(|i| {
                AnimData::new(
                    Rect::at(Vec2::ZERO, stage.hazard_frame),
                    Vec2::new(
                        stage.width + tuning.initial_spacing * i as f32,
                        stage.height - stage.hazard_frame.y,
                    ),
                    tuning.hazard_frame_time,
                )
            })
            .collect();

        let finish_line = hazards.last().map(|h| h.pos.x).unwrap_or(stage.width);

        log::info!(
            "New game: seed={}, {} hazards, finish line at x={}",
            seed,
            hazards.len(),
            finish_line
        );

        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Intro,
            player: Player::new(player_anim),
            hazard_velocities: vec![tuning.hazard_velocity; hazards.len()],
            hazards,
            finish_line,
            parallax: Parallax::default(),
            round_ticks: 0,
            rounds: 1,
            stage,
            tuning,
        }
    }

    /// Y coordinate of the ground line (bottom of the window)
    #[inline]
    pub fn ground_y(&self) -> f32 {
        self.stage.height
    }

    /// Set up a new round and resume play
    ///
    /// The player is centred on the ground and hazards are respawned off the
    /// right edge with randomised gaps. Background offsets carry over.
    pub fn reset(&mut self) {
        let ground_y = self.ground_y();
        let player = &mut self.player;
        player.anim.pos.x = self.stage.width / 2.0 - player.anim.rec.width / 2.0;
        player.land(ground_y);
        player.anim.rewind();

        let min = self.tuning.respawn_spacing_min;
        let max = self.tuning.respawn_spacing_max;
        for (i, hazard) in self.hazards.iter_mut().enumerate() {
            let gap = self.rng.random_range(min..=max) as f32;
            hazard.pos.x = self.stage.width + gap * i as f32;
            hazard.rewind();
        }

        if let Some(last) = self.hazards.last() {
            self.finish_line = last.pos.x;
        }

        self.hazard_velocities.clear();
        self.hazard_velocities
            .resize(self.hazards.len(), self.tuning.hazard_velocity);
        self.round_ticks = 0;
        self.rounds += 1;
        self.phase = GamePhase::Playing;

        log::info!(
            "Round {} started, finish line at x={:.0}",
            self.rounds,
            self.finish_line
        );
    }

    /// The finish line travels with the last hazard
    pub fn finish_velocity(&self) -> f32 {
        self.hazard_velocities
            .last()
            .copied()
            .unwrap_or(self.tuning.hazard_velocity)
    }

    /// Distance left between the player and the finish line
    pub fn distance_to_finish(&self) -> f32 {
        (self.finish_line - self.player.anim.pos.x).max(0.0)
    }
}
