//! Game settings and preferences
//!
//! Read from a JSON file next to the executable's working directory. Every
//! field is optional; anything missing takes its default.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, ensure};
use serde::{Deserialize, Serialize};

use crate::consts::{WINDOW_HEIGHT, WINDOW_TITLE, WINDOW_WIDTH};
use crate::tuning::Tuning;

/// Settings file used when none is given
pub const DEFAULT_SETTINGS_PATH: &str = "dasher.json";
/// Environment variable naming an alternative settings file
pub const SETTINGS_ENV: &str = "DASHER_SETTINGS";

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Window ===
    pub window_width: u32,
    pub window_height: u32,
    pub title: String,
    /// Wait for vertical blank when presenting
    pub vsync: bool,

    // === Assets ===
    /// Directory holding the sprite sheet PNGs
    pub asset_dir: PathBuf,

    // === Simulation ===
    /// Fixed RNG seed (a time-based seed is used when absent)
    pub seed: Option<u64>,
    /// Log smoothed FPS once per second
    pub show_fps: bool,
    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_width: WINDOW_WIDTH,
            window_height: WINDOW_HEIGHT,
            title: WINDOW_TITLE.to_string(),
            vsync: true,
            asset_dir: PathBuf::from("textures"),
            seed: None,
            show_fps: false,
            tuning: Tuning::default(),
        }
    }
}

impl Settings {
    /// Pick the settings file: first CLI argument, then `DASHER_SETTINGS`,
    /// then `dasher.json`
    pub fn resolve_path(arg: Option<String>) -> PathBuf {
        arg.or_else(|| std::env::var(SETTINGS_ENV).ok())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_PATH))
    }

    /// Load settings from a JSON file
    ///
    /// A missing file is not an error: defaults are used. A file that exists
    /// but fails to parse or validate is.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            log::info!(
                "No settings file at '{}', using defaults",
                path.display()
            );
            return Ok(Self::default());
        }

        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings '{}'", path.display()))?;
        let settings = Self::from_json(&json)
            .with_context(|| format!("loading settings '{}'", path.display()))?;
        log::info!("Loaded settings from '{}'", path.display());
        Ok(settings)
    }

    /// Parse and validate settings from a JSON string
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.window_width > 0 && self.window_height > 0,
            "window size must be non-zero (got {}x{})",
            self.window_width,
            self.window_height
        );
        self.tuning.validate().context("invalid tuning")
    }

    /// The configured seed, or one derived from the clock
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        })
    }
}
