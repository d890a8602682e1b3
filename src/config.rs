//! Startup configuration
//!
//! Everything here is fixed once the simulation starts. Overrides arrive as a
//! JSON document; any missing key keeps its default.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Rejected configuration. These are programmer errors caught at startup,
/// never conditions the frame loop has to handle.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("canvas {width}x{height} is too small, each side must exceed {min}")]
    CanvasTooSmall { width: f32, height: f32, min: f32 },

    #[error("max_ghosts ({max}) is below min_ghosts ({min})")]
    PopulationBounds { min: usize, max: usize },

    #[error("max_ghosts must be at least 1")]
    EmptyPopulation,

    #[error("spawn_interval_ms must be positive, got {0}")]
    SpawnInterval(f32),

    #[error("base_speed must be finite and non-negative, got {0}")]
    BaseSpeed(f32),

    #[error("sprite_count must be at least 1")]
    NoSprites,

    #[error("invalid config JSON: {0}")]
    Parse(String),
}

/// Audio preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Hit cue volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Background music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Start with the background music muted
    pub music_muted: bool,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            sfx_volume: 0.7,
            music_volume: 0.35,
            music_muted: false,
        }
    }
}

/// Where the browser build finds its sprites and sounds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetPaths {
    /// Sprite `n` is loaded from `{ghost_prefix}{n}.{ghost_extension}`, n starting at 1
    pub ghost_prefix: String,
    pub ghost_extension: String,
    /// Sample played on a hit
    pub hit_sound: String,
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            ghost_prefix: "assets/ghost".to_string(),
            ghost_extension: "jpeg".to_string(),
            hit_sound: "assets/shoot.wav".to_string(),
        }
    }
}

impl AssetPaths {
    /// Path of sprite `index` (0-based)
    pub fn sprite_path(&self, index: usize) -> String {
        format!("{}{}.{}", self.ghost_prefix, index + 1, self.ghost_extension)
    }
}

/// Game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Logical canvas width (pixels)
    pub canvas_width: f32,
    /// Logical canvas height (pixels)
    pub canvas_height: f32,
    /// Smallest initial population
    pub min_ghosts: usize,
    /// Largest population the spawn timer grows to
    pub max_ghosts: usize,
    /// Time between timed spawn attempts (ms)
    pub spawn_interval_ms: f32,
    /// Slowest ghost speed (pixels/ms)
    pub base_speed: f32,
    /// Number of distinct sprites
    pub sprite_count: usize,

    pub audio: AudioSettings,
    pub assets: AssetPaths,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            min_ghosts: GHOST_MIN,
            max_ghosts: GHOST_MAX,
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            base_speed: GHOST_BASE_SPEED,
            sprite_count: SPRITE_COUNT,
            audio: AudioSettings::default(),
            assets: AssetPaths::default(),
        }
    }
}

impl GameConfig {
    /// Parse a (possibly partial) JSON override document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Spawn and target ranges must be non-empty on both axes
        let min_side = 2.0 * SPAWN_MARGIN.max(TARGET_INSET).max(BOUNDARY_MARGIN);
        let too_small = |side: f32| !side.is_finite() || side <= min_side;
        if too_small(self.canvas_width) || too_small(self.canvas_height) {
            return Err(ConfigError::CanvasTooSmall {
                width: self.canvas_width,
                height: self.canvas_height,
                min: min_side,
            });
        }
        if self.max_ghosts == 0 {
            return Err(ConfigError::EmptyPopulation);
        }
        if self.max_ghosts < self.min_ghosts {
            return Err(ConfigError::PopulationBounds {
                min: self.min_ghosts,
                max: self.max_ghosts,
            });
        }
        if self.spawn_interval_ms.is_nan() || self.spawn_interval_ms <= 0.0 {
            return Err(ConfigError::SpawnInterval(self.spawn_interval_ms));
        }
        if !self.base_speed.is_finite() || self.base_speed < 0.0 {
            return Err(ConfigError::BaseSpeed(self.base_speed));
        }
        if self.sprite_count == 0 {
            return Err(ConfigError::NoSprites);
        }
        Ok(())
    }
}
