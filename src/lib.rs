//! Ghost Clicker - a browser arcade clicker
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, motion, aging, hit resolution)
//! - `sinks`: Collaborator traits the simulation reports to (render, audio, score)
//! - `config`: Startup configuration and validation
//! - `platform`: Frame clock and pointer coordinate mapping
//! - `renderer`: Sprite quads and the Canvas 2D renderer (browser only)

pub mod config;
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod sinks;

#[cfg(target_arch = "wasm32")]
pub mod audio;
#[cfg(target_arch = "wasm32")]
pub mod hud;

pub use config::{AssetPaths, AudioSettings, ConfigError, GameConfig};
pub use sim::{Ghost, Hit, Motion, MotionKind, Simulation};
pub use sinks::{AudioCue, Renderer, ScoreSink};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Default logical canvas size (pixels)
    pub const CANVAS_WIDTH: f32 = 900.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Default population bounds
    pub const GHOST_MIN: usize = 4;
    pub const GHOST_MAX: usize = 10;
    /// Default time between timed spawn attempts (ms)
    pub const SPAWN_INTERVAL_MS: f32 = 1500.0;
    /// Default base speed (pixels/ms)
    pub const GHOST_BASE_SPEED: f32 = 0.4;
    /// Default number of sprite images
    pub const SPRITE_COUNT: usize = 10;

    /// Ghosts never leave [margin, dimension - margin]
    pub const BOUNDARY_MARGIN: f32 = 20.0;
    /// Spawn positions are drawn this far inside the canvas
    pub const SPAWN_MARGIN: f32 = 50.0;
    /// Random-walk targets are drawn this far inside the canvas
    pub const TARGET_INSET: f32 = 40.0;

    /// Ghost diameter range
    pub const SIZE_MIN: f32 = 36.0;
    pub const SIZE_MAX: f32 = 80.0;
    /// Speed is drawn in [base, base * SPEED_SPREAD]
    pub const SPEED_SPREAD: f32 = 2.3;

    /// Cumulative variant thresholds for one uniform draw
    pub const RANDOM_WALK_THRESHOLD: f32 = 0.45;
    pub const LINEAR_THRESHOLD: f32 = 0.80;

    /// Random-walk dwell range before picking a new target (ms)
    pub const DWELL_MIN_MS: f32 = 600.0;
    pub const DWELL_MAX_MS: f32 = 2200.0;
    /// Random-walk stops steering inside this distance of its target
    pub const ARRIVE_DISTANCE: f32 = 3.0;
    /// Random-walk steering speed relative to the ghost's speed
    pub const WANDER_SPEED_FACTOR: f32 = 0.9;

    /// Circular orbit radius range
    pub const ORBIT_RADIUS_MIN: f32 = 20.0;
    pub const ORBIT_RADIUS_MAX: f32 = 90.0;
    /// Circular angular speed magnitude (rad/ms)
    pub const ORBIT_ANGULAR_SPEED_MAX: f32 = 0.03;

    /// Time-to-live range (ms)
    pub const TTL_MIN_MS: f32 = 8000.0;
    pub const TTL_MAX_MS: f32 = 22000.0;
    /// Opacity lost per ms once a ghost outlives its ttl
    pub const FADE_RATE_PER_MS: f32 = 0.002;

    /// Hit radius as a fraction of the sprite's half-size
    pub const HIT_RADIUS_FACTOR: f32 = 0.9;
    /// Score for a hit is round(HIT_BASE_SCORE + size / HIT_SIZE_DIVISOR)
    pub const HIT_BASE_SCORE: f32 = 10.0;
    pub const HIT_SIZE_DIVISOR: f32 = 10.0;
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Unit vector for an angle in radians
#[inline]
pub fn heading(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}
