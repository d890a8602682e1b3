//! Ghost entities and the simulation context
//!
//! The simulation owns the only copy of the ghost collection. Render, click
//! and frame callbacks all go through it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::lifecycle::SpawnTimer;
use super::rng::SimRng;
use super::spawn::GhostFactory;
use crate::config::{ConfigError, GameConfig};
use crate::consts::*;

/// Movement behavior, chosen once at spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MotionKind {
    RandomWalk,
    Linear,
    Circular,
}

/// Movement behavior with its variant-specific state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Motion {
    /// Steers toward a target, picking a new one every `dwell` ms
    RandomWalk {
        target: Vec2,
        dwell: f32,
        since_retarget: f32,
    },
    /// Constant velocity (pixels/ms), reflected off the walls
    Linear { vel: Vec2 },
    /// Orbits a fixed center
    Circular {
        center: Vec2,
        radius: f32,
        angle: f32,
        angular_speed: f32,
    },
}

impl Motion {
    pub fn kind(&self) -> MotionKind {
        match self {
            Motion::RandomWalk { .. } => MotionKind::RandomWalk,
            Motion::Linear { .. } => MotionKind::Linear,
            Motion::Circular { .. } => MotionKind::Circular,
        }
    }
}

/// A ghost entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ghost {
    id: u32,
    /// Sprite center
    pub pos: Vec2,
    size: f32,
    sprite: usize,
    opacity: f32,
    speed: f32,
    life: f32,
    ttl: f32,
    /// Variant never changes; its inner state does
    pub(crate) motion: Motion,
}

impl Ghost {
    /// Fresh ghost: fully opaque, zero age
    pub fn new(
        id: u32,
        pos: Vec2,
        size: f32,
        sprite: usize,
        speed: f32,
        ttl: f32,
        motion: Motion,
    ) -> Self {
        Self {
            id,
            pos,
            size,
            sprite,
            opacity: 1.0,
            speed,
            life: 0.0,
            ttl,
            motion,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    /// Diameter, used for drawing and for the hit radius
    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn sprite(&self) -> usize {
        self.sprite
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Age in ms
    pub fn life(&self) -> f32 {
        self.life
    }

    pub fn ttl(&self) -> f32 {
        self.ttl
    }

    pub fn motion(&self) -> &Motion {
        &self.motion
    }

    pub fn kind(&self) -> MotionKind {
        self.motion.kind()
    }

    /// Past its time-to-live and fading out
    pub fn is_expired(&self) -> bool {
        self.life > self.ttl
    }

    /// Fully faded, ready to be removed
    pub fn is_gone(&self) -> bool {
        self.opacity <= 0.0
    }

    pub(crate) fn age(&mut self, dt: f32) {
        self.life += dt;
    }

    /// Lower opacity, never below zero
    pub(crate) fn fade(&mut self, amount: f32) {
        self.opacity = (self.opacity - amount.max(0.0)).max(0.0);
    }

    /// Set age directly (scenario setup)
    pub fn with_life(mut self, life: f32) -> Self {
        self.life = life;
        self
    }

    /// Start partially faded (scenario setup). Clamped to [0, 1].
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }
}

/// Logical canvas bounds and the regions derived from them
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Smallest legal position
    pub fn min(&self) -> Vec2 {
        Vec2::splat(BOUNDARY_MARGIN)
    }

    /// Largest legal position
    pub fn max(&self) -> Vec2 {
        Vec2::new(self.width - BOUNDARY_MARGIN, self.height - BOUNDARY_MARGIN)
    }

    /// True if `pos` is inside the clamped play area
    pub fn contains(&self, pos: Vec2) -> bool {
        let (min, max) = (self.min(), self.max());
        pos.x >= min.x && pos.x <= max.x && pos.y >= min.y && pos.y <= max.y
    }

    /// Uniform spawn point inside the spawn margin
    pub fn spawn_point(&self, rng: &mut SimRng) -> Vec2 {
        Vec2::new(
            rng.uniform(SPAWN_MARGIN, self.width - SPAWN_MARGIN),
            rng.uniform(SPAWN_MARGIN, self.height - SPAWN_MARGIN),
        )
    }

    /// Uniform random-walk target inside the target inset
    pub fn random_target(&self, rng: &mut SimRng) -> Vec2 {
        Vec2::new(
            rng.uniform(TARGET_INSET, self.width - TARGET_INSET),
            rng.uniform(TARGET_INSET, self.height - TARGET_INSET),
        )
    }
}

/// Counters for one run, reported by the native driver
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    pub spawned: u64,
    pub expired: u64,
    pub hits: u64,
}

/// Complete simulation context
#[derive(Debug, Clone)]
pub struct Simulation {
    pub(crate) config: GameConfig,
    pub(crate) factory: GhostFactory,
    /// Insertion order is stacking order: last is drawn on top
    pub(crate) ghosts: Vec<Ghost>,
    pub(crate) spawn_timer: SpawnTimer,
    pub(crate) score: u64,
    pub(crate) stats: RunStats,
}

impl Simulation {
    /// Validate the config and seed the initial population
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        let mut sim = Self::empty(config, seed)?;
        let initial = sim
            .factory
            .rng_mut()
            .int_inclusive(sim.config.min_ghosts, sim.config.max_ghosts);
        for _ in 0..initial {
            sim.spawn();
        }
        log::info!(
            "Simulation seeded with {} ({} ghosts, {}x{})",
            seed,
            initial,
            sim.config.canvas_width,
            sim.config.canvas_height
        );
        Ok(sim)
    }

    /// Validated simulation with no ghosts yet
    pub fn empty(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let factory = GhostFactory::new(&config, SimRng::new(seed));
        Ok(Self {
            spawn_timer: SpawnTimer::new(config.spawn_interval_ms),
            config,
            factory,
            ghosts: Vec::new(),
            score: 0,
            stats: RunStats::default(),
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn arena(&self) -> Arena {
        self.factory.arena()
    }

    /// Ghosts in stacking order (bottom first)
    pub fn ghosts(&self) -> &[Ghost] {
        &self.ghosts
    }

    pub fn population(&self) -> usize {
        self.ghosts.len()
    }

    /// Running score total
    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn stats(&self) -> RunStats {
        self.stats
    }

    pub fn seed(&self) -> u64 {
        self.factory.seed()
    }

    /// Create a ghost and put it on top of the stack
    pub(crate) fn spawn(&mut self) -> u32 {
        let ghost = self.factory.create();
        let id = ghost.id();
        log::debug!("Spawned ghost {} ({:?})", id, ghost.kind());
        self.ghosts.push(ghost);
        self.stats.spawned += 1;
        id
    }

    /// Place a prepared ghost on top of the stack, bypassing the factory
    pub fn insert(&mut self, ghost: Ghost) {
        self.ghosts.push(ghost);
    }

    /// Id for a hand-built ghost that will not collide with spawned ones
    pub fn next_entity_id(&mut self) -> u32 {
        self.factory.next_entity_id()
    }
}
