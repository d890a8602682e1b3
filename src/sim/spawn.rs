//! Ghost factory
//!
//! Rolls every randomized parameter of a new ghost. The only state it touches
//! is its own RNG and id counter.

use std::f32::consts::TAU;

use super::rng::SimRng;
use super::state::{Arena, Ghost, Motion, MotionKind};
use crate::config::GameConfig;
use crate::consts::*;
use crate::heading;

/// Builds ghosts for a fixed arena and sprite set
#[derive(Debug, Clone)]
pub struct GhostFactory {
    arena: Arena,
    sprite_count: usize,
    base_speed: f32,
    rng: SimRng,
    next_id: u32,
}

impl GhostFactory {
    pub fn new(config: &GameConfig, rng: SimRng) -> Self {
        Self {
            arena: Arena::new(config.canvas_width, config.canvas_height),
            sprite_count: config.sprite_count,
            base_speed: config.base_speed,
            rng,
            next_id: 1,
        }
    }

    pub fn arena(&self) -> Arena {
        self.arena
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn rng_mut(&mut self) -> &mut SimRng {
        &mut self.rng
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Roll a brand-new ghost
    pub fn create(&mut self) -> Ghost {
        let id = self.next_entity_id();
        let rng = &mut self.rng;

        let size = rng.uniform(SIZE_MIN, SIZE_MAX);
        let pos = self.arena.spawn_point(rng);
        let sprite = rng.index(self.sprite_count);
        let kind = pick_motion_kind(rng.unit());
        let angle = rng.uniform(0.0, TAU);
        let speed = rng.uniform(self.base_speed, self.base_speed * SPEED_SPREAD);

        let motion = match kind {
            MotionKind::Linear => Motion::Linear {
                vel: heading(angle) * speed,
            },
            MotionKind::RandomWalk => Motion::RandomWalk {
                target: self.arena.random_target(rng),
                dwell: rng.uniform(DWELL_MIN_MS, DWELL_MAX_MS),
                since_retarget: 0.0,
            },
            MotionKind::Circular => Motion::Circular {
                center: pos,
                radius: rng.uniform(ORBIT_RADIUS_MIN, ORBIT_RADIUS_MAX),
                angle,
                angular_speed: rng.uniform(-ORBIT_ANGULAR_SPEED_MAX, ORBIT_ANGULAR_SPEED_MAX),
            },
        };

        let ttl = rng.uniform(TTL_MIN_MS, TTL_MAX_MS);

        Ghost::new(id, pos, size, sprite, speed, ttl, motion)
    }
}

/// Map one uniform draw in [0, 1) onto the variant partition
pub fn pick_motion_kind(r: f32) -> MotionKind {
    if r < RANDOM_WALK_THRESHOLD {
        MotionKind::RandomWalk
    } else if r < LINEAR_THRESHOLD {
        MotionKind::Linear
    } else {
        MotionKind::Circular
    }
}
