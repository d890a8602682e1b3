//! Aging, fade-out and timed spawning

use super::spawn::GhostFactory;
use super::state::Ghost;
use crate::consts::FADE_RATE_PER_MS;

/// What one lifecycle pass changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LifecycleReport {
    /// Ghosts that faded out (each was replaced)
    pub expired: u32,
    /// Ghosts added by the spawn timer
    pub timed_spawns: u32,
}

/// Accumulates frame time and fires every `interval` ms
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnTimer {
    pub elapsed: f32,
    pub interval: f32,
}

impl SpawnTimer {
    pub fn new(interval: f32) -> Self {
        Self {
            elapsed: 0.0,
            interval,
        }
    }

    /// Add `dt`; true (and reset) once the interval is exceeded
    pub fn step(&mut self, dt: f32) -> bool {
        self.elapsed += dt;
        if self.elapsed > self.interval {
            self.elapsed = 0.0;
            true
        } else {
            false
        }
    }
}

/// Age every ghost, replace the ones that faded out and run the spawn timer.
///
/// Walks the dense vector from the back so removing index `i` never shifts
/// an unvisited ghost. Replacements are appended past the visited range and
/// are not aged until the next pass.
pub fn tick(
    ghosts: &mut Vec<Ghost>,
    timer: &mut SpawnTimer,
    factory: &mut GhostFactory,
    max_ghosts: usize,
    dt: f32,
) -> LifecycleReport {
    let mut report = LifecycleReport::default();

    for i in (0..ghosts.len()).rev() {
        let ghost = &mut ghosts[i];
        ghost.age(dt);
        if !ghost.is_expired() {
            continue;
        }
        ghost.fade(FADE_RATE_PER_MS * dt);
        if ghost.is_gone() {
            // Order-preserving removal keeps the stacking order intact
            let gone = ghosts.remove(i);
            let replacement = factory.create();
            log::debug!("Ghost {} faded out, replaced by {}", gone.id(), replacement.id());
            ghosts.push(replacement);
            report.expired += 1;
        }
    }

    if timer.step(dt) && ghosts.len() < max_ghosts {
        let ghost = factory.create();
        log::debug!("Timed spawn of ghost {} ({} alive)", ghost.id(), ghosts.len() + 1);
        ghosts.push(ghost);
        report.timed_spawns += 1;
    }

    report
}
