//! Collaborators the simulation reports to
//!
//! All calls are fire-and-forget. An implementation that fails (audio blocked,
//! sprite not loaded) must swallow the failure; the simulation never branches
//! on it.

use crate::sim::Ghost;

/// Draws the current ghosts, bottom of the stack first
pub trait Renderer {
    fn render(&mut self, ghosts: &[Ghost]);
}

/// Plays the shot sound when a ghost is hit
pub trait AudioCue {
    fn play_hit_cue(&mut self);
}

/// Displays the running score owned by the simulation
pub trait ScoreSink {
    fn report_score(&mut self, total: u64);
}

/// Headless stand-in for every collaborator
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl Renderer for Silent {
    fn render(&mut self, _ghosts: &[Ghost]) {}
}

impl AudioCue for Silent {
    fn play_hit_cue(&mut self) {}
}

impl ScoreSink for Silent {
    fn report_score(&mut self, _total: u64) {}
}
