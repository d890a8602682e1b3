//! Click hit resolution
//!
//! Ghosts later in the vector are drawn on top, so the search runs
//! back-to-front and stops at the first ghost under the pointer.

use glam::Vec2;

use super::state::Ghost;
use crate::consts::*;
use crate::distance;

/// A ghost removed by a click
#[derive(Debug, Clone, PartialEq)]
pub struct Hit {
    pub ghost: Ghost,
    pub score_delta: u32,
}

/// Points awarded for shooting a ghost of this diameter
pub fn score_for(size: f32) -> u32 {
    (HIT_BASE_SCORE + size / HIT_SIZE_DIVISOR).round() as u32
}

/// Radius around the center that counts as a hit
#[inline]
pub fn hit_radius(ghost: &Ghost) -> f32 {
    ghost.size() / 2.0 * HIT_RADIUS_FACTOR
}

/// Index of the topmost ghost under `point`
pub fn topmost_at(ghosts: &[Ghost], point: Vec2) -> Option<usize> {
    ghosts
        .iter()
        .rposition(|g| distance(point, g.pos) <= hit_radius(g))
}

/// Remove the topmost ghost under `point`. Leaves `ghosts` untouched on a miss.
pub fn resolve_click(ghosts: &mut Vec<Ghost>, point: Vec2) -> Option<Hit> {
    let index = topmost_at(ghosts, point)?;
    let ghost = ghosts.remove(index);
    let score_delta = score_for(ghost.size());
    Some(Hit { ghost, score_delta })
}
