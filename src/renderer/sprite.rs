//! Sprite quads for ghost rendering

use glam::Vec2;

use crate::sim::Ghost;

/// One sprite draw call in logical canvas pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteQuad {
    /// Top-left corner
    pub origin: Vec2,
    /// Width and height (sprites are square)
    pub size: f32,
    /// Global alpha for this draw (0-1)
    pub alpha: f32,
    /// Index into the loaded sprite images
    pub sprite: usize,
}

impl SpriteQuad {
    /// Quad centered on the ghost, scaled to its diameter
    pub fn from_ghost(ghost: &Ghost) -> Self {
        let size = ghost.size();
        Self {
            origin: ghost.pos - Vec2::splat(size / 2.0),
            size,
            alpha: ghost.opacity().clamp(0.0, 1.0),
            sprite: ghost.sprite(),
        }
    }

    /// Nothing to draw for a fully faded ghost
    pub fn is_visible(&self) -> bool {
        self.alpha > 0.0
    }
}

/// Quads for every visible ghost, bottom of the stack first
pub fn sprite_quads(ghosts: &[Ghost]) -> Vec<SpriteQuad> {
    ghosts
        .iter()
        .map(SpriteQuad::from_ghost)
        .filter(SpriteQuad::is_visible)
        .collect()
}
