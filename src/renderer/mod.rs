//! Rendering module
//!
//! Ghosts are drawn as alpha-blended sprites in stacking order. `sprite`
//! turns simulation state into screen quads; `canvas` draws them with the
//! browser's 2D context.

pub mod sprite;
#[cfg(target_arch = "wasm32")]
pub mod canvas;

pub use sprite::{SpriteQuad, sprite_quads};
#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
