//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (insertion order is stacking order)
//! - No rendering or platform dependencies
//!
//! Times are in milliseconds, distances in logical canvas pixels.

pub mod hit;
pub mod lifecycle;
pub mod motion;
pub mod rng;
pub mod spawn;
pub mod state;
pub mod tick;

pub use hit::{Hit, resolve_click, score_for};
pub use lifecycle::{LifecycleReport, SpawnTimer};
pub use motion::{advance, clamp_to_arena};
pub use rng::SimRng;
pub use spawn::{GhostFactory, pick_motion_kind};
pub use state::{Arena, Ghost, Motion, MotionKind, RunStats, Simulation};
pub use tick::{click, tick};
