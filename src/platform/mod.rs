//! Platform glue shared by the browser and native drivers
//!
//! Handles:
//! - Frame timing (timestamps to deltas)
//! - Pointer coordinates (DOM client space to logical canvas space)
//! - High-DPI canvas sizing
//! - Image cursor CSS

use glam::Vec2;

/// Turns host frame timestamps into simulation deltas
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    last: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self { last: None }
    }

    /// Delta in ms since the previous call. 0 on the first call, never
    /// negative. Long host gaps pass through unchanged.
    pub fn delta(&mut self, timestamp_ms: f64) -> f32 {
        let dt = match self.last {
            Some(last) => (timestamp_ms - last).max(0.0) as f32,
            None => 0.0,
        };
        self.last = Some(timestamp_ms);
        dt
    }
}

/// Map a client-space pointer position into logical canvas pixels.
///
/// `rect_origin`/`rect_size` are the canvas' on-screen box, `backing_size`
/// its physical pixel size and `dpr` the device pixel ratio used to scale
/// the drawing transform.
pub fn client_to_logical(
    client: Vec2,
    rect_origin: Vec2,
    rect_size: Vec2,
    backing_size: Vec2,
    dpr: f32,
) -> Vec2 {
    let dpr = if dpr > 0.0 { dpr } else { 1.0 };
    let scale = Vec2::new(
        if rect_size.x > 0.0 { backing_size.x / rect_size.x } else { dpr },
        if rect_size.y > 0.0 { backing_size.y / rect_size.y } else { dpr },
    );
    (client - rect_origin) * scale / dpr
}

/// Cursor hotspot used when the host passes none (px)
pub const DEFAULT_CURSOR_HOTSPOT: u32 = 16;

/// CSS `cursor` value for an image cursor with its click point at the hotspot
pub fn cursor_css(image_path: &str, hotspot_x: Option<u32>, hotspot_y: Option<u32>) -> String {
    format!(
        "url('{}') {} {}, auto",
        image_path,
        hotspot_x.unwrap_or(DEFAULT_CURSOR_HOTSPOT),
        hotspot_y.unwrap_or(DEFAULT_CURSOR_HOTSPOT)
    )
}

/// Physical backing-store size for a logical canvas on a `dpr` display
pub fn backing_size(logical: Vec2, dpr: f32) -> (u32, u32) {
    let dpr = if dpr > 0.0 { dpr } else { 1.0 };
    let physical = (logical * dpr).round();
    (physical.x as u32, physical.y as u32)
}
