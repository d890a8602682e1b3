//! Canvas 2D sprite renderer
//!
//! The backing store is sized for the display's pixel ratio and the context
//! transform is scaled to match, so everything is drawn in logical pixels.

use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::sprite::sprite_quads;
use crate::config::AssetPaths;
use crate::platform::backing_size;
use crate::sim::Ghost;
use crate::sinks::Renderer;

/// Draws ghosts onto an HTML canvas
pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    sprites: Vec<HtmlImageElement>,
    logical: Vec2,
}

impl CanvasRenderer {
    /// Grab the 2D context and start loading `sprite_count` images.
    /// Returns `None` if the browser refuses a 2D context.
    pub fn new(
        canvas: HtmlCanvasElement,
        logical: Vec2,
        assets: &AssetPaths,
        sprite_count: usize,
    ) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()??
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;

        let sprites = (0..sprite_count)
            .filter_map(|i| {
                let img = HtmlImageElement::new().ok()?;
                img.set_src(&assets.sprite_path(i));
                Some(img)
            })
            .collect::<Vec<_>>();
        if sprites.len() < sprite_count {
            log::warn!("Only {} of {} sprites could be created", sprites.len(), sprite_count);
        }

        let mut renderer = Self {
            canvas,
            ctx,
            sprites,
            logical,
        };
        renderer.setup_dpi();
        Some(renderer)
    }

    /// Size the backing store for the current device pixel ratio. Call again
    /// on window resize (the ratio changes when zooming or moving screens).
    pub fn setup_dpi(&mut self) {
        let dpr = web_sys::window()
            .map(|w| w.device_pixel_ratio())
            .unwrap_or(1.0);
        let (width, height) = backing_size(self.logical, dpr as f32);
        self.canvas.set_width(width);
        self.canvas.set_height(height);

        let style = self.canvas.style();
        let _ = style.set_property("width", &format!("{}px", self.logical.x));
        let _ = style.set_property("height", &format!("{}px", self.logical.y));

        if let Err(e) = self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0) {
            log::warn!("Failed to scale canvas transform: {:?}", e);
        }
        log::info!("Canvas backing store {}x{} (dpr {})", width, height, dpr);
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

impl Renderer for CanvasRenderer {
    fn render(&mut self, ghosts: &[Ghost]) {
        let ctx = &self.ctx;
        ctx.clear_rect(0.0, 0.0, self.logical.x as f64, self.logical.y as f64);

        for quad in sprite_quads(ghosts) {
            let Some(img) = self.sprites.get(quad.sprite) else {
                continue;
            };
            // Not decoded yet (or broken): skip this frame
            if !img.complete() || img.natural_width() == 0 {
                continue;
            }
            ctx.save();
            ctx.set_global_alpha(quad.alpha as f64);
            let _ = ctx.draw_image_with_html_image_element_and_dw_and_dh(
                img,
                quad.origin.x as f64,
                quad.origin.y as f64,
                quad.size as f64,
                quad.size as f64,
            );
            ctx.restore();
        }
    }
}
