//! Ghost Clicker entry point
//!
//! Browser: wires the frame loop, clicks and resizes to the simulation.
//! Native: runs a headless session with a scripted shooter and prints a summary.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, MouseEvent};

    use ghost_clicker::audio::{AudioManager, MusicTrack};
    use ghost_clicker::hud::ScoreDisplay;
    use ghost_clicker::platform::{FrameClock, client_to_logical};
    use ghost_clicker::renderer::CanvasRenderer;
    use ghost_clicker::sim::{self, Simulation};
    use ghost_clicker::GameConfig;

    /// Game instance holding all state
    pub struct Game {
        pub sim: Simulation,
        clock: FrameClock,
        renderer: CanvasRenderer,
        audio: AudioManager,
        pub music: MusicTrack,
        score: ScoreDisplay,
    }

    impl Game {
        fn frame(&mut self, timestamp: f64) {
            let dt = self.clock.delta(timestamp);
            sim::tick(&mut self.sim, dt);
            self.sim.render(&mut self.renderer);
        }

        fn on_click(&mut self, event: &MouseEvent) {
            let canvas = self.renderer.canvas();
            let rect = canvas.get_bounding_client_rect();
            let dpr = web_sys::window()
                .map(|w| w.device_pixel_ratio())
                .unwrap_or(1.0) as f32;
            let point = client_to_logical(
                Vec2::new(event.client_x() as f32, event.client_y() as f32),
                Vec2::new(rect.left() as f32, rect.top() as f32),
                Vec2::new(rect.width() as f32, rect.height() as f32),
                Vec2::new(canvas.width() as f32, canvas.height() as f32),
                dpr,
            );

            // First gesture unblocks autoplay
            self.music.play();
            sim::click(&mut self.sim, point, &mut self.audio, &mut self.score);
        }

        pub fn canvas(&self) -> &HtmlCanvasElement {
            self.renderer.canvas()
        }
    }

    thread_local! {
        pub static GAME: RefCell<Option<Rc<RefCell<Game>>>> = const { RefCell::new(None) };
    }

    /// Run `f` against the running game, if any
    pub fn with_game<R>(f: impl FnOnce(&mut Game) -> R) -> Option<R> {
        let game = GAME.with(|g| g.borrow().clone())?;
        let mut g = game.borrow_mut();
        Some(f(&mut g))
    }

    /// Config overrides from `<script id="ghost-config" type="application/json">`
    fn load_config(document: &web_sys::Document) -> GameConfig {
        let Some(json) = document
            .get_element_by_id("ghost-config")
            .and_then(|el| el.text_content())
        else {
            return GameConfig::default();
        };
        match GameConfig::from_json(&json) {
            Ok(config) => {
                log::info!("Loaded config overrides");
                config
            }
            Err(e) => {
                log::error!("Ignoring config overrides: {}", e);
                GameConfig::default()
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Ghost Clicker starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let config = load_config(&document);
        let seed = js_sys::Date::now() as u64;
        let sim = Simulation::new(config.clone(), seed).expect("invalid game config");

        let logical = Vec2::new(config.canvas_width, config.canvas_height);
        let renderer = CanvasRenderer::new(canvas.clone(), logical, &config.assets, config.sprite_count)
            .expect("no 2d context");
        let audio = AudioManager::new(&config.audio, &config.assets.hit_sound);
        let music = MusicTrack::from_element_id("bgMusic", &config.audio);
        music.play();
        let score = ScoreDisplay::from_element_id("score");

        let game = Rc::new(RefCell::new(Game {
            sim,
            clock: FrameClock::new(),
            renderer,
            audio,
            music,
            score,
        }));
        GAME.with(|g| *g.borrow_mut() = Some(game.clone()));

        setup_click_handler(&canvas, game.clone());
        setup_resize_handler(game.clone());

        request_animation_frame(game);

        log::info!("Ghost Clicker running!");
    }

    fn setup_click_handler(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            game.borrow_mut().on_click(&event);
        });
        let _ = canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_resize_handler(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().renderer.setup_dpi();
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        game.borrow_mut().frame(time);
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

/// Mute or unmute the background music
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn set_music_muted(muted: bool) {
    wasm_game::with_game(|g| g.music.set_muted(muted));
}

/// Use an image as the canvas cursor, with the click point at the hotspot
/// (16, 16 when omitted)
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn update_cursor(image_path: &str, hotspot_x: Option<u32>, hotspot_y: Option<u32>) {
    wasm_game::with_game(|g| {
        let value = ghost_clicker::platform::cursor_css(image_path, hotspot_x, hotspot_y);
        let _ = g.canvas().style().set_property("cursor", &value);
    });
}

/// Ghosts currently alive
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn ghost_count() -> u32 {
    wasm_game::with_game(|g| g.sim.population() as u32).unwrap_or(0)
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Ghost Clicker (native) starting...");
    log::info!("Native mode runs headless - build for wasm32 to play in the browser");

    let seed = std::env::var("GHOST_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0x6057_C11C);

    match headless::run(seed, 60 * 90) {
        Ok(summary) => match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("Failed to encode summary: {}", e),
        },
        Err(e) => {
            log::error!("Invalid config: {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use serde::Serialize;

    use ghost_clicker::sim::{self, Simulation, hit};
    use ghost_clicker::sinks::{AudioCue, ScoreSink};
    use ghost_clicker::{ConfigError, GameConfig};

    /// Simulated frame length (ms)
    const FRAME_MS: f32 = 1000.0 / 60.0;
    /// The scripted shooter fires every this many frames
    const SHOT_EVERY: u32 = 45;

    #[derive(Debug, Serialize)]
    pub struct Summary {
        seed: u64,
        frames: u32,
        shots: u32,
        hits: u64,
        cues: u32,
        expired: u64,
        spawned: u64,
        score: u64,
        population: usize,
    }

    /// Counts cues and logs score updates
    #[derive(Default)]
    struct Console {
        cues: u32,
    }

    impl AudioCue for Console {
        fn play_hit_cue(&mut self) {
            self.cues += 1;
        }
    }

    impl ScoreSink for Console {
        fn report_score(&mut self, total: u64) {
            log::info!("Score: {}", total);
        }
    }

    pub fn run(seed: u64, frames: u32) -> Result<Summary, ConfigError> {
        let mut sim = Simulation::new(GameConfig::default(), seed)?;
        let mut console = Console::default();
        let mut score = Console::default();
        let mut shots = 0;

        for frame in 1..=frames {
            sim::tick(&mut sim, FRAME_MS);

            if frame % SHOT_EVERY == 0 {
                shots += 1;
                // Aim at the topmost ghost, slightly off-center on odd shots
                let target = sim.ghosts().last().map(|g| {
                    let jitter = if shots % 2 == 1 { hit::hit_radius(g) * 1.2 } else { 0.0 };
                    g.pos + glam::Vec2::new(jitter, 0.0)
                });
                if let Some(point) = target {
                    sim::click(&mut sim, point, &mut console, &mut score);
                }
            }
        }

        let stats = sim.stats();
        Ok(Summary {
            seed,
            frames,
            shots,
            hits: stats.hits,
            cues: console.cues,
            expired: stats.expired,
            spawned: stats.spawned,
            score: sim.score(),
            population: sim.population(),
        })
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
