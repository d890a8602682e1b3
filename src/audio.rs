//! Audio: hit cue and background music
//!
//! The hit cue is a sample rewound on every shot. If the sample element can't
//! be created a short synthesized shot plays instead.

use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{AudioContext, GainNode, HtmlAudioElement, OscillatorNode, OscillatorType};

use crate::config::AudioSettings;
use crate::sinks::AudioCue;

/// Await a media `play()` promise, swallowing autoplay rejections
fn play_quietly(promise: Result<js_sys::Promise, JsValue>, what: &'static str) {
    let Ok(promise) = promise else { return };
    wasm_bindgen_futures::spawn_local(async move {
        if JsFuture::from(promise).await.is_err() {
            log::debug!("{} playback blocked", what);
        }
    });
}

/// Plays the shot sound
pub struct AudioManager {
    sample: Option<HtmlAudioElement>,
    ctx: Option<AudioContext>,
    volume: f32,
}

impl AudioManager {
    pub fn new(settings: &AudioSettings, hit_sound: &str) -> Self {
        let sample = HtmlAudioElement::new_with_src(hit_sound).ok();
        let ctx = if sample.is_some() {
            None
        } else {
            log::warn!("Failed to create hit sample, using synthesized shot");
            AudioContext::new().ok()
        };
        let mut audio = Self {
            sample,
            ctx,
            volume: 1.0,
        };
        audio.set_volume(settings.sfx_volume);
        audio
    }

    /// Set cue volume (0.0 - 1.0)
    pub fn set_volume(&mut self, vol: f32) {
        self.volume = vol.clamp(0.0, 1.0);
        if let Some(sample) = &self.sample {
            sample.set_volume(self.volume as f64);
        }
    }

    fn play_sample(&self, sample: &HtmlAudioElement) {
        sample.set_current_time(0.0);
        play_quietly(sample.play(), "Hit cue");
    }

    /// Create an oscillator with gain envelope
    fn create_osc(
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Synthesized shot - noisy crack over a falling thump
    fn play_synth_shot(ctx: &AudioContext, vol: f32) {
        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }
        let t = ctx.current_time();

        if let Some((osc, gain)) = Self::create_osc(ctx, 1800.0, OscillatorType::Sawtooth) {
            gain.gain().set_value_at_time(vol * 0.3, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.06)
                .ok();
            osc.frequency().set_value_at_time(1800.0, t).ok();
            osc.frequency().set_value_at_time(400.0, t + 0.02).ok();
            osc.frequency().set_value_at_time(2400.0, t + 0.03).ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.08).ok();
        }

        if let Some((osc, gain)) = Self::create_osc(ctx, 180.0, OscillatorType::Sine) {
            gain.gain().set_value_at_time(vol * 0.6, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                .ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(50.0, t + 0.15)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.18).ok();
        }
    }
}

impl AudioCue for AudioManager {
    fn play_hit_cue(&mut self) {
        if self.volume <= 0.0 {
            return;
        }
        if let Some(sample) = &self.sample {
            self.play_sample(sample);
        } else if let Some(ctx) = &self.ctx {
            Self::play_synth_shot(ctx, self.volume);
        }
    }
}

/// The page's looping background track
pub struct MusicTrack {
    element: Option<HtmlAudioElement>,
}

impl MusicTrack {
    /// Wrap the `<audio>` element with this id, if the page has one
    pub fn from_element_id(id: &str, settings: &AudioSettings) -> Self {
        use wasm_bindgen::JsCast;

        let element = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(id))
            .and_then(|el| el.dyn_into::<HtmlAudioElement>().ok());
        if element.is_none() {
            log::info!("No #{} element, background music disabled", id);
        }

        let track = Self { element };
        if let Some(el) = &track.element {
            el.set_volume(settings.music_volume.clamp(0.0, 1.0) as f64);
            el.set_muted(settings.music_muted);
        }
        track
    }

    /// Try to start playback. Autoplay is often blocked until the first
    /// user gesture, so call again from the first click.
    pub fn play(&self) {
        if let Some(el) = &self.element {
            if el.paused() {
                play_quietly(el.play(), "Background music");
            }
        }
    }

    pub fn set_muted(&self, muted: bool) {
        if let Some(el) = &self.element {
            el.set_muted(muted);
            log::info!("Music {}", if muted { "muted" } else { "unmuted" });
        }
    }
}
