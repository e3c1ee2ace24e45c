//! Browser host bindings
//!
//! JavaScript drives this once per `requestAnimationFrame` and renders from
//! the JSON snapshot.

use wasm_bindgen::prelude::*;

use crate::audio::AudioManager;
use crate::persistence::LocalStorageStore;
use crate::settings::Settings;
use crate::sim::{GameEvent, RunController};

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Floppy Plane starting...");
}

/// One game instance owned by the page
#[wasm_bindgen]
pub struct WebRun {
    run: RunController,
    audio: AudioManager,
    settings: Settings,
    pending: Vec<GameEvent>,
}

#[wasm_bindgen]
impl WebRun {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebRun {
        let settings = Settings::load();
        let seed = (js_sys::Math::random() * u32::MAX as f64) as u64 ^ js_sys::Date::now() as u64;
        let run = RunController::with_seed(
            settings.preferred_mode,
            seed,
            Box::new(LocalStorageStore::new()),
        );
        let mut audio = AudioManager::new();
        audio.set_volume(settings.effective_volume());
        log::info!("Game initialized with seed: {}", seed);
        WebRun {
            run,
            audio,
            settings,
            pending: Vec::new(),
        }
    }

    /// Animation frame callback; returns the number of ticks simulated
    pub fn frame(&mut self, timestamp_ms: f64) -> u32 {
        let ticks = self.run.frame(timestamp_ms);
        self.flush_events();
        ticks
    }

    /// Keyboard input by `KeyboardEvent.code`; returns true if handled
    pub fn key_down(&mut self, code: &str) -> bool {
        let handled = match code {
            "Space" => {
                self.run.flap_or_advance();
                true
            }
            "KeyM" => {
                if self.run.toggle_mode() {
                    self.settings.preferred_mode = self.run.mode();
                    self.settings.save();
                }
                true
            }
            _ => false,
        };
        self.flush_events();
        handled
    }

    /// Pointer press in client pixels plus the canvas bounding rect
    pub fn pointer_down(
        &mut self,
        client_x: f32,
        client_y: f32,
        rect_left: f32,
        rect_top: f32,
        rect_width: f32,
        rect_height: f32,
    ) {
        let (x, y) = super::client_to_world(
            client_x,
            client_y,
            rect_left,
            rect_top,
            rect_width,
            rect_height,
        );
        self.run.pointer_down(x, y);
        self.flush_events();
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.settings.muted = muted;
        self.audio.set_volume(self.settings.effective_volume());
        self.settings.save();
    }

    pub fn set_reduced_motion(&mut self, reduced: bool) {
        self.settings.reduced_motion = reduced;
        self.settings.save();
    }

    /// Current frame for the renderer
    pub fn snapshot_json(&self) -> String {
        let mut snapshot = self.run.snapshot();
        self.settings.apply_to(&mut snapshot);
        serde_json::to_string(&snapshot).unwrap_or_default()
    }

    /// Events since the last call (trail puffs, milestones), as a JSON array
    pub fn take_events_json(&mut self) -> String {
        let events = std::mem::take(&mut self.pending);
        serde_json::to_string(&events).unwrap_or_else(|_| "[]".to_string())
    }
}

impl Default for WebRun {
    fn default() -> Self {
        Self::new()
    }
}

impl WebRun {
    /// Play cues as events arrive and queue them for JavaScript
    fn flush_events(&mut self) {
        for event in self.run.drain_events() {
            self.audio.play_event(&event);
            self.pending.push(event);
        }
    }
}
