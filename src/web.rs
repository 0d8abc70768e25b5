//! Browser bindings
//!
//! JavaScript owns the canvas, the audio elements and the network. Each
//! animation frame it calls `update` with the elapsed time and held keys,
//! then draws `snapshot_json` and plays `take_cues_json`.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::audio::{AudioManager, CueQueue};
use crate::highscores::RelayLeaderboard;
use crate::session::Session;
use crate::settings::Settings;
use crate::sim::TickInput;
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        // Already initialised by an earlier module instance
        return;
    }
    log::info!("Space Journey (web) starting...");
}

fn to_json<T: Serialize>(value: &T, fallback: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| {
        log::error!("Serialization failed: {e}");
        fallback.to_string()
    })
}

#[wasm_bindgen]
pub struct WebSession {
    session: Session<RelayLeaderboard>,
    audio: AudioManager<CueQueue>,
}

#[wasm_bindgen]
impl WebSession {
    /// Start a run. `settings_json` and `tuning_json` may be empty.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64, settings_json: &str, tuning_json: &str) -> WebSession {
        let settings = if settings_json.trim().is_empty() {
            Settings::default()
        } else {
            Settings::from_json(settings_json)
        };
        let tuning = if tuning_json.trim().is_empty() {
            Tuning::default()
        } else {
            Tuning::from_json(tuning_json).unwrap_or_else(|e| {
                log::warn!("Falling back to default tuning: {e}");
                Tuning::default()
            })
        };

        Self {
            session: Session::new(seed, tuning, &settings, RelayLeaderboard::new()),
            audio: AudioManager::with_settings(CueQueue::default(), &settings),
        }
    }

    /// Advance by `dt` seconds with the current key state packed as in
    /// `TickInput::to_bits`. Fire and restart act once per key press, so
    /// the host may report them as held. Returns the number of ticks run.
    pub fn update(&mut self, dt: f32, held_bits: u8) -> u32 {
        self.session.set_input(TickInput::from_bits(held_bits));
        let ticks = self.session.update(dt);
        let events = self.session.drain_events();
        self.audio.dispatch(&events);
        ticks
    }

    pub fn press_fire(&mut self) {
        self.session.press_fire();
    }

    pub fn press_restart(&mut self) {
        self.session.press_restart();
    }

    pub fn restart(&mut self) {
        self.session.restart();
    }

    pub fn is_game_over(&self) -> bool {
        self.session.state().is_game_over()
    }

    pub fn best_score(&self) -> u64 {
        self.session.best_score()
    }

    pub fn snapshot_json(&self) -> String {
        to_json(&self.session.snapshot(), "{}")
    }

    /// Cues played since the last call, as `[{ "cue", "volume" }]`
    pub fn take_cues_json(&mut self) -> String {
        to_json(&self.audio.sink_mut().drain(), "[]")
    }

    /// Report whether any sound is still audible on the page
    pub fn set_audio_playing(&mut self, playing: bool) {
        self.audio.sink_mut().set_playing(playing);
    }

    /// Feed the host's latest leaderboard payload
    pub fn load_leaderboard(&mut self, json: &str) {
        self.session.leaderboard_mut().load_json(json);
    }

    pub fn leaderboard_json(&mut self) -> String {
        to_json(&self.session.show_leaderboard().to_vec(), "[]")
    }

    /// Scores the host should send, as `[{ "name", "score" }]`
    pub fn take_submissions_json(&mut self) -> String {
        to_json(&self.session.leaderboard_mut().take_outbox(), "[]")
    }
}
