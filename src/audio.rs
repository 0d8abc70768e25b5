//! Audio cue routing
//!
//! The simulation only names sounds. A host supplies an `AudioSink` that
//! actually plays them; `AudioManager` applies volume settings and keeps the
//! movement loop from stacking on top of itself.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    /// Engine rumble while thrusting
    Movement,
    /// Player fired
    Fire,
    /// Something blew up
    Explosion,
}

impl SoundCue {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundCue::Movement => "movement",
            SoundCue::Fire => "fire",
            SoundCue::Explosion => "explosion",
        }
    }
}

/// Host-side playback. Playing a cue twice must be harmless.
pub trait AudioSink {
    /// Start playing a cue at the given volume (0.0 - 1.0)
    fn play(&mut self, cue: SoundCue, volume: f32);

    /// Whether anything is currently audible
    fn is_busy(&self) -> bool {
        false
    }
}

/// Sink that only logs, for headless runs
#[derive(Debug, Default)]
pub struct LogSink;

impl AudioSink for LogSink {
    fn play(&mut self, cue: SoundCue, volume: f32) {
        log::trace!("♪ {} ({volume:.2})", cue.as_str());
    }
}

/// Most cues a `CueQueue` holds before dropping the oldest
pub const CUE_QUEUE_CAPACITY: usize = 32;

/// A cue waiting for the host to play it
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QueuedCue {
    pub cue: &'static str,
    pub volume: f32,
}

/// Sink that buffers cues for a host that plays them later.
///
/// The host reports playback with `set_playing`; an undrained queue is
/// capped and loses its oldest cues first.
#[derive(Debug)]
pub struct CueQueue {
    queued: VecDeque<QueuedCue>,
    capacity: usize,
    playing: bool,
}

impl Default for CueQueue {
    fn default() -> Self {
        Self::new(CUE_QUEUE_CAPACITY)
    }
}

impl CueQueue {
    pub fn new(capacity: usize) -> Self {
        Self {
            queued: VecDeque::new(),
            capacity: capacity.max(1),
            playing: false,
        }
    }

    /// Whether the host is playing anything right now
    pub fn set_playing(&mut self, playing: bool) {
        self.playing = playing;
    }

    /// Hand every queued cue to the host, oldest first
    pub fn drain(&mut self) -> Vec<QueuedCue> {
        self.queued.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.queued.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queued.is_empty()
    }
}

impl AudioSink for CueQueue {
    fn play(&mut self, cue: SoundCue, volume: f32) {
        if self.queued.len() >= self.capacity {
            self.queued.pop_front();
            log::debug!("Cue queue full, dropped oldest");
        }
        self.queued.push_back(QueuedCue {
            cue: cue.as_str(),
            volume,
        });
    }

    /// Busy while the host is playing or a movement loop is already queued
    fn is_busy(&self) -> bool {
        self.playing
            || self
                .queued
                .iter()
                .any(|c| c.cue == SoundCue::Movement.as_str())
    }
}

/// Audio manager for the game
pub struct AudioManager<S: AudioSink> {
    sink: S,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl<S: AudioSink> AudioManager<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    pub fn with_settings(sink: S, settings: &Settings) -> Self {
        let mut manager = Self::new(sink);
        manager.apply_settings(settings);
        manager
    }

    pub fn apply_settings(&mut self, settings: &Settings) {
        self.set_master_volume(settings.master_volume);
        self.set_sfx_volume(settings.sfx_volume);
        self.set_muted(settings.muted);
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect. The movement loop only starts when the sink is idle.
    pub fn play(&mut self, cue: SoundCue) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        if cue == SoundCue::Movement && self.sink.is_busy() {
            return;
        }
        self.sink.play(cue, vol);
    }

    /// Play every sound cue in a batch of simulation events
    pub fn dispatch(&mut self, events: &[GameEvent]) {
        for event in events {
            if let GameEvent::Sound(cue) = event {
                self.play(*cue);
            }
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingSink {
        played: Vec<(SoundCue, f32)>,
        busy: bool,
    }

    impl AudioSink for RecordingSink {
        fn play(&mut self, cue: SoundCue, volume: f32) {
            self.played.push((cue, volume));
        }

        fn is_busy(&self) -> bool {
            self.busy
        }
    }

    #[test]
    fn test_dispatch_plays_only_sound_events() {
        let mut audio = AudioManager::new(RecordingSink::default());
        audio.dispatch(&[
            GameEvent::Sound(SoundCue::Fire),
            GameEvent::Restarted,
            GameEvent::Sound(SoundCue::Explosion),
        ]);
        let cues: Vec<_> = audio.sink().played.iter().map(|(c, _)| *c).collect();
        assert_eq!(cues, vec![SoundCue::Fire, SoundCue::Explosion]);
        assert!((audio.sink().played[0].1 - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_movement_waits_for_idle_sink() {
        let sink = RecordingSink {
            busy: true,
            ..Default::default()
        };
        let mut audio = AudioManager::new(sink);
        audio.play(SoundCue::Movement);
        audio.play(SoundCue::Fire);
        assert_eq!(audio.sink().played.len(), 1);
        assert_eq!(audio.sink().played[0].0, SoundCue::Fire);
    }

    #[test]
    fn test_cue_queue_only_blocks_repeat_movement() {
        let mut audio = AudioManager::new(CueQueue::default());
        audio.play(SoundCue::Fire);
        audio.play(SoundCue::Movement);
        audio.play(SoundCue::Movement);
        let cues: Vec<_> = audio.sink_mut().drain().iter().map(|c| c.cue).collect();
        assert_eq!(cues, vec!["fire", "movement"]);

        audio.sink_mut().set_playing(true);
        audio.play(SoundCue::Movement);
        audio.play(SoundCue::Explosion);
        let cues: Vec<_> = audio.sink_mut().drain().iter().map(|c| c.cue).collect();
        assert_eq!(cues, vec!["explosion"]);
    }

    #[test]
    fn test_cue_queue_drops_oldest_when_full() {
        let mut queue = CueQueue::new(3);
        queue.play(SoundCue::Movement, 1.0);
        for _ in 0..4 {
            queue.play(SoundCue::Fire, 0.5);
        }
        assert_eq!(queue.len(), 3);
        assert!(queue.drain().iter().all(|c| c.cue == "fire"));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_mute_from_settings() {
        let settings = Settings {
            muted: true,
            ..Default::default()
        };
        let mut audio = AudioManager::with_settings(RecordingSink::default(), &settings);
        audio.play(SoundCue::Explosion);
        assert!(audio.sink().played.is_empty());
    }
}
