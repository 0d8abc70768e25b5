//! Game state and core simulation types
//!
//! The whole world lives in one `GameState` owned by the simulation loop.
//! Every entity sits in exactly one collection; removing it from that
//! collection is the only way it dies.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entities::{Enemy, Explosion, Meteor, Player};
use crate::audio::SoundCue;
use crate::tuning::Tuning;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Player health ran out; only restart does anything
    GameOver,
}

/// Side effects requested by the simulation, drained by the host each frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Audio cue for the sound collaborator
    Sound(SoundCue),
    /// Player took damage
    PlayerHit { damage: i32, health: i32 },
    /// Score increased
    ScoreAwarded { points: u64, total: u64 },
    /// A kill left an explosion here
    Explosion { pos: Vec2 },
    /// Session ended with this score
    GameOver { score: u64 },
    /// World was reset
    Restarted,
}

/// Complete world state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Balance values this run was started with
    pub tuning: Tuning,
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Simulation tick counter (running ticks only)
    pub time_ticks: u64,
    pub player: Player,
    /// Active enemies in spawn order
    pub enemies: Vec<Enemy>,
    /// Active meteors in spawn order
    pub meteors: Vec<Meteor>,
    pub explosions: Vec<Explosion>,
    /// How far the world has scrolled under a pinned player
    pub camera_offset: Vec2,
    /// Ticks since restart; enemies spawn on multiples of the spawn rate
    pub enemy_spawn_timer: u64,
    /// Ticks since the last meteor
    pub meteor_spawn_timer: u32,
    /// Pending side effects (see `drain_events`)
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game state with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let tuning = tuning.validated();
        let player = Self::fresh_player(&tuning);
        Self {
            seed,
            tuning,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Running,
            time_ticks: 0,
            player,
            enemies: Vec::new(),
            meteors: Vec::new(),
            explosions: Vec::new(),
            camera_offset: Vec2::ZERO,
            enemy_spawn_timer: 0,
            meteor_spawn_timer: 0,
            events: Vec::new(),
            next_id: 1,
        }
    }

    fn fresh_player(tuning: &Tuning) -> Player {
        let center = Vec2::new(tuning.arena_width / 2.0, tuning.arena_height / 2.0).floor();
        Player::new(center, tuning.player_health)
    }

    /// Reset the world for a new run. The RNG stream carries on.
    pub fn restart(&mut self) {
        self.player = Self::fresh_player(&self.tuning);
        self.enemies.clear();
        self.meteors.clear();
        self.explosions.clear();
        self.camera_offset = Vec2::ZERO;
        self.enemy_spawn_timer = 0;
        self.meteor_spawn_timer = 0;
        self.time_ticks = 0;
        self.phase = GamePhase::Running;
        self.events.push(GameEvent::Restarted);
        log::info!("World restarted");
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    #[inline]
    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all pending events, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Leave an explosion behind and request its sound
    pub fn spawn_explosion(&mut self, pos: Vec2) {
        self.explosions.push(Explosion::new(pos));
        self.emit(GameEvent::Explosion { pos });
        self.emit(GameEvent::Sound(SoundCue::Explosion));
    }

    /// Subtract health without clamping
    pub fn damage_player(&mut self, damage: i32) {
        self.player.health -= damage;
        let health = self.player.health;
        log::debug!("Player hit for {damage}, health now {health}");
        self.emit(GameEvent::PlayerHit { damage, health });
    }

    /// Grant the kill reward
    pub fn award_kill(&mut self) {
        let points = self.tuning.kill_reward;
        self.player.score += points;
        let total = self.player.score;
        self.emit(GameEvent::ScoreAwarded { points, total });
    }

    /// All live enemy projectiles, across every shooter
    pub fn enemy_bullet_count(&self) -> usize {
        self.enemies.iter().map(|e| e.bullets().len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = GameState::new(7);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.player.pos, Vec2::new(400.0, 300.0));
        assert_eq!(state.player.health, 5);
        assert_eq!(state.player.score, 0);
        assert!(state.enemies.is_empty());
        assert!(state.meteors.is_empty());
    }

    #[test]
    fn test_entity_ids_are_unique() {
        let mut state = GameState::new(7);
        let a = state.next_entity_id();
        let b = state.next_entity_id();
        assert_ne!(a, b);
    }

    #[test]
    fn test_health_is_not_clamped() {
        let mut state = GameState::new(7);
        state.player.health = 1;
        state.damage_player(2);
        assert_eq!(state.player.health, -1);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::PlayerHit {
                damage: 2,
                health: -1
            }]
        );
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_explosion_requests_sound() {
        let mut state = GameState::new(7);
        state.spawn_explosion(Vec2::new(10.0, 20.0));
        assert_eq!(state.explosions.len(), 1);
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::Sound(SoundCue::Explosion)));
    }
}
