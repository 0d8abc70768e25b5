//! Data-driven game balance
//!
//! Every gameplay number lives here so tests and hosts can reshape the game
//! without touching the simulation. Defaults reproduce the shipped balance.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Errors while loading a tuning file
#[derive(thiserror::Error, Debug)]
pub enum TuningError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid tuning JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Gameplay balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Arena ===
    pub arena_width: f32,
    pub arena_height: f32,
    /// Soft margin where the player pins and the camera scrolls
    pub player_margin: f32,
    pub meteor_out_of_bounds_margin: f32,

    // === Player ===
    pub player_width: f32,
    pub player_health: i32,
    /// Thrust added per tick while moving forward
    pub acceleration: f32,
    /// Velocity multiplier applied every tick (< 1)
    pub drift_factor: f32,
    /// Degrees per tick
    pub rotation_speed: f32,
    pub player_bullet_speed: f32,

    // === Enemies ===
    pub enemy_spawn_rate: u32,
    pub max_enemies: usize,
    /// Minimum spawn distance from the player
    pub safe_distance: f32,
    /// Score needed before shooters can appear
    pub score_threshold: u64,
    /// Chance a spawn becomes a shooter once the threshold is reached
    pub shooter_chance: f64,
    pub chaser_speed: f32,
    pub shooter_speed: f32,
    /// Ticks between shooter volleys
    pub shoot_cooldown: u32,
    pub enemy_bullet_speed: f32,

    // === Meteors ===
    pub meteor_spawn_rate: u32,
    pub meteor_min_speed: f32,
    pub meteor_max_speed: f32,
    pub meteor_max_spin: f32,

    // === Scoring & damage ===
    pub kill_reward: u64,
    pub meteor_damage: i32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            player_margin: PLAYER_MARGIN,
            meteor_out_of_bounds_margin: METEOR_OUT_OF_BOUNDS_MARGIN,

            player_width: PLAYER_WIDTH,
            player_health: PLAYER_START_HEALTH,
            acceleration: 0.3,
            drift_factor: 0.95,
            rotation_speed: 3.0,
            player_bullet_speed: 7.0,

            enemy_spawn_rate: 150,
            max_enemies: 5,
            safe_distance: 180.0,
            score_threshold: 50,
            shooter_chance: 0.1,
            chaser_speed: 1.0,
            shooter_speed: 1.0,
            shoot_cooldown: 150,
            enemy_bullet_speed: 4.0,

            meteor_spawn_rate: 400,
            meteor_min_speed: 1.0,
            meteor_max_speed: 10.0,
            meteor_max_spin: 2.0,

            kill_reward: 5,
            meteor_damage: 2,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        Ok(tuning.validated())
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    /// Clamp values the simulation cannot run with
    pub fn validated(mut self) -> Self {
        self.enemy_spawn_rate = self.enemy_spawn_rate.max(1);
        self.meteor_spawn_rate = self.meteor_spawn_rate.max(1);
        self.arena_width = self.arena_width.max(1.0);
        self.arena_height = self.arena_height.max(1.0);
        self.drift_factor = self.drift_factor.clamp(0.0, 1.0);
        self.shooter_chance = self.shooter_chance.clamp(0.0, 1.0);
        if self.meteor_max_speed < self.meteor_min_speed {
            std::mem::swap(&mut self.meteor_min_speed, &mut self.meteor_max_speed);
        }
        self.meteor_max_spin = self.meteor_max_spin.abs();
        self
    }

    /// Radius used for body contact against enemies and meteors
    #[inline]
    pub fn player_body_radius(&self) -> f32 {
        (self.player_width / 3.0).floor()
    }

    /// Radius used for enemy projectile hits
    #[inline]
    pub fn player_hit_radius(&self) -> f32 {
        (self.player_width / 2.0).floor()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "max_enemies": 0, "meteor_spawn_rate": 10 }"#).unwrap();
        assert_eq!(tuning.max_enemies, 0);
        assert_eq!(tuning.meteor_spawn_rate, 10);
        assert_eq!(tuning.enemy_spawn_rate, 150);
        assert_eq!(tuning.player_health, 5);
    }

    #[test]
    fn test_validation_clamps_rates() {
        let tuning = Tuning::from_json(r#"{ "enemy_spawn_rate": 0, "meteor_min_speed": 9.0, "meteor_max_speed": 2.0 }"#)
            .unwrap();
        assert_eq!(tuning.enemy_spawn_rate, 1);
        assert_eq!(tuning.meteor_min_speed, 2.0);
        assert_eq!(tuning.meteor_max_speed, 9.0);
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(matches!(Tuning::from_json("{ nope"), Err(TuningError::Json(_))));
    }

    #[test]
    fn test_player_radii() {
        let tuning = Tuning::default();
        assert_eq!(tuning.player_body_radius(), 16.0);
        assert_eq!(tuning.player_hit_radius(), 25.0);
    }
}
