//! Space Journey - A scrolling-arena arcade survival game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, spawning, collisions, game state)
//! - `session`: Fixed-timestep loop and game-over bookkeeping around `sim`
//! - `audio`: Sound cue routing to a host-provided sink
//! - `highscores`: Leaderboard contract and implementations
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences (volume, initials)

pub mod audio;
pub mod highscores;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use highscores::{Leaderboard, LeaderboardError, LocalLeaderboard, RelayLeaderboard, ScoreRecord};
pub use session::Session;
pub use settings::Settings;
pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per rendered frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame the scheduler will account for (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;
    /// Inset from each arena edge where the player pins and the world scrolls
    pub const PLAYER_MARGIN: f32 = 50.0;
    /// Meteors further than this beyond the arena are discarded
    pub const METEOR_OUT_OF_BOUNDS_MARGIN: f32 = 100.0;
    /// Distance outside the arena edge where meteors appear
    pub const METEOR_SPAWN_INSET: f32 = 50.0;

    /// Player sprite width, used to derive the player's hit radii
    pub const PLAYER_WIDTH: f32 = 50.0;
    pub const PLAYER_START_HEALTH: i32 = 5;

    /// Enemy collision radius (both variants)
    pub const ENEMY_SIZE: f32 = 30.0;
    pub const CHASER_HEALTH: i32 = 1;
    pub const SHOOTER_HEALTH: i32 = 2;

    /// Meteor sprite size; collision radius is half of it
    pub const METEOR_SIZE: f32 = 40.0;
    pub const METEOR_HEALTH: i32 = 4;

    /// Player projectile radius
    pub const PROJECTILE_RADIUS: f32 = 5.0;

    /// Explosion lifetime in ticks
    pub const EXPLOSION_FRAMES: u32 = 15;

    /// Enemy animation: frames in the cycle and ticks per frame
    pub const ENEMY_ANIMATION_FRAMES: u8 = 2;
    pub const ENEMY_ANIMATION_TICKS: u32 = 10;
}

/// Unit vector for a facing angle in degrees (screen space, y grows downward)
#[inline]
pub fn heading(angle_deg: f32) -> Vec2 {
    let rad = angle_deg.to_radians();
    Vec2::new(rad.cos(), -rad.sin())
}

/// Bearing in radians from `from` toward `to` (screen space)
#[inline]
pub fn bearing(from: Vec2, to: Vec2) -> f32 {
    let delta = to - from;
    delta.y.atan2(delta.x)
}

/// Unit vector pointing from `from` toward `to`
///
/// Coincident points yield `+x`, matching `atan2(0, 0) == 0`.
#[inline]
pub fn unit_toward(from: Vec2, to: Vec2) -> Vec2 {
    let theta = bearing(from, to);
    Vec2::new(theta.cos(), theta.sin())
}
