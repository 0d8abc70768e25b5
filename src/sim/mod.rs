//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one tick = one step of motion)
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, audio or network dependencies

pub mod autopilot;
pub mod collision;
pub mod entities;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;

pub use autopilot::demo_input;
pub use collision::{ProjectileHit, scan_player_projectile, within};
pub use entities::{Enemy, EnemyKind, Explosion, Meteor, Player, Projectile};
pub use snapshot::{EnemyVariant, Snapshot};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};
