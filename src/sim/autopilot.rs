//! Idle/demo mode - the AI flies the ship
//!
//! Produces the same `TickInput` a player would, so demo runs exercise the
//! real simulation path.

use glam::Vec2;

use super::state::GameState;
use super::tick::TickInput;

/// Degrees of misalignment tolerated before turning
const AIM_DEADZONE: f32 = 4.0;
/// Degrees of misalignment within which the AI opens fire
const FIRE_CONE: f32 = 10.0;
/// Ticks between demo shots
const FIRE_INTERVAL: u64 = 8;
/// Close in on threats beyond this range
const CHASE_RANGE: f32 = 260.0;
/// Back off from threats inside this range
const RETREAT_RANGE: f32 = 120.0;

/// Wrap degrees to [-180, 180)
#[inline]
pub fn wrap_degrees(angle: f32) -> f32 {
    (angle + 180.0).rem_euclid(360.0) - 180.0
}

/// Facing angle (degrees) that points the ship from `from` at `to`
#[inline]
pub fn facing_toward(from: Vec2, to: Vec2) -> f32 {
    let delta = to - from;
    (-delta.y).atan2(delta.x).to_degrees()
}

/// Decide this tick's controls from the current world
pub fn demo_input(state: &GameState) -> TickInput {
    let player = &state.player;

    // Nearest threat, enemies and meteors alike
    let threat = state
        .enemies
        .iter()
        .map(|e| e.pos)
        .chain(state.meteors.iter().map(|m| m.pos))
        .min_by(|a, b| {
            a.distance_squared(player.pos)
                .partial_cmp(&b.distance_squared(player.pos))
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    let Some(target) = threat else {
        // Nothing around: slow patrol spin
        return TickInput {
            left: state.time_ticks % 4 == 0,
            ..Default::default()
        };
    };

    let diff = wrap_degrees(facing_toward(player.pos, target) - player.angle);
    let distance = player.pos.distance(target);

    TickInput {
        left: diff > AIM_DEADZONE,
        right: diff < -AIM_DEADZONE,
        forward: distance > CHASE_RANGE && diff.abs() < 45.0,
        reverse: distance < RETREAT_RANGE,
        fire: diff.abs() < FIRE_CONE && state.time_ticks % FIRE_INTERVAL == 0,
        restart: false,
    }
}
