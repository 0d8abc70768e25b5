//! Timer-driven spawning of enemies and meteors

use glam::Vec2;
use rand::Rng;

use super::entities::{Enemy, Meteor};
use super::state::GameState;
use crate::consts::METEOR_SPAWN_INSET;
use crate::tuning::Tuning;

/// Rejection-sampling budget for a safe enemy position
pub const MAX_SPAWN_ATTEMPTS: u32 = 1000;

/// Arena edge a meteor enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];
}

/// Spawn an enemy on spawn-rate multiples while below the cap.
///
/// The spawn timer advances every call regardless of the outcome.
pub fn spawn_enemies(state: &mut GameState) {
    let timer = state.enemy_spawn_timer;
    state.enemy_spawn_timer += 1;

    let tuning = &state.tuning;
    if timer % tuning.enemy_spawn_rate as u64 != 0 || state.enemies.len() >= tuning.max_enemies {
        return;
    }

    let Some(pos) = sample_enemy_position(&mut state.rng, state.player.pos, &state.tuning) else {
        log::warn!("No spawn point outside the safe radius, skipping enemy spawn");
        return;
    };

    let shooter = state.player.score >= state.tuning.score_threshold
        && state.rng.random_bool(state.tuning.shooter_chance);
    let id = state.next_entity_id();
    let enemy = if shooter {
        Enemy::shooter(id, pos, &state.tuning)
    } else {
        Enemy::chaser(id, pos, &state.tuning)
    };
    log::debug!(
        "Spawned {} #{id} at ({:.0}, {:.0})",
        if shooter { "shooter" } else { "chaser" },
        pos.x,
        pos.y
    );
    state.enemies.push(enemy);
}

/// Uniform integer point in the arena farther than the safe distance from
/// the player, or `None` if the budget runs out (arena smaller than the
/// exclusion zone).
pub fn sample_enemy_position(rng: &mut impl Rng, player_pos: Vec2, tuning: &Tuning) -> Option<Vec2> {
    let max_x = tuning.arena_width as i32;
    let max_y = tuning.arena_height as i32;
    for _ in 0..MAX_SPAWN_ATTEMPTS {
        let candidate = Vec2::new(
            rng.random_range(0..=max_x) as f32,
            rng.random_range(0..=max_y) as f32,
        );
        if candidate.distance(player_pos) > tuning.safe_distance {
            return Some(candidate);
        }
    }
    None
}

/// Spawn one meteor every `meteor_spawn_rate` ticks
pub fn spawn_meteors(state: &mut GameState) {
    state.meteor_spawn_timer += 1;
    if state.meteor_spawn_timer < state.tuning.meteor_spawn_rate {
        return;
    }
    state.meteor_spawn_timer = 0;

    let id = state.next_entity_id();
    let meteor = roll_meteor(&mut state.rng, id, &state.tuning);
    log::debug!(
        "Spawned meteor #{id} at ({:.0}, {:.0}) speed {:.1}",
        meteor.pos.x,
        meteor.pos.y,
        meteor.speed
    );
    state.meteors.push(meteor);
}

/// Build a meteor just outside a random edge, heading broadly inward
pub fn roll_meteor(rng: &mut impl Rng, id: u32, tuning: &Tuning) -> Meteor {
    let edge = Edge::ALL[rng.random_range(0..Edge::ALL.len())];
    let w = tuning.arena_width;
    let h = tuning.arena_height;
    let along_x = rng.random_range(0..=w as i32) as f32;
    let along_y = rng.random_range(0..=h as i32) as f32;
    let inward = rng.random_range(0.5..1.0_f32);
    let sideways = rng.random_range(-0.5..0.5_f32);

    let (pos, dir) = match edge {
        Edge::Top => (Vec2::new(along_x, -METEOR_SPAWN_INSET), Vec2::new(sideways, inward)),
        Edge::Right => (Vec2::new(w + METEOR_SPAWN_INSET, along_y), Vec2::new(-inward, sideways)),
        Edge::Bottom => (Vec2::new(along_x, h + METEOR_SPAWN_INSET), Vec2::new(sideways, -inward)),
        Edge::Left => (Vec2::new(-METEOR_SPAWN_INSET, along_y), Vec2::new(inward, sideways)),
    };

    let speed = rng.random_range(tuning.meteor_min_speed..=tuning.meteor_max_speed);
    let rotation = rng.random_range(0..=360) as f32;
    let spin = rng.random_range(-tuning.meteor_max_spin..=tuning.meteor_max_spin);

    Meteor::new(id, pos, dir.normalize(), speed, rotation, spin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_enemy_spawns_on_first_tick_then_waits() {
        let mut state = GameState::new(1);
        spawn_enemies(&mut state);
        assert_eq!(state.enemies.len(), 1);
        for _ in 1..150 {
            spawn_enemies(&mut state);
        }
        assert_eq!(state.enemies.len(), 1);
        spawn_enemies(&mut state);
        assert_eq!(state.enemies.len(), 2);
    }

    #[test]
    fn test_enemy_cap() {
        let tuning = Tuning {
            enemy_spawn_rate: 1,
            max_enemies: 3,
            ..Default::default()
        };
        let mut state = GameState::with_tuning(1, tuning);
        for _ in 0..20 {
            spawn_enemies(&mut state);
        }
        assert_eq!(state.enemies.len(), 3);
        assert_eq!(state.enemy_spawn_timer, 20);
    }

    #[test]
    fn test_no_shooters_below_threshold() {
        let tuning = Tuning {
            enemy_spawn_rate: 1,
            max_enemies: 500,
            shooter_chance: 1.0,
            ..Default::default()
        };
        let mut state = GameState::with_tuning(3, tuning);
        for _ in 0..50 {
            spawn_enemies(&mut state);
        }
        assert!(state.enemies.iter().all(|e| !e.is_shooter()));

        state.player.score = 50;
        spawn_enemies(&mut state);
        assert!(state.enemies.last().is_some_and(|e| e.is_shooter()));
    }

    #[test]
    fn test_spawn_respects_safe_distance() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(42);
        let player = Vec2::new(400.0, 300.0);
        for _ in 0..500 {
            let pos = sample_enemy_position(&mut rng, player, &tuning).unwrap();
            assert!(pos.distance(player) > tuning.safe_distance);
            assert!((0.0..=800.0).contains(&pos.x));
            assert!((0.0..=600.0).contains(&pos.y));
        }
    }

    #[test]
    fn test_spawn_gives_up_when_arena_is_all_exclusion() {
        let tuning = Tuning {
            arena_width: 100.0,
            arena_height: 100.0,
            ..Default::default()
        };
        let mut rng = Pcg32::seed_from_u64(42);
        assert!(sample_enemy_position(&mut rng, Vec2::new(50.0, 50.0), &tuning).is_none());
    }

    #[test]
    fn test_meteor_timer() {
        let mut state = GameState::new(5);
        for _ in 0..399 {
            spawn_meteors(&mut state);
        }
        assert!(state.meteors.is_empty());
        spawn_meteors(&mut state);
        assert_eq!(state.meteors.len(), 1);
        assert_eq!(state.meteor_spawn_timer, 0);
    }

    #[test]
    fn test_meteors_enter_from_outside_heading_inward() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(9);
        for id in 0..200 {
            let m = roll_meteor(&mut rng, id, &tuning);
            assert!((m.dir.length() - 1.0).abs() < 1e-4);
            assert!((1.0..=10.0).contains(&m.speed));
            assert!(m.spin.abs() <= 2.0);

            let outside_x = m.pos.x < 0.0 || m.pos.x > 800.0;
            let outside_y = m.pos.y < 0.0 || m.pos.y > 600.0;
            assert!(outside_x || outside_y);

            // Moving toward the arena on the axis it is outside of
            if m.pos.x < 0.0 {
                assert!(m.dir.x > 0.0);
            } else if m.pos.x > 800.0 {
                assert!(m.dir.x < 0.0);
            } else if m.pos.y < 0.0 {
                assert!(m.dir.y > 0.0);
            } else {
                assert!(m.dir.y < 0.0);
            }
        }
    }
}
