//! Fixed timestep simulation tick
//!
//! Core game loop step. The order of the phases below is part of the game
//! rules: an entity consumed by an earlier phase is never seen by a later one.

use super::collision::{self, ProjectileHit};
use super::entities::EnemyKind;
use super::spawn;
use super::state::{GameEvent, GamePhase, GameState};
use crate::audio::SoundCue;

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Rotate counter-clockwise (held)
    pub left: bool,
    /// Rotate clockwise (held)
    pub right: bool,
    /// Thrust forward (held)
    pub forward: bool,
    /// Thrust backward at half strength (held, ignored while forward is held)
    pub reverse: bool,
    /// Fire one shot (one-shot)
    pub fire: bool,
    /// Reset the world (one-shot)
    pub restart: bool,
}

impl TickInput {
    /// Pack into bits: left, right, forward, reverse, fire, restart
    pub fn to_bits(self) -> u8 {
        (self.left as u8)
            | (self.right as u8) << 1
            | (self.forward as u8) << 2
            | (self.reverse as u8) << 3
            | (self.fire as u8) << 4
            | (self.restart as u8) << 5
    }

    pub fn from_bits(bits: u8) -> Self {
        Self {
            left: bits & 1 != 0,
            right: bits & (1 << 1) != 0,
            forward: bits & (1 << 2) != 0,
            reverse: bits & (1 << 3) != 0,
            fire: bits & (1 << 4) != 0,
            restart: bits & (1 << 5) != 0,
        }
    }
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    if input.restart {
        state.restart();
        return;
    }

    if state.phase == GamePhase::GameOver {
        return;
    }

    // Damage lands during a tick; the run ends at the top of the next one
    if state.player.health <= 0 {
        state.phase = GamePhase::GameOver;
        let score = state.player.score;
        log::info!("Game over after {} ticks with score {}", state.time_ticks, score);
        state.emit(GameEvent::GameOver { score });
        return;
    }

    state.time_ticks += 1;

    if input.fire {
        state.player.shoot(&state.tuning);
        state.emit(GameEvent::Sound(SoundCue::Fire));
    }

    let moving = state
        .player
        .update(input, &state.tuning, &mut state.camera_offset);
    if moving {
        state.emit(GameEvent::Sound(SoundCue::Movement));
    }

    spawn::spawn_enemies(state);
    update_enemies(state);

    spawn::spawn_meteors(state);
    update_meteors(state);

    update_explosions(state);
    update_player_projectiles(state);
}

/// Steer every enemy, resolve body contact with the player, then fly
/// shooter projectiles.
fn update_enemies(state: &mut GameState) {
    let mut i = 0;
    while i < state.enemies.len() {
        let target = state.player.pos;
        state.enemies[i].move_towards_player(target, &state.tuning);

        if collision::player_touches_enemy(state.player.pos, &state.enemies[i], &state.tuning) {
            let enemy = state.enemies.remove(i);
            log::debug!("Enemy #{} rammed the player", enemy.id);
            state.damage_player(1);
            state.spawn_explosion(enemy.pos);
            continue;
        }

        let hits = update_enemy_projectiles(state, i);
        for _ in 0..hits {
            state.damage_player(1);
        }
        i += 1;
    }
}

/// Advance one shooter's projectiles; returns how many struck the player
fn update_enemy_projectiles(state: &mut GameState, index: usize) -> u32 {
    let player_pos = state.player.pos;
    let tuning = &state.tuning;
    let EnemyKind::Shooter { bullets, .. } = &mut state.enemies[index].kind else {
        return 0;
    };

    let mut hits = 0;
    bullets.retain_mut(|shot| {
        shot.advance();
        if collision::enemy_shot_hits_player(shot, player_pos, tuning) {
            hits += 1;
            return false;
        }
        shot.in_arena(tuning.arena_width, tuning.arena_height)
    });
    hits
}

/// Advance meteors and resolve their contacts with the player and enemies
fn update_meteors(state: &mut GameState) {
    let mut i = 0;
    while i < state.meteors.len() {
        state.meteors[i].advance();

        if collision::meteor_touches_player(&state.meteors[i], state.player.pos, &state.tuning) {
            let meteor = state.meteors.remove(i);
            state.damage_player(state.tuning.meteor_damage);
            state.spawn_explosion(meteor.pos);
            continue;
        }

        if let Some(j) = collision::meteor_enemy_contact(&state.meteors[i], &state.enemies) {
            let enemy = state.enemies.remove(j);
            let meteor = state.meteors.remove(i);
            log::debug!("Meteor #{} crushed enemy #{}", meteor.id, enemy.id);
            state.spawn_explosion(meteor.pos);
            continue;
        }

        if state.meteors[i].is_out_of_bounds(&state.tuning) {
            state.meteors.remove(i);
            continue;
        }

        i += 1;
    }
}

fn update_explosions(state: &mut GameState) {
    state.explosions.retain_mut(|e| e.update());
}

/// Fly player projectiles; each resolves at most one hit
fn update_player_projectiles(state: &mut GameState) {
    let shots = std::mem::take(&mut state.player.bullets);
    let mut survivors = Vec::with_capacity(shots.len());

    for mut shot in shots {
        shot.advance();

        match collision::scan_player_projectile(&shot, &state.meteors, &state.enemies) {
            Some(ProjectileHit::Meteor(j)) => {
                let meteor = state.meteors.remove(j);
                state.spawn_explosion(meteor.pos);
                state.award_kill();
            }
            Some(ProjectileHit::Enemy(j)) => {
                if state.enemies[j].take_hit() {
                    let enemy = state.enemies.remove(j);
                    state.spawn_explosion(enemy.pos);
                    state.award_kill();
                }
            }
            None => {
                if shot.in_arena(state.tuning.arena_width, state.tuning.arena_height) {
                    survivors.push(shot);
                }
            }
        }
    }

    state.player.bullets = survivors;
}
