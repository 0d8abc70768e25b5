//! Collision detection for circle-based bodies
//!
//! Everything here is a distance-threshold test. Scans return the FIRST
//! qualifying entity in iteration order; there is no nearest-hit search.
//! The caller applies the outcome, so nothing is removed while iterating.

use glam::Vec2;

use super::entities::{Enemy, Meteor, Projectile};
use crate::consts::PROJECTILE_RADIUS;
use crate::tuning::Tuning;

/// Strict circle overlap: `distance(a, b) < radius`
#[inline]
pub fn within(a: Vec2, b: Vec2, radius: f32) -> bool {
    a.distance(b) < radius
}

/// What a single player projectile struck this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectileHit {
    /// Index into the meteor list
    Meteor(usize),
    /// Index into the enemy list
    Enemy(usize),
}

/// Resolve a player projectile against meteors first, then enemies.
///
/// A meteor hit consumes the projectile, so enemies are only scanned when
/// no meteor qualified.
pub fn scan_player_projectile(shot: &Projectile, meteors: &[Meteor], enemies: &[Enemy]) -> Option<ProjectileHit> {
    if let Some(i) = meteors
        .iter()
        .position(|m| m.check_collision(shot.pos, PROJECTILE_RADIUS))
    {
        return Some(ProjectileHit::Meteor(i));
    }

    enemies
        .iter()
        .position(|e| e.check_collision(shot.pos))
        .map(ProjectileHit::Enemy)
}

/// Direct body contact between the player and an enemy
#[inline]
pub fn player_touches_enemy(player_pos: Vec2, enemy: &Enemy, tuning: &Tuning) -> bool {
    within(player_pos, enemy.pos, tuning.player_body_radius() + enemy.size)
}

/// Direct body contact between a meteor and the player
#[inline]
pub fn meteor_touches_player(meteor: &Meteor, player_pos: Vec2, tuning: &Tuning) -> bool {
    meteor.check_collision(player_pos, tuning.player_body_radius())
}

/// First enemy a meteor is touching
pub fn meteor_enemy_contact(meteor: &Meteor, enemies: &[Enemy]) -> Option<usize> {
    enemies
        .iter()
        .position(|e| meteor.check_collision(e.pos, e.size))
}

/// Enemy projectile striking the player
#[inline]
pub fn enemy_shot_hits_player(shot: &Projectile, player_pos: Vec2, tuning: &Tuning) -> bool {
    within(player_pos, shot.pos, tuning.player_hit_radius())
}
