//! Kinematic bodies: player craft, enemies, meteors, projectiles, explosions
//!
//! Each body owns its per-tick motion rule. Collision resolution and
//! removal are driven from `tick`, never from here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::tick::TickInput;
use crate::consts::*;
use crate::tuning::Tuning;
use crate::{heading, unit_toward};

/// A projectile (player shot or shooter shot)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Projectile {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self { pos, vel }
    }

    #[inline]
    pub fn advance(&mut self) {
        self.pos += self.vel;
    }

    /// Strictly inside the arena rectangle (edges count as outside)
    #[inline]
    pub fn in_arena(&self, width: f32, height: f32) -> bool {
        self.pos.x > 0.0 && self.pos.x < width && self.pos.y > 0.0 && self.pos.y < height
    }
}

/// The player's craft
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    /// Facing angle in degrees (0 = right, counter-clockwise on screen)
    pub angle: f32,
    pub vel: Vec2,
    /// May dip below zero for one tick before game over is detected
    pub health: i32,
    pub score: u64,
    /// Shots fired by the player that are still in flight
    pub bullets: Vec<Projectile>,
}

impl Player {
    pub fn new(pos: Vec2, health: i32) -> Self {
        Self {
            pos,
            angle: 0.0,
            vel: Vec2::ZERO,
            health,
            score: 0,
            bullets: Vec::new(),
        }
    }

    /// Apply rotation, thrust, drift and soft-margin movement for one tick.
    ///
    /// When the candidate position leaves the margin-inset rectangle on an
    /// axis, that axis stays put and `camera_offset` scrolls instead.
    /// Returns whether thrust was applied.
    pub fn update(&mut self, input: &TickInput, tuning: &Tuning, camera_offset: &mut Vec2) -> bool {
        if input.left {
            self.angle += tuning.rotation_speed;
        }
        if input.right {
            self.angle -= tuning.rotation_speed;
        }

        let facing = heading(self.angle);
        let mut moving = false;
        if input.forward {
            self.vel += facing * tuning.acceleration;
            moving = true;
        } else if input.reverse {
            self.vel -= facing * (tuning.acceleration / 2.0);
            moving = true;
        }

        self.vel *= tuning.drift_factor;

        let candidate = self.pos + self.vel;
        let margin = tuning.player_margin;

        if candidate.x < margin || candidate.x > tuning.arena_width - margin {
            camera_offset.x += self.vel.x;
        } else {
            self.pos.x = candidate.x;
        }

        if candidate.y < margin || candidate.y > tuning.arena_height - margin {
            camera_offset.y += self.vel.y;
        } else {
            self.pos.y = candidate.y;
        }

        moving
    }

    /// Fire a shot along the current facing; no cooldown
    pub fn shoot(&mut self, tuning: &Tuning) {
        let vel = heading(self.angle) * tuning.player_bullet_speed;
        self.bullets.push(Projectile::new(self.pos, vel));
    }
}

/// Enemy variants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Melee pursuer
    Chaser,
    /// Pursuer that also fires at the player on a cooldown
    Shooter {
        /// Ticks until the next shot (fires when already zero)
        cooldown: u32,
        /// Shots owned by this shooter; they vanish with it
        bullets: Vec<Projectile>,
    },
}

/// An enemy entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    /// Collision radius
    pub size: f32,
    pub speed: f32,
    pub health: i32,
    pub kind: EnemyKind,
    /// Current sprite frame (render-only)
    pub anim_frame: u8,
    anim_timer: u32,
}

impl Enemy {
    pub fn chaser(id: u32, pos: Vec2, tuning: &Tuning) -> Self {
        Self::with_kind(id, pos, tuning.chaser_speed, CHASER_HEALTH, EnemyKind::Chaser)
    }

    pub fn shooter(id: u32, pos: Vec2, tuning: &Tuning) -> Self {
        let kind = EnemyKind::Shooter {
            cooldown: 0,
            bullets: Vec::new(),
        };
        Self::with_kind(id, pos, tuning.shooter_speed, SHOOTER_HEALTH, kind)
    }

    fn with_kind(id: u32, pos: Vec2, speed: f32, health: i32, kind: EnemyKind) -> Self {
        Self {
            id,
            pos,
            size: ENEMY_SIZE,
            speed,
            health,
            kind,
            anim_frame: 0,
            anim_timer: 0,
        }
    }

    pub fn is_shooter(&self) -> bool {
        matches!(self.kind, EnemyKind::Shooter { .. })
    }

    /// Pure pursuit toward `target`, plus the shooter's cooldown/fire step.
    ///
    /// Returns true if a shot was fired this tick.
    pub fn move_towards_player(&mut self, target: Vec2, tuning: &Tuning) -> bool {
        let dir = unit_toward(self.pos, target);
        self.pos += dir * self.speed;

        self.anim_timer += 1;
        if self.anim_timer >= ENEMY_ANIMATION_TICKS {
            self.anim_timer = 0;
            self.anim_frame = (self.anim_frame + 1) % ENEMY_ANIMATION_FRAMES;
        }

        match &mut self.kind {
            EnemyKind::Chaser => false,
            EnemyKind::Shooter { cooldown, bullets } => {
                if *cooldown > 0 {
                    *cooldown -= 1;
                    false
                } else {
                    // Aim from the post-move position
                    let aim = unit_toward(self.pos, target);
                    bullets.push(Projectile::new(self.pos, aim * tuning.enemy_bullet_speed));
                    *cooldown = tuning.shoot_cooldown;
                    true
                }
            }
        }
    }

    /// Whether a point (player shot) lies inside this enemy
    #[inline]
    pub fn check_collision(&self, point: Vec2) -> bool {
        self.pos.distance(point) < self.size
    }

    /// Apply one point of damage; returns true once destroyed
    pub fn take_hit(&mut self) -> bool {
        self.health -= 1;
        self.health <= 0
    }

    /// Shots owned by this enemy (empty for chasers)
    pub fn bullets(&self) -> &[Projectile] {
        match &self.kind {
            EnemyKind::Chaser => &[],
            EnemyKind::Shooter { bullets, .. } => bullets,
        }
    }
}

/// A drifting meteor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meteor {
    pub id: u32,
    pub pos: Vec2,
    /// Unit travel direction
    pub dir: Vec2,
    pub speed: f32,
    pub size: f32,
    /// Carried for parity with other bodies; meteors die by contact only
    pub health: i32,
    /// Sprite rotation in degrees (cosmetic)
    pub rotation: f32,
    pub spin: f32,
}

impl Meteor {
    pub fn new(id: u32, pos: Vec2, dir: Vec2, speed: f32, rotation: f32, spin: f32) -> Self {
        Self {
            id,
            pos,
            dir,
            speed,
            size: METEOR_SIZE,
            health: METEOR_HEALTH,
            rotation,
            spin,
        }
    }

    pub fn advance(&mut self) {
        self.pos += self.dir * self.speed;
        self.rotation += self.spin;
    }

    #[inline]
    pub fn collision_radius(&self) -> f32 {
        self.size / 2.0
    }

    /// Circle test against an object of the given radius
    #[inline]
    pub fn check_collision(&self, point: Vec2, radius: f32) -> bool {
        self.pos.distance(point) < self.collision_radius() + radius
    }

    pub fn is_out_of_bounds(&self, tuning: &Tuning) -> bool {
        let margin = tuning.meteor_out_of_bounds_margin;
        self.pos.x < -margin
            || self.pos.x > tuning.arena_width + margin
            || self.pos.y < -margin
            || self.pos.y > tuning.arena_height + margin
    }
}

/// Cosmetic blast left behind by a kill
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Explosion {
    pub pos: Vec2,
    /// Ticks remaining
    pub frames: u32,
}

impl Explosion {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            frames: EXPLOSION_FRAMES,
        }
    }

    /// Count down one tick; returns false once expired
    pub fn update(&mut self) -> bool {
        self.frames = self.frames.saturating_sub(1);
        self.frames > 0
    }

    fn elapsed(&self) -> u32 {
        EXPLOSION_FRAMES.saturating_sub(self.frames)
    }

    /// Render radius, growing as the blast ages
    pub fn radius(&self) -> f32 {
        (self.elapsed() * 3) as f32
    }

    /// Palette index: 0 orange, 1 red-orange, 2 red
    pub fn color_index(&self) -> u8 {
        (self.elapsed() / 5).min(2) as u8
    }
}
