//! Read-only views of the world for renderers
//!
//! The simulation never draws. Hosts pull a `Snapshot` after ticking and
//! render from it (natively, or as JSON across the wasm boundary).

use glam::Vec2;
use serde::Serialize;

use super::entities::EnemyKind;
use super::state::{GamePhase, GameState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyVariant {
    Chaser,
    Shooter,
}

#[derive(Debug, Clone, Serialize)]
pub struct ShipView {
    pub pos: Vec2,
    pub angle: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct EnemyView {
    pub id: u32,
    pub pos: Vec2,
    pub variant: EnemyVariant,
    pub frame: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct MeteorView {
    pub id: u32,
    pub pos: Vec2,
    pub rotation: f32,
    pub size: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExplosionView {
    pub pos: Vec2,
    pub radius: f32,
    pub color_index: u8,
}

/// Everything a frame needs to draw
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub tick: u64,
    pub health: i32,
    pub score: u64,
    /// Background scroll
    pub camera_offset: Vec2,
    pub player: ShipView,
    pub player_bullets: Vec<Vec2>,
    pub enemy_bullets: Vec<Vec2>,
    pub enemies: Vec<EnemyView>,
    pub meteors: Vec<MeteorView>,
    pub explosions: Vec<ExplosionView>,
}

impl GameState {
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            tick: self.time_ticks,
            health: self.player.health,
            score: self.player.score,
            camera_offset: self.camera_offset,
            player: ShipView {
                pos: self.player.pos,
                angle: self.player.angle,
            },
            player_bullets: self.player.bullets.iter().map(|b| b.pos).collect(),
            enemy_bullets: self
                .enemies
                .iter()
                .flat_map(|e| e.bullets().iter().map(|b| b.pos))
                .collect(),
            enemies: self
                .enemies
                .iter()
                .map(|e| EnemyView {
                    id: e.id,
                    pos: e.pos,
                    variant: match e.kind {
                        EnemyKind::Chaser => EnemyVariant::Chaser,
                        EnemyKind::Shooter { .. } => EnemyVariant::Shooter,
                    },
                    frame: e.anim_frame,
                })
                .collect(),
            meteors: self
                .meteors
                .iter()
                .map(|m| MeteorView {
                    id: m.id,
                    pos: m.pos,
                    rotation: m.rotation,
                    size: m.size,
                })
                .collect(),
            explosions: self
                .explosions
                .iter()
                .map(|x| ExplosionView {
                    pos: x.pos,
                    radius: x.radius(),
                    color_index: x.color_index(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entities::Enemy;

    #[test]
    fn test_snapshot_mirrors_state() {
        let mut state = GameState::new(3);
        let id = state.next_entity_id();
        let shooter = Enemy::shooter(id, Vec2::new(10.0, 10.0), &state.tuning);
        state.enemies.push(shooter);
        state.spawn_explosion(Vec2::new(5.0, 5.0));

        let snap = state.snapshot();
        assert_eq!(snap.health, 5);
        assert_eq!(snap.enemies.len(), 1);
        assert_eq!(snap.enemies[0].variant, EnemyVariant::Shooter);
        assert_eq!(snap.explosions[0].radius, 0.0);
        assert_eq!(snap.player.pos, Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = GameState::new(3);
        let json = serde_json::to_string(&state.snapshot()).unwrap();
        assert!(json.contains("\"phase\":\"Running\""));
        assert!(json.contains("\"score\":0"));
    }
}
