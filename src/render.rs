//! Draw list for an external renderer
//!
//! Read-only view of the field: one `DrawItem` per visible entity or
//! projectile plus a `Hud` snapshot. Nothing here produces pixels.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::MAX_ENERGY;
use crate::sim::{BlockStage, Entity, EntityId, Field, Owner};

/// What to draw, including its current visual state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpriteKind {
    Player { stunned: bool },
    /// Swarm member; the row picks the sprite
    Enemy { row: u8 },
    Boss,
    Crate(BlockStage),
    PlayerProjectile,
    EnemyProjectile,
}

impl SpriteKind {
    /// Texture path under the asset root
    pub fn texture(&self) -> &'static str {
        match self {
            SpriteKind::Player { .. } => "sprites/player.png",
            SpriteKind::Enemy { row } => match row {
                1 => "sprites/enemy1.png",
                2 => "sprites/enemy2.png",
                3 => "sprites/enemy3.png",
                _ => "sprites/enemy4.png",
            },
            SpriteKind::Boss => "sprites/boss_enemy.png",
            SpriteKind::Crate(BlockStage::Intact) => "sprites/crate.png",
            SpriteKind::Crate(BlockStage::Cracked) => "sprites/crate_broken.png",
            SpriteKind::Crate(BlockStage::Crumbling) => "sprites/crate_broken2.png",
            SpriteKind::PlayerProjectile => "sprites/player_projectile.gif",
            SpriteKind::EnemyProjectile => "sprites/enemy_projectile.gif",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawItem {
    pub id: EntityId,
    pub kind: SpriteKind,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Texture scale (the boss shrinks when damaged)
    pub scale: f32,
}

/// HUD strip contents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hud {
    pub score_text: String,
    pub lives_text: String,
    /// Hearts to draw
    pub lives: u8,
    /// Run energy as a fraction of the maximum
    pub energy: f32,
    pub fps_text: Option<String>,
}

/// Draw calls for one frame: entities in insertion order, then projectiles.
/// Entities flagged for removal are skipped.
pub fn build_draw_list(field: &Field) -> Vec<DrawItem> {
    let entities = field
        .entities
        .iter()
        .filter(|e| !e.body().removed)
        .map(|entity| {
            let body = entity.body();
            let (kind, scale) = match entity {
                Entity::Player(p) => (
                    SpriteKind::Player {
                        stunned: p.is_stunned(),
                    },
                    1.0,
                ),
                Entity::GridEnemy(e) => (SpriteKind::Enemy { row: e.row }, 1.0),
                Entity::Boss(b) => (SpriteKind::Boss, b.scale),
                Entity::Block(b) => (SpriteKind::Crate(b.stage()), 1.0),
            };
            DrawItem {
                id: body.id,
                kind,
                pos: body.pos,
                size: body.size,
                scale,
            }
        });

    let projectiles = field
        .projectiles
        .iter()
        .filter(|p| !p.body.removed)
        .map(|p| DrawItem {
            id: p.body.id,
            kind: match p.owner {
                Owner::Player => SpriteKind::PlayerProjectile,
                Owner::Enemy => SpriteKind::EnemyProjectile,
            },
            pos: p.body.pos,
            size: p.body.size,
            scale: 1.0,
        });

    entities.chain(projectiles).collect()
}

pub fn build_hud(field: &Field, show_fps: bool) -> Hud {
    let energy = field.player().map(|p| p.energy()).unwrap_or_default();
    Hud {
        score_text: field.tracker.score_text().to_string(),
        lives_text: field.tracker.lives_text().to_string(),
        lives: field.tracker.lives(),
        energy: energy / MAX_ENERGY,
        fps_text: show_fps.then(|| field.fps().text()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Contact;

    #[test]
    fn test_draw_list_covers_every_entity() {
        let mut field = Field::new(3);
        field.spawn_projectile(Vec2::new(300.0, 400.0), Owner::Enemy);

        let items = build_draw_list(&field);

        assert_eq!(items.len(), field.entities.len() + 1);
        assert_eq!(items[0].kind, SpriteKind::Player { stunned: false });
        assert_eq!(items[1].kind, SpriteKind::Boss);
        assert!((items[1].scale - 0.7).abs() < 1e-6);
        assert_eq!(items[2].kind, SpriteKind::Enemy { row: 1 });
        assert_eq!(items.last().map(|i| i.kind), Some(SpriteKind::EnemyProjectile));
    }

    #[test]
    fn test_crate_stage_follows_health() {
        let mut field = Field::new(3);
        let mut events = Vec::new();
        let index = field
            .entities
            .iter()
            .position(|e| matches!(e, Entity::Block(_)))
            .unwrap();
        if let Entity::Block(block) = &mut field.entities[index] {
            block.handle_collision(Contact::Shot, &mut events);
        }

        let items = build_draw_list(&field);
        assert_eq!(items[index].kind, SpriteKind::Crate(BlockStage::Cracked));
        assert_eq!(items[index].kind.texture(), "sprites/crate_broken.png");
    }

    #[test]
    fn test_enemy_rows_pick_sprites() {
        assert_eq!(SpriteKind::Enemy { row: 1 }.texture(), "sprites/enemy1.png");
        assert_eq!(SpriteKind::Enemy { row: 4 }.texture(), "sprites/enemy4.png");
    }

    #[test]
    fn test_hud_snapshot() {
        let field = Field::new(3);
        let hud = build_hud(&field, false);
        assert_eq!(hud.score_text, "SCORE: 0");
        assert_eq!(hud.lives_text, "LIVES: 3");
        assert_eq!(hud.energy, 1.0);
        assert_eq!(hud.fps_text, None);

        let hud = build_hud(&field, true);
        assert_eq!(hud.fps_text.as_deref(), Some("FPS: 0"));
    }
}
