//! Field controller
//!
//! Owns every entity and projectile and advances them one wall-clock frame at
//! a time:
//!
//! 1. advance projectiles, drop the ones that left the field
//! 2. advance entities and collect their projectiles
//! 3. reverse the whole swarm if any member hit a border
//! 4. replace a boss that left the field
//! 5. spawn a new swarm when the last grid enemy is gone
//! 6. pick next frame's shooters (front line of each column)
//! 7. sweep removed entities
//! 8. resolve collisions, detect loss
//! 9. refresh the score/lives HUD

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision;
use super::entity::{
    Block, BossEnemy, Bounded, Category, Entity, EntityId, GridEnemy, IdGen, Owner, Player,
    Projectile, Spawner,
};
use super::events::FieldEvent;
use super::input::InputIntent;
use super::tracker::Tracker;
use crate::consts::*;

/// Whether the round is still going
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldStatus {
    Running,
    /// The player died or the swarm reached the bottom
    Lost,
}

/// What one call to `Field::update` produced
#[derive(Debug, Clone)]
pub struct FrameReport {
    pub status: FieldStatus,
    pub events: Vec<FieldEvent>,
}

/// Frames-per-second meter, recomputed once per accumulated second
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FpsCounter {
    elapsed_ms: f32,
    frames: u32,
    fps: u32,
}

impl FpsCounter {
    pub fn tick(&mut self, dt: f32) {
        self.elapsed_ms += dt * 1000.0;
        self.frames += 1;

        if self.elapsed_ms >= 1000.0 {
            self.fps = (self.frames as f32 / (self.elapsed_ms / 1000.0)) as u32;
            self.frames = 0;
            self.elapsed_ms = 0.0;
        }
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn text(&self) -> String {
        format!("FPS: {}", self.fps)
    }
}

/// The active gameplay state
#[derive(Debug, Clone)]
pub struct Field {
    /// Player, boss, swarm and crates in insertion order
    pub entities: Vec<Entity>,
    /// Live projectiles in firing order
    pub projectiles: Vec<Projectile>,
    pub tracker: Tracker,
    ids: IdGen,
    rng: Pcg32,
    seed: u64,
    /// Entities allowed to fire on the next frame
    shooters: Vec<EntityId>,
    fps: FpsCounter,
    /// Seconds of play so far
    pub time: f32,
    pub waves: u32,
    status: FieldStatus,
}

impl Field {
    /// Build the opening layout: player, boss, first swarm, crates.
    pub fn new(seed: u64) -> Self {
        let mut field = Self {
            entities: Vec::new(),
            projectiles: Vec::new(),
            tracker: Tracker::new(),
            ids: IdGen::default(),
            rng: Pcg32::seed_from_u64(seed),
            seed,
            shooters: Vec::new(),
            fps: FpsCounter::default(),
            time: 0.0,
            waves: 0,
            status: FieldStatus::Running,
        };

        let player = Player::new(field.ids.next_id());
        field.entities.push(Entity::Player(player));
        let boss = BossEnemy::new(field.ids.next_id());
        field.entities.push(Entity::Boss(boss));
        field.make_enemies();
        field.make_blocks();

        log::info!(
            "Field ready (seed {}): {} entities",
            seed,
            field.entities.len()
        );
        field
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn status(&self) -> FieldStatus {
        self.status
    }

    pub fn is_lost(&self) -> bool {
        self.status == FieldStatus::Lost
    }

    pub fn score(&self) -> u64 {
        self.tracker.score()
    }

    pub fn fps(&self) -> &FpsCounter {
        &self.fps
    }

    /// Ids flagged to fire on the next frame
    pub fn shooters(&self) -> &[EntityId] {
        &self.shooters
    }

    pub fn player(&self) -> Option<&Player> {
        self.entities.iter().find_map(|e| match e {
            Entity::Player(p) => Some(p),
            _ => None,
        })
    }

    pub fn player_mut(&mut self) -> Option<&mut Player> {
        self.entities.iter_mut().find_map(|e| match e {
            Entity::Player(p) => Some(p),
            _ => None,
        })
    }

    /// Live entities of one category
    pub fn count(&self, category: Category) -> usize {
        self.entities
            .iter()
            .filter(|e| e.category() == category && !e.is_removed())
            .count()
    }

    /// Append a full swarm: `GRID_COLUMNS` x `GRID_ROWS`, column by column,
    /// each enemy starting above its entry row.
    pub fn make_enemies(&mut self) {
        for column in 0..GRID_COLUMNS {
            for row in 0..GRID_ROWS {
                let x = (column + 1) as f32 * GRID_COLUMN_SPACING + GRID_X_OFFSET;
                let y = GRID_TOP + row as f32 * GRID_ROW_SPACING;
                let enemy = GridEnemy::new(self.ids.next_id(), x, y, row as u8 + 1);
                self.entities.push(Entity::GridEnemy(enemy));
            }
        }
        self.waves += 1;
        log::info!("Wave {} spawned", self.waves);
    }

    /// Append the crate batches protecting the player
    pub fn make_blocks(&mut self) {
        let step = (WINDOW_WIDTH - 2.0 * BLOCK_START_X - BLOCK_SIZE * BLOCK_COLUMNS as f32)
            / (BLOCK_BATCHES - 1) as f32;

        for batch in 0..BLOCK_BATCHES {
            let left = BLOCK_START_X + batch as f32 * step;
            for row in 0..BLOCK_ROWS {
                for column in 0..BLOCK_COLUMNS {
                    let block = Block::new(
                        self.ids.next_id(),
                        left + BLOCK_SIZE * column as f32,
                        BLOCK_TOP + BLOCK_SIZE * row as f32,
                    );
                    self.entities.push(Entity::Block(block));
                }
            }
        }
    }

    /// Advance one frame of `dt` seconds.
    pub fn update(&mut self, dt: f32, input: &InputIntent) -> FrameReport {
        let mut events = Vec::new();
        if self.is_lost() {
            return FrameReport {
                status: self.status,
                events,
            };
        }

        self.time += dt;
        self.fps.tick(dt);

        // 1. Projectiles
        for projectile in &mut self.projectiles {
            projectile.update(dt);
        }
        self.projectiles.retain(|p| !p.is_removed());

        // 2. Entities and their shots
        let shooters = std::mem::take(&mut self.shooters);
        {
            let mut spawner = Spawner {
                rng: &mut self.rng,
                ids: &mut self.ids,
                out: &mut self.projectiles,
                events: &mut events,
            };
            for entity in self.entities.iter_mut().filter(|e| !e.is_removed()) {
                entity.update(dt, input, spawner.events);
                let armed = shooters.contains(&entity.id());
                entity.create_projectile(input, armed, &mut spawner);
            }
        }

        // 3. Swarm reversal
        if events
            .iter()
            .any(|e| matches!(e, FieldEvent::BorderHit { .. }))
        {
            log::debug!("Swarm reverses at t={:.2}", self.time);
            for entity in &mut self.entities {
                entity.change_direction();
            }
        }

        // 4. Boss replacement
        let exited: Vec<EntityId> = events
            .iter()
            .filter_map(|e| match e {
                FieldEvent::BossExited { id } => Some(*id),
                _ => None,
            })
            .collect();
        for old_id in exited {
            if let Some(slot) = self.entities.iter_mut().find(|e| e.id() == old_id) {
                let boss = BossEnemy::new(self.ids.next_id());
                log::info!("Boss {} left the field, boss {} takes its place", old_id, boss.body.id);
                events.push(FieldEvent::BossSpawned { id: boss.body.id });
                *slot = Entity::Boss(boss);
            }
        }

        // 5. New swarm
        if self.count(Category::GridEnemy) == 0 {
            self.make_enemies();
            events.push(FieldEvent::WaveSpawned {
                count: GRID_COLUMNS * GRID_ROWS,
            });
        }

        // 6. Next frame's shooters
        self.shooters = front_line(&self.entities);

        // 7. Sweep
        self.entities.retain(|e| !e.is_removed());

        // 8. Collisions
        let report = collision::resolve(
            &mut self.entities,
            &mut self.projectiles,
            &mut self.tracker,
            &mut events,
        );
        if report.death || events.iter().any(FieldEvent::is_terminal) {
            log::info!(
                "Round lost at t={:.1}s with score {}",
                self.time,
                self.tracker.score()
            );
            self.status = FieldStatus::Lost;
        }

        // 9. HUD
        self.tracker.refresh();

        FrameReport {
            status: self.status,
            events,
        }
    }

    /// X the demo autopilot should walk to: the closest armed grid enemy
    pub fn autopilot_target(&self) -> Option<f32> {
        let player_x = self.player()?.body.pos.x;
        self.entities
            .iter()
            .filter(|e| e.category() == Category::GridEnemy && self.shooters.contains(&e.id()))
            .map(|e| e.pos().x)
            .min_by(|a, b| {
                (a - player_x)
                    .abs()
                    .partial_cmp(&(b - player_x).abs())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
    }

    /// Fire a projectile from `shooter` outside the normal cadence
    pub fn spawn_projectile(&mut self, shooter: glam::Vec2, owner: Owner) -> EntityId {
        let projectile = Projectile::new(self.ids.next_id(), shooter, owner);
        let id = projectile.body.id;
        self.projectiles.push(projectile);
        id
    }
}

/// Scan non-player entities in insertion order and flag the last one before
/// each change of x. With the swarm laid out column by column this is the
/// lowest enemy of each column. The scan works on adjacency, not true column
/// membership, so crates and the boss can be flagged too (they never fire)
/// and the last entity scanned is never flagged.
pub fn front_line(entities: &[Entity]) -> Vec<EntityId> {
    let mut shooters = Vec::new();
    let mut previous: Option<(EntityId, f32)> = None;

    for entity in entities
        .iter()
        .filter(|e| !e.is_player_controlled() && !e.is_removed())
    {
        let x = entity.pos().x;
        if let Some((prev_id, prev_x)) = previous {
            if x != prev_x {
                shooters.push(prev_id);
            }
        }
        previous = Some((entity.id(), x));
    }
    shooters
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn grid_enemies(field: &Field) -> Vec<&GridEnemy> {
        field
            .entities
            .iter()
            .filter_map(|e| match e {
                Entity::GridEnemy(g) => Some(g),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_opening_layout() {
        let field = Field::new(1);
        assert_eq!(field.count(Category::Player), 1);
        assert_eq!(field.count(Category::Boss), 1);
        assert_eq!(field.count(Category::GridEnemy), 48);
        assert_eq!(field.count(Category::Block), 36);
        assert!(matches!(field.entities[0], Entity::Player(_)));
        assert!(matches!(field.entities[1], Entity::Boss(_)));

        let mut ids: Vec<_> = field.entities.iter().map(|e| e.id()).collect();
        ids.dedup();
        assert_eq!(ids.len(), field.entities.len());
    }

    #[test]
    fn test_swarm_formula() {
        let field = Field::new(1);
        let enemies = grid_enemies(&field);
        assert_eq!(enemies[0].body.pos, Vec2::new(90.0, -100.0));
        assert_eq!(enemies[0].row, 1);
        assert_eq!(enemies[3].entry_y, 325.0);
        assert_eq!(enemies[3].row, 4);
        assert_eq!(enemies[4].body.pos.x, 140.0);
        assert_eq!(enemies[47].body.pos.x, 640.0);
    }

    #[test]
    fn test_block_batches() {
        let field = Field::new(1);
        let xs: Vec<f32> = field
            .entities
            .iter()
            .filter_map(|e| match e {
                Entity::Block(b) => Some(b.body.pos.x),
                _ => None,
            })
            .collect();
        assert_eq!(xs[0], 160.0);
        assert_eq!(xs[12], 452.0);
        assert_eq!(xs[24], 744.0);
    }

    #[test]
    fn test_wave_respawns_full_grid() {
        let mut field = Field::new(1);
        for entity in &mut field.entities {
            if entity.category() == Category::GridEnemy {
                entity.body_mut().removed = true;
            }
        }

        let report = field.update(0.01, &InputIntent::default());

        assert_eq!(field.count(Category::GridEnemy), GRID_COLUMNS * GRID_ROWS);
        assert_eq!(field.waves, 2);
        assert!(report.events.contains(&FieldEvent::WaveSpawned { count: 48 }));
        assert_eq!(report.status, FieldStatus::Running);
    }

    #[test]
    fn test_removed_entity_gone_next_frame() {
        let mut field = Field::new(1);
        let victim = field.entities[10].id();
        field.entities[10].body_mut().removed = true;

        field.update(0.01, &InputIntent::default());
        assert!(field.entities.iter().all(|e| e.id() != victim));
        assert!(!field.shooters().contains(&victim));
    }

    #[test]
    fn test_border_hit_reverses_whole_swarm() {
        let mut field = Field::new(1);
        let before: Vec<f32> = grid_enemies(&field).iter().map(|g| g.body.pos.y).collect();
        if let Entity::GridEnemy(first) = &mut field.entities[2] {
            first.body.pos.x = RIGHT_BORDER;
            first.turn_delay = ENEMY_TURN_COOLDOWN;
        }

        let report = field.update(0.01, &InputIntent::default());

        assert!(matches!(report.events[0], FieldEvent::BorderHit { .. }));
        let enemies = grid_enemies(&field);
        assert!(enemies.iter().all(|g| g.direction == -1.0));
        for (enemy, y) in enemies.iter().zip(before) {
            assert_eq!(enemy.body.pos.y, y + ENEMY_DROP_ON_TURN);
        }
    }

    #[test]
    fn test_exited_boss_is_replaced_in_place() {
        let mut field = Field::new(1);
        let old_id = field.entities[1].id();
        if let Entity::Boss(boss) = &mut field.entities[1] {
            boss.cycle = BOSS_INTERVAL;
            boss.body.pos.x = WINDOW_WIDTH - 0.5;
        }

        let report = field.update(0.01, &InputIntent::default());

        let Entity::Boss(boss) = &field.entities[1] else {
            panic!("boss slot holds {:?}", field.entities[1].category());
        };
        assert_ne!(boss.body.id, old_id);
        assert_eq!(boss.body.pos, Vec2::new(BOSS_START_X, BOSS_START_Y));
        assert_eq!(boss.cycle, 0.0);
        assert!(report
            .events
            .contains(&FieldEvent::BossSpawned { id: boss.body.id }));
    }

    #[test]
    fn test_front_line_flags_lowest_of_each_column() {
        let field = Field::new(1);
        let shooters = field.shooters().to_vec();
        assert!(shooters.is_empty());

        let flagged = front_line(&field.entities);
        let armed_enemies: Vec<&GridEnemy> = grid_enemies(&field)
            .into_iter()
            .filter(|g| flagged.contains(&g.body.id))
            .collect();

        assert_eq!(armed_enemies.len(), GRID_COLUMNS);
        assert!(armed_enemies.iter().all(|g| g.row == GRID_ROWS as u8));
        // The boss precedes the first column, so adjacency flags it as well
        assert!(flagged.contains(&field.entities[1].id()));
    }

    #[test]
    fn test_front_line_moves_up_when_bottom_enemy_dies() {
        let mut field = Field::new(1);
        // Column 0 is entities[2..6]; kill its bottom enemy
        let bottom = field.entities[5].id();
        let above = field.entities[4].id();
        field.entities[5].body_mut().removed = true;

        let flagged = front_line(&field.entities);
        assert!(!flagged.contains(&bottom));
        assert!(flagged.contains(&above));
    }

    #[test]
    fn test_player_shot_clears_enemy_in_pipeline() {
        let mut field = Field::new(1);
        let target = field.entities[5].pos();
        field.spawn_projectile(target + Vec2::new(0.0, PROJECTILE_SPAWN_OFFSET), Owner::Player);

        let report = field.update(0.0, &InputIntent::default());

        assert_eq!(field.score(), ENEMY_POINTS);
        assert_eq!(field.tracker.score_text(), "SCORE: 50");
        assert!(report
            .events
            .iter()
            .any(|e| matches!(e, FieldEvent::EnemyDestroyed { .. })));
        assert!(field.projectiles.is_empty() || field.projectiles.iter().all(|p| p.body.removed));

        field.update(0.0, &InputIntent::default());
        assert_eq!(field.count(Category::GridEnemy), 47);
    }

    #[test]
    fn test_player_death_loses_round() {
        let mut field = Field::new(1);
        field.tracker.update_lives(-2);
        let spawn = field.player().map(|p| p.body.pos).unwrap_or_default();
        field.spawn_projectile(spawn - Vec2::new(0.0, PROJECTILE_SPAWN_OFFSET), Owner::Enemy);

        let report = field.update(0.0, &InputIntent::default());

        assert_eq!(report.status, FieldStatus::Lost);
        assert!(field.is_lost());
        assert!(report.events.contains(&FieldEvent::PlayerKilled));

        // A lost field no longer advances
        let time = field.time;
        let report = field.update(0.5, &InputIntent::default());
        assert!(report.events.is_empty());
        assert_eq!(field.time, time);
    }

    #[test]
    fn test_swarm_at_bottom_loses_round() {
        let mut field = Field::new(1);
        if let Entity::GridEnemy(enemy) = &mut field.entities[2] {
            enemy.body.pos = Vec2::new(400.0, WINDOW_HEIGHT + 10.0);
        }

        let report = field.update(0.01, &InputIntent::default());
        assert_eq!(report.status, FieldStatus::Lost);
    }

    #[test]
    fn test_player_walks_and_fires_through_pipeline() {
        let mut field = Field::new(1);
        let input = InputIntent {
            right: true,
            shoot: true,
            ..Default::default()
        };
        let start_x = field.player().map(|p| p.body.pos.x).unwrap_or_default();

        let mut fired = 0;
        for _ in 0..12 {
            let report = field.update(0.1, &input);
            fired += report
                .events
                .iter()
                .filter(|e| matches!(e, FieldEvent::ProjectileFired { owner: Owner::Player, .. }))
                .count();
        }

        let x = field.player().map(|p| p.body.pos.x).unwrap_or_default();
        assert!((x - (start_x + 300.0)).abs() < 0.01);
        assert_eq!(fired, 1);
    }

    #[test]
    fn test_fps_counter() {
        let mut fps = FpsCounter::default();
        for _ in 0..59 {
            fps.tick(1.0 / 60.0);
        }
        assert_eq!(fps.fps(), 0);
        fps.tick(1.0 / 60.0 + 0.001);
        assert!((59..=60).contains(&fps.fps()));
        assert_eq!(fps.text(), format!("FPS: {}", fps.fps()));
    }

    #[test]
    fn test_same_seed_same_run() {
        let mut a = Field::new(42);
        let mut b = Field::new(42);
        let input = InputIntent {
            shoot: true,
            left: true,
            ..Default::default()
        };

        for _ in 0..600 {
            a.update(1.0 / 60.0, &input);
            b.update(1.0 / 60.0, &input);
        }

        assert_eq!(a.entities.len(), b.entities.len());
        assert_eq!(a.projectiles.len(), b.projectiles.len());
        assert_eq!(a.score(), b.score());
        assert_eq!(a.tracker.lives(), b.tracker.lives());
        for (x, y) in a.entities.iter().zip(&b.entities) {
            assert_eq!(x.pos(), y.pos());
        }
    }
}
