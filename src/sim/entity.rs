//! Field entities
//!
//! The four occupants of the entity collection (player, grid enemy, boss,
//! crate) form a closed sum type. Projectiles are their own type and live in
//! a separate collection, so entity-vs-entity sweeps can never see one.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use super::events::FieldEvent;
use super::input::InputIntent;
use super::tracker::Tracker;
use crate::consts::*;

pub type EntityId = u32;

/// Hands out entity ids in construction order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdGen {
    next: EntityId,
}

impl Default for IdGen {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl IdGen {
    pub fn next_id(&mut self) -> EntityId {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// Who fired a projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Owner {
    Player,
    Enemy,
}

/// Role tag for entities in the mixed collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Player,
    GridEnemy,
    Boss,
    Block,
}

/// How something was struck
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Hit by a projectile
    Shot,
    /// Physically touched by another entity
    Touch,
}

/// Anything with a collision box
pub trait Bounded {
    fn bounds(&self) -> Aabb;
    fn is_removed(&self) -> bool;
}

/// State shared by every entity and projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub id: EntityId,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Set when the entity should be swept at the end of the frame
    pub removed: bool,
}

impl Body {
    pub fn new(id: EntityId, pos: Vec2, size: Vec2) -> Self {
        Self {
            id,
            pos,
            size,
            removed: false,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// Output side of `create_projectile`: new projectiles and their events
pub struct Spawner<'a, R: Rng + ?Sized> {
    pub rng: &'a mut R,
    pub ids: &'a mut IdGen,
    pub out: &'a mut Vec<Projectile>,
    pub events: &'a mut Vec<FieldEvent>,
}

impl<R: Rng + ?Sized> Spawner<'_, R> {
    fn fire(&mut self, shooter: Vec2, owner: Owner) {
        let projectile = Projectile::new(self.ids.next_id(), shooter, owner);
        log::debug!("{:?} projectile {} at {:?}", owner, projectile.body.id, projectile.body.pos);
        self.events.push(FieldEvent::ProjectileFired {
            owner,
            pos: projectile.body.pos,
        });
        self.out.push(projectile);
    }
}

/// Where the player (re)appears
pub fn player_spawn() -> Vec2 {
    Vec2::new(
        WINDOW_WIDTH / 2.0 - PLAYER_WIDTH / 2.0,
        WINDOW_HEIGHT - PLAYER_HEIGHT * 2.0,
    )
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    /// False once the player has lost the round
    pub alive: bool,
    /// Run energy, always within [0, MAX_ENERGY]
    energy: f32,
    /// Time since the last energy point came back
    energy_delay: f32,
    /// Time since the last shot
    pub shot_delay: f32,
    /// Seconds of hit stun left
    pub stun: f32,
}

impl Player {
    pub fn new(id: EntityId) -> Self {
        Self {
            body: Body::new(id, player_spawn(), Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT)),
            alive: true,
            energy: MAX_ENERGY,
            energy_delay: 0.0,
            shot_delay: 0.0,
            stun: 0.0,
        }
    }

    pub fn energy(&self) -> f32 {
        self.energy
    }

    pub fn set_energy(&mut self, energy: f32) {
        self.energy = energy.clamp(0.0, MAX_ENERGY);
    }

    pub fn is_stunned(&self) -> bool {
        self.stun > 0.0
    }

    pub fn update(&mut self, dt: f32, input: &InputIntent) {
        self.shot_delay += dt;
        self.energy_delay += dt;

        let stunned = self.is_stunned();
        self.stun = (self.stun - dt).max(0.0);

        let mut speed = PLAYER_SPEED;
        let running = !stunned && input.run && input.is_moving() && self.energy > 0.0;
        if running {
            speed *= RUN_MULTIPLIER;
            self.energy = (self.energy - ENERGY_DRAIN_RATE * dt).max(0.0);
        } else if self.energy_delay >= ENERGY_REGEN_INTERVAL && self.energy < MAX_ENERGY {
            self.energy = (self.energy + 1.0).min(MAX_ENERGY);
            self.energy_delay = 0.0;
        }

        if !stunned {
            self.body.pos.x += input.direction() * speed * dt;
        }
        self.body.pos.x = self.body.pos.x.clamp(LEFT_BORDER, RIGHT_BORDER);
    }

    pub fn create_projectile<R: Rng + ?Sized>(
        &mut self,
        input: &InputIntent,
        spawner: &mut Spawner<'_, R>,
    ) {
        if input.shoot && self.shot_delay >= PLAYER_SHOT_COOLDOWN {
            spawner.fire(self.body.pos, Owner::Player);
            self.shot_delay = 0.0;
        }
    }

    pub fn handle_collision(
        &mut self,
        contact: Contact,
        tracker: &mut Tracker,
        events: &mut Vec<FieldEvent>,
    ) {
        if !self.alive || self.is_stunned() {
            return;
        }

        let lives = tracker.update_lives(-1);
        if lives >= 1 && contact == Contact::Shot {
            self.body.pos.x = player_spawn().x;
            self.stun = PLAYER_STUN_SECS;
            log::info!("Player hit, {} lives left", lives);
            events.push(FieldEvent::PlayerHit { lives_left: lives });
        } else {
            self.alive = false;
            log::info!("Player killed ({:?})", contact);
            events.push(FieldEvent::PlayerKilled);
        }
    }
}

/// One member of the swarm
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridEnemy {
    pub body: Body,
    /// Formation row, 1-4 (selects the sprite)
    pub row: u8,
    /// Y the enemy descends to before patrolling
    pub entry_y: f32,
    /// +1 right, -1 left
    pub direction: f32,
    pub move_delay: f32,
    pub shot_delay: f32,
    pub turn_delay: f32,
}

impl GridEnemy {
    /// `y` is the entry row; the enemy starts above it and descends.
    pub fn new(id: EntityId, x: f32, y: f32, row: u8) -> Self {
        Self {
            body: Body::new(
                id,
                Vec2::new(x, y - ENEMY_ENTRY_OFFSET),
                Vec2::new(ENEMY_WIDTH, ENEMY_HEIGHT),
            ),
            row,
            entry_y: y,
            direction: 1.0,
            move_delay: 0.0,
            shot_delay: 0.0,
            turn_delay: 0.0,
        }
    }

    pub fn is_entering(&self) -> bool {
        self.body.pos.y <= self.entry_y
    }

    pub fn update(&mut self, dt: f32, events: &mut Vec<FieldEvent>) {
        self.move_delay += dt;
        self.shot_delay += dt;
        self.turn_delay += dt;

        if self.is_entering() && self.move_delay >= ENEMY_ENTRY_TICK {
            self.body.pos.y += ENEMY_ENTRY_STEP;
            self.move_delay = 0.0;
        } else if self.move_delay >= ENEMY_PATROL_TICK {
            self.body.pos.x += self.direction * ENEMY_PATROL_STEP;
            self.move_delay = 0.0;
        }

        let x = self.body.pos.x;
        if (x >= RIGHT_BORDER || x <= LEFT_BORDER) && self.turn_delay >= ENEMY_TURN_COOLDOWN {
            events.push(FieldEvent::BorderHit { id: self.body.id });
            self.turn_delay = 0.0;
        }

        if self.body.pos.y > WINDOW_HEIGHT {
            events.push(FieldEvent::BottomBreached { id: self.body.id });
        }
    }

    /// `armed` is set for front-line enemies only; a due shot fires with
    /// a one-in-`ENEMY_FIRE_ODDS` chance.
    pub fn create_projectile<R: Rng + ?Sized>(&mut self, armed: bool, spawner: &mut Spawner<'_, R>) {
        if !armed || self.shot_delay <= ENEMY_SHOT_COOLDOWN {
            return;
        }
        if spawner.rng.random_ratio(1, ENEMY_FIRE_ODDS) {
            spawner.fire(self.body.pos, Owner::Enemy);
        }
        self.shot_delay = 0.0;
    }

    pub fn change_direction(&mut self) {
        self.direction = -self.direction;
        self.body.pos.y += ENEMY_DROP_ON_TURN;
    }

    pub fn handle_collision(
        &mut self,
        contact: Contact,
        tracker: &mut Tracker,
        events: &mut Vec<FieldEvent>,
    ) {
        if contact == Contact::Shot {
            tracker.add_score(ENEMY_POINTS);
            self.body.removed = true;
            events.push(FieldEvent::EnemyDestroyed {
                id: self.body.id,
                points: ENEMY_POINTS,
            });
        }
    }
}

/// The large enemy that crosses the top of the field every cycle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BossEnemy {
    pub body: Body,
    pub health: u8,
    /// Seconds into the current cycle
    pub cycle: f32,
    /// Sprite scale; shrinks after the first hit
    pub scale: f32,
}

impl BossEnemy {
    pub fn new(id: EntityId) -> Self {
        Self {
            body: Body::new(
                id,
                Vec2::new(BOSS_START_X, BOSS_START_Y),
                Vec2::new(BOSS_TEXTURE_WIDTH, BOSS_TEXTURE_HEIGHT) * BOSS_SCALE,
            ),
            health: BOSS_HEALTH,
            cycle: 0.0,
            scale: BOSS_SCALE,
        }
    }

    pub fn is_crossing(&self) -> bool {
        self.cycle >= BOSS_INTERVAL
    }

    pub fn update(&mut self, dt: f32, events: &mut Vec<FieldEvent>) {
        self.cycle += dt;
        if !self.is_crossing() {
            return;
        }

        self.body.pos.x += BOSS_SPEED * dt;
        if self.body.pos.x >= WINDOW_WIDTH {
            events.push(FieldEvent::BossExited { id: self.body.id });
            self.cycle = 0.0;
        }
    }

    pub fn handle_collision(
        &mut self,
        contact: Contact,
        tracker: &mut Tracker,
        events: &mut Vec<FieldEvent>,
    ) {
        if contact != Contact::Shot || self.body.removed {
            return;
        }

        if self.health <= 1 {
            self.health = 0;
            tracker.update_lives(1);
            tracker.add_score(BOSS_POINTS);
            self.body.removed = true;
            log::info!("Boss {} destroyed", self.body.id);
            events.push(FieldEvent::BossDestroyed {
                id: self.body.id,
                points: BOSS_POINTS,
            });
        } else {
            self.health -= 1;
            self.scale = BOSS_DAMAGED_SCALE;
            self.body.size = Vec2::new(BOSS_TEXTURE_WIDTH, BOSS_TEXTURE_HEIGHT) * self.scale;
            events.push(FieldEvent::BossDamaged { id: self.body.id });
        }
    }
}

/// Appearance of a crate for its remaining health
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockStage {
    Intact,
    Cracked,
    Crumbling,
}

/// A destructible crate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub body: Body,
    pub health: u8,
}

impl Block {
    pub fn new(id: EntityId, x: f32, y: f32) -> Self {
        Self {
            body: Body::new(id, Vec2::new(x, y), Vec2::splat(BLOCK_SIZE)),
            health: BLOCK_HEALTH,
        }
    }

    pub fn stage(&self) -> BlockStage {
        match self.health {
            3.. => BlockStage::Intact,
            2 => BlockStage::Cracked,
            _ => BlockStage::Crumbling,
        }
    }

    pub fn handle_collision(&mut self, contact: Contact, events: &mut Vec<FieldEvent>) {
        if contact != Contact::Shot || self.body.removed {
            return;
        }

        self.health = self.health.saturating_sub(1);
        if self.health == 0 {
            self.body.removed = true;
            events.push(FieldEvent::BlockDestroyed { id: self.body.id });
        } else {
            events.push(FieldEvent::BlockDamaged {
                id: self.body.id,
                health: self.health,
            });
        }
    }
}

/// A shot travelling straight up (player) or down (enemy)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub body: Body,
    pub owner: Owner,
}

impl Projectile {
    pub fn new(id: EntityId, shooter: Vec2, owner: Owner) -> Self {
        let offset = match owner {
            Owner::Player => -PROJECTILE_SPAWN_OFFSET,
            Owner::Enemy => PROJECTILE_SPAWN_OFFSET,
        };
        Self {
            body: Body::new(
                id,
                shooter + Vec2::new(0.0, offset),
                Vec2::new(PROJECTILE_WIDTH, PROJECTILE_HEIGHT),
            ),
            owner,
        }
    }

    /// Signed vertical velocity in pixels per second
    pub fn velocity(&self) -> f32 {
        match self.owner {
            Owner::Player => -PLAYER_PROJECTILE_SPEED,
            Owner::Enemy => ENEMY_PROJECTILE_SPEED,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.body.pos.y += self.velocity() * dt;
        let y = self.body.pos.y;
        if !(0.0..=PROJECTILE_CULL_Y).contains(&y) {
            self.body.removed = true;
        }
    }

    pub fn handle_collision(&mut self) {
        self.body.removed = true;
    }
}

impl Bounded for Projectile {
    fn bounds(&self) -> Aabb {
        self.body.bounds()
    }

    fn is_removed(&self) -> bool {
        self.body.removed
    }
}

/// An occupant of the field's entity collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Entity {
    Player(Player),
    GridEnemy(GridEnemy),
    Boss(BossEnemy),
    Block(Block),
}

impl Entity {
    pub fn body(&self) -> &Body {
        match self {
            Entity::Player(p) => &p.body,
            Entity::GridEnemy(e) => &e.body,
            Entity::Boss(b) => &b.body,
            Entity::Block(b) => &b.body,
        }
    }

    pub fn body_mut(&mut self) -> &mut Body {
        match self {
            Entity::Player(p) => &mut p.body,
            Entity::GridEnemy(e) => &mut e.body,
            Entity::Boss(b) => &mut b.body,
            Entity::Block(b) => &mut b.body,
        }
    }

    pub fn id(&self) -> EntityId {
        self.body().id
    }

    pub fn pos(&self) -> Vec2 {
        self.body().pos
    }

    pub fn category(&self) -> Category {
        match self {
            Entity::Player(_) => Category::Player,
            Entity::GridEnemy(_) => Category::GridEnemy,
            Entity::Boss(_) => Category::Boss,
            Entity::Block(_) => Category::Block,
        }
    }

    pub fn is_player_controlled(&self) -> bool {
        matches!(self, Entity::Player(_))
    }

    /// Only the player can die; everything else is simply removed.
    pub fn is_alive(&self) -> bool {
        match self {
            Entity::Player(p) => p.alive,
            _ => true,
        }
    }

    pub fn update(&mut self, dt: f32, input: &InputIntent, events: &mut Vec<FieldEvent>) {
        match self {
            Entity::Player(p) => p.update(dt, input),
            Entity::GridEnemy(e) => e.update(dt, events),
            Entity::Boss(b) => b.update(dt, events),
            Entity::Block(_) => {}
        }
    }

    pub fn create_projectile<R: Rng + ?Sized>(
        &mut self,
        input: &InputIntent,
        armed: bool,
        spawner: &mut Spawner<'_, R>,
    ) {
        match self {
            Entity::Player(p) => p.create_projectile(input, spawner),
            Entity::GridEnemy(e) => e.create_projectile(armed, spawner),
            Entity::Boss(_) | Entity::Block(_) => {}
        }
    }

    pub fn change_direction(&mut self) {
        if let Entity::GridEnemy(e) = self {
            e.change_direction();
        }
    }

    pub fn handle_collision(
        &mut self,
        contact: Contact,
        tracker: &mut Tracker,
        events: &mut Vec<FieldEvent>,
    ) {
        match self {
            Entity::Player(p) => p.handle_collision(contact, tracker, events),
            Entity::GridEnemy(e) => e.handle_collision(contact, tracker, events),
            Entity::Boss(b) => b.handle_collision(contact, tracker, events),
            Entity::Block(b) => b.handle_collision(contact, events),
        }
    }
}

impl Bounded for Entity {
    fn bounds(&self) -> Aabb {
        self.body().bounds()
    }

    fn is_removed(&self) -> bool {
        self.body().removed
    }
}
