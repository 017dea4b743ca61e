//! Gameplay field
//!
//! All gameplay logic lives here. Nothing in this module renders, plays sound
//! or touches the filesystem:
//! - Wall-clock `dt` per frame, supplied by the caller
//! - Seeded RNG only
//! - Stable iteration order (insertion order of entities and projectiles)

pub mod aabb;
pub mod collision;
pub mod entity;
pub mod events;
pub mod field;
pub mod input;
pub mod tracker;

pub use aabb::Aabb;
pub use collision::{CollisionReport, resolve};
pub use entity::{
    Block, BlockStage, BossEnemy, Bounded, Category, Contact, Entity, EntityId, GridEnemy, Owner,
    Player, Projectile,
};
pub use events::FieldEvent;
pub use field::{Field, FieldStatus, FpsCounter, FrameReport, front_line};
pub use input::{Autopilot, InputIntent, Key};
pub use tracker::Tracker;
