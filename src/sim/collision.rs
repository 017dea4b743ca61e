//! Collision resolution
//!
//! Three independent sweeps over axis-aligned boxes, split by relation so a
//! handler only learns *how* it was struck (`Contact::Shot` or
//! `Contact::Touch`), never *what* struck it:
//!
//! 1. projectile x entity
//! 2. entity x entity (ordered pairs, only the first entity reacts)
//! 3. projectile x projectile (ordered pairs, only the first reacts)
//!
//! Iteration order is projectiles in firing order and entities in insertion
//! order. Entities flagged `removed` earlier in the frame take no further part.

use super::entity::{Bounded, Contact, Entity, Projectile};
use super::events::FieldEvent;
use super::tracker::Tracker;

/// Result of running all three sweeps
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionReport {
    /// Number of overlapping pairs that were dispatched
    pub contacts: usize,
    /// An entity went from alive to not alive during the sweeps
    pub death: bool,
}

/// Run the three sweeps in order.
pub fn resolve(
    entities: &mut [Entity],
    projectiles: &mut [Projectile],
    tracker: &mut Tracker,
    events: &mut Vec<FieldEvent>,
) -> CollisionReport {
    let mut report = CollisionReport::default();
    projectiles_vs_entities(projectiles, entities, tracker, events, &mut report);
    entities_vs_entities(entities, tracker, events, &mut report);
    report.contacts += projectiles_vs_projectiles(projectiles);
    report
}

/// Every live projectile against every live entity. A projectile that
/// overlaps several entities strikes each of them.
pub fn projectiles_vs_entities(
    projectiles: &mut [Projectile],
    entities: &mut [Entity],
    tracker: &mut Tracker,
    events: &mut Vec<FieldEvent>,
    report: &mut CollisionReport,
) {
    for projectile in projectiles.iter_mut() {
        if projectile.is_removed() {
            continue;
        }
        let bounds = projectile.bounds();

        for entity in entities.iter_mut() {
            if entity.is_removed() || !bounds.intersects(&entity.bounds()) {
                continue;
            }

            let was_alive = entity.is_alive();
            entity.handle_collision(Contact::Shot, tracker, events);
            projectile.handle_collision();
            report.contacts += 1;

            if was_alive && !entity.is_alive() {
                report.death = true;
            }
        }
    }
}

/// Ordered pairs of distinct entities. Only the first of each pair reacts;
/// the reverse ordering gives the second its own turn.
pub fn entities_vs_entities(
    entities: &mut [Entity],
    tracker: &mut Tracker,
    events: &mut Vec<FieldEvent>,
    report: &mut CollisionReport,
) {
    for first in 0..entities.len() {
        for second in 0..entities.len() {
            if first == second {
                continue;
            }
            let touching = {
                let (a, b) = (&entities[first], &entities[second]);
                !a.is_removed() && !b.is_removed() && a.bounds().intersects(&b.bounds())
            };
            if !touching {
                continue;
            }

            let entity = &mut entities[first];
            let was_alive = entity.is_alive();
            entity.handle_collision(Contact::Touch, tracker, events);
            report.contacts += 1;

            if was_alive && !entity.is_alive() {
                report.death = true;
            }
        }
    }
}

/// Ordered pairs of distinct projectiles. Overlap is judged on the boxes as
/// they stood when the sweep began, so both members of an overlapping pair are
/// cancelled no matter which is visited first. Returns the number of pairs.
pub fn projectiles_vs_projectiles(projectiles: &mut [Projectile]) -> usize {
    let boxes: Vec<_> = projectiles.iter().map(|p| p.bounds()).collect();
    let mut contacts = 0;

    for (first, projectile) in projectiles.iter_mut().enumerate() {
        for (second, other) in boxes.iter().enumerate() {
            if first != second && boxes[first].intersects(other) {
                projectile.handle_collision();
                contacts += 1;
            }
        }
    }
    contacts
}
