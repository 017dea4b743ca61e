//! Axis-aligned bounding boxes
//!
//! Every entity and projectile exposes one of these for overlap tests.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle given by its top-left corner and extent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Top-left corner (screen coordinates, y grows downward)
    pub min: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    /// Bottom-right corner
    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    /// True if the interiors overlap. Boxes that only share an edge
    /// do not intersect, so adjacent crates never touch each other.
    pub fn intersects(&self, other: &Aabb) -> bool {
        let lo = self.min.max(other.min);
        let hi = self.max().min(other.max());
        lo.x < hi.x && lo.y < hi.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlapping_boxes_intersect() {
        let a = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Aabb::new(Vec2::new(5.0, 5.0), Vec2::new(10.0, 10.0));
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_shared_edge_is_not_an_intersection() {
        let a = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(30.0, 30.0));
        let right = Aabb::new(Vec2::new(30.0, 0.0), Vec2::new(30.0, 30.0));
        let below = Aabb::new(Vec2::new(0.0, 30.0), Vec2::new(30.0, 30.0));
        assert!(!a.intersects(&right));
        assert!(!a.intersects(&below));
    }

    #[test]
    fn test_contained_box_intersects() {
        let outer = Aabb::new(Vec2::new(-50.0, -50.0), Vec2::new(100.0, 100.0));
        let inner = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0));
        assert!(outer.intersects(&inner));
        assert!((outer.center() - Vec2::ZERO).length() < 0.0001);
    }

    #[test]
    fn test_disjoint_on_one_axis() {
        let a = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Aabb::new(Vec2::new(5.0, 20.0), Vec2::new(10.0, 10.0));
        assert!(!a.intersects(&b));
    }
}
