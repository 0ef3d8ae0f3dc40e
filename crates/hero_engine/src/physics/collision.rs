//! Axis-aligned bounding box tests

use crate::ecs::components::{BoxCollider, Transform};
use crate::foundation::math::Vec2;

/// An axis-aligned box in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Center of the box
    pub center: Vec2,
    /// Half of the width and height
    pub half_extents: Vec2,
}

impl Aabb {
    /// Creates a box from its center and half extents
    pub fn new(center: Vec2, half_extents: Vec2) -> Self {
        Self { center, half_extents }
    }

    /// World-space box of a collider attached to an entity
    ///
    /// Only the transform's position is used; rotation and scale are ignored.
    pub fn from_collider(transform: &Transform, collider: &BoxCollider) -> Self {
        Self {
            center: transform.position + collider.offset,
            half_extents: collider.size * 0.5,
        }
    }

    /// Minimum corner
    pub fn min(&self) -> Vec2 {
        self.center - self.half_extents
    }

    /// Maximum corner
    pub fn max(&self) -> Vec2 {
        self.center + self.half_extents
    }

    /// Width of the box
    pub fn width(&self) -> f32 {
        self.half_extents.x * 2.0
    }

    /// Height of the box
    pub fn height(&self) -> f32 {
        self.half_extents.y * 2.0
    }

    /// Strict overlap test on both axes
    ///
    /// Boxes that only share an edge or a corner do not overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        let (a_min, a_max) = (self.min(), self.max());
        let (b_min, b_max) = (other.min(), other.max());
        a_min.x < b_max.x && a_max.x > b_min.x && a_min.y < b_max.y && a_max.y > b_min.y
    }

    /// Overlap depth along each axis, or `None` when the boxes do not overlap
    pub fn penetration(&self, other: &Self) -> Option<Vec2> {
        if !self.overlaps(other) {
            return None;
        }
        let (a_min, a_max) = (self.min(), self.max());
        let (b_min, b_max) = (other.min(), other.max());
        Some(Vec2::new(
            a_max.x.min(b_max.x) - a_min.x.max(b_min.x),
            a_max.y.min(b_max.y) - a_min.y.max(b_min.y),
        ))
    }

    /// Whether a point lies strictly inside the box
    pub fn contains_point(&self, point: Vec2) -> bool {
        let (min, max) = (self.min(), self.max());
        point.x > min.x && point.x < max.x && point.y > min.y && point.y < max.y
    }
}
