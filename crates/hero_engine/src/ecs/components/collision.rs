//! Collision components for ECS

use crate::foundation::math::Vec2;

/// Axis-aligned box collider centered on the entity's position plus offset
///
/// Rotation and scale of the entity's transform are ignored; the box is
/// always axis-aligned in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxCollider {
    /// Full width and height of the box
    pub size: Vec2,

    /// Offset of the box center from the entity position
    pub offset: Vec2,

    /// Is this a trigger volume (reported, but no physical response expected)?
    ///
    /// Detection does not look at this flag; collision handlers do.
    pub is_trigger: bool,
}

impl BoxCollider {
    /// Create a collider with no offset
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            offset: Vec2::zeros(),
            is_trigger: false,
        }
    }

    /// Builder pattern: Set the center offset
    pub fn with_offset(mut self, ox: f32, oy: f32) -> Self {
        self.offset = Vec2::new(ox, oy);
        self
    }

    /// Mark this as a trigger volume
    pub fn as_trigger(mut self) -> Self {
        self.is_trigger = true;
        self
    }

    /// Box width
    pub fn width(&self) -> f32 {
        self.size.x
    }

    /// Box height
    pub fn height(&self) -> f32 {
        self.size.y
    }

    /// Resize the box
    pub fn set_size(&mut self, width: f32, height: f32) {
        self.size = Vec2::new(width, height);
    }

    /// Move the box center relative to the entity
    pub fn set_offset(&mut self, ox: f32, oy: f32) {
        self.offset = Vec2::new(ox, oy);
    }
}
