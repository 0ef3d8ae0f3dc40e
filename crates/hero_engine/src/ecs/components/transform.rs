//! Transform component for the ECS system
//!
//! Pure data component: position, rotation, and non-uniform scale in screen
//! space (pixels, y pointing down, rotation in radians).

use crate::foundation::math::{affine, Mat3, Vec2};

/// 2D transform component
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Position in pixels
    pub position: Vec2,

    /// Rotation in radians
    pub rotation: f32,

    /// Scale factors along x and y
    pub scale: Vec2,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec2::zeros(),
            rotation: 0.0,
            scale: Vec2::new(1.0, 1.0),
        }
    }
}

impl Transform {
    /// Create a transform at a position with no rotation and unit scale
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            ..Default::default()
        }
    }

    /// Builder pattern: Set rotation (radians)
    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    /// Builder pattern: Set non-uniform scale
    pub fn with_scale(mut self, sx: f32, sy: f32) -> Self {
        self.scale = Vec2::new(sx, sy);
        self
    }

    /// X position
    pub fn x(&self) -> f32 {
        self.position.x
    }

    /// Y position
    pub fn y(&self) -> f32 {
        self.position.y
    }

    /// Move by an offset
    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.position.x += dx;
        self.position.y += dy;
    }

    /// Set the position
    pub fn set_position(&mut self, x: f32, y: f32) {
        self.position = Vec2::new(x, y);
    }

    /// Add to the rotation (radians)
    pub fn rotate(&mut self, angle: f32) {
        self.rotation += angle;
    }

    /// Set non-uniform scale
    pub fn set_scale(&mut self, sx: f32, sy: f32) {
        self.scale = Vec2::new(sx, sy);
    }

    /// Set the same scale on both axes
    pub fn set_uniform_scale(&mut self, scale: f32) {
        self.set_scale(scale, scale);
    }

    /// Convert to transformation matrix (translate * rotate * scale)
    pub fn to_matrix(&self) -> Mat3 {
        affine::compose(self.position, self.rotation, self.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_defaults() {
        let t = Transform::new(3.0, 4.0);
        assert_eq!(t.position, Vec2::new(3.0, 4.0));
        assert_eq!(t.rotation, 0.0);
        assert_eq!(t.scale, Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_mutators() {
        let mut t = Transform::default();
        t.translate(2.0, -1.0);
        t.rotate(0.5);
        t.rotate(0.25);
        t.set_uniform_scale(3.0);
        assert_relative_eq!(t.x(), 2.0);
        assert_relative_eq!(t.y(), -1.0);
        assert_relative_eq!(t.rotation, 0.75);
        assert_eq!(t.scale, Vec2::new(3.0, 3.0));
    }

    #[test]
    fn test_matrix_translation_column() {
        let m = Transform::new(5.0, 6.0).to_matrix();
        assert_relative_eq!(m[(0, 2)], 5.0);
        assert_relative_eq!(m[(1, 2)], 6.0);
    }
}
