//! Velocity component for entities that move in 2D space

use crate::foundation::math::Vec2;

/// Linear velocity in pixels per second
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Velocity {
    /// Velocity vector (vx, vy)
    pub linear: Vec2,
}

impl Velocity {
    /// Create a velocity
    pub fn new(vx: f32, vy: f32) -> Self {
        Self {
            linear: Vec2::new(vx, vy),
        }
    }

    /// X component
    pub fn vx(&self) -> f32 {
        self.linear.x
    }

    /// Y component
    pub fn vy(&self) -> f32 {
        self.linear.y
    }

    /// Set velocity
    pub fn set(&mut self, vx: f32, vy: f32) {
        self.linear = Vec2::new(vx, vy);
    }

    /// Add to velocity
    pub fn add(&mut self, dvx: f32, dvy: f32) {
        self.linear += Vec2::new(dvx, dvy);
    }

    /// Magnitude of the velocity
    pub fn speed(&self) -> f32 {
        self.linear.norm()
    }
}
