//! Math utilities and types
//!
//! Provides the 2D math types used by components and the compositor.
//! Affine transforms are homogeneous 3x3 matrices acting on column vectors.

pub use nalgebra::{Matrix3, Rotation2, Vector2};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3x3 matrix type (2D affine transform in homogeneous coordinates)
pub type Mat3 = Matrix3<f32>;

/// 2D point type
pub type Point2 = nalgebra::Point2<f32>;

/// Affine transform construction helpers
pub mod affine {
    use super::{Mat3, Point2, Rotation2, Vec2};

    /// Translation matrix
    pub fn translation(offset: Vec2) -> Mat3 {
        Mat3::new_translation(&offset)
    }

    /// Counter-clockwise rotation matrix (radians)
    pub fn rotation(angle: f32) -> Mat3 {
        Rotation2::new(angle).to_homogeneous()
    }

    /// Non-uniform scaling matrix
    pub fn scaling(scale: Vec2) -> Mat3 {
        Mat3::new_nonuniform_scaling(&scale)
    }

    /// Compose `translate(position) * rotate(rotation) * scale(scale)`
    ///
    /// Applied to a local point, scale happens first and translation last.
    pub fn compose(position: Vec2, rotation: f32, scale: Vec2) -> Mat3 {
        translation(position) * self::rotation(rotation) * scaling(scale)
    }

    /// Transform a point by an affine matrix
    pub fn transform_point(matrix: &Mat3, point: Point2) -> Point2 {
        matrix.transform_point(&point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_compose_applies_scale_then_rotation_then_translation() {
        let m = affine::compose(Vec2::new(10.0, 20.0), FRAC_PI_2, Vec2::new(2.0, 1.0));
        let p = affine::transform_point(&m, Point2::new(1.0, 0.0));

        // (1,0) -> scale (2,0) -> rotate 90° (0,2) -> translate (10,22)
        assert_relative_eq!(p.x, 10.0, epsilon = 1e-5);
        assert_relative_eq!(p.y, 22.0, epsilon = 1e-5);
    }

    #[test]
    fn test_identity_compose() {
        let m = affine::compose(Vec2::zeros(), 0.0, Vec2::new(1.0, 1.0));
        assert_relative_eq!(m, Mat3::identity());
    }
}
