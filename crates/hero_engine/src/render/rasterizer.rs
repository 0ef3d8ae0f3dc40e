//! Drawing surface abstraction

use crate::assets::ImageData;
use crate::ecs::components::{Color, Font};
use crate::foundation::math::Mat3;

/// Measured extents of a rendered string
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextMetrics {
    /// Advance width of the whole string
    pub width: f32,
    /// Line height
    pub height: f32,
    /// Distance from the baseline to the bottom of the line
    pub descent: f32,
}

/// A 2D canvas with a current affine transform and global alpha
///
/// Coordinates passed to the draw calls are in the space of the current
/// transform. Implementations must not reset the transform or alpha on their
/// own between calls.
pub trait Rasterizer {
    /// Current transform
    fn transform(&self) -> Mat3;

    /// Replace the current transform
    fn set_transform(&mut self, transform: Mat3);

    /// Current global alpha in `[0, 1]`
    fn alpha(&self) -> f32;

    /// Replace the global alpha
    fn set_alpha(&mut self, alpha: f32);

    /// Fill an axis-aligned rectangle with its top-left corner at `(x, y)`
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color);

    /// Draw a bitmap stretched into a rectangle
    fn draw_image(&mut self, image: &ImageData, x: f32, y: f32, width: f32, height: f32);

    /// Measure a string in a font
    fn text_metrics(&self, text: &str, font: &Font) -> TextMetrics;

    /// Draw a string with its baseline starting at `(x, y)`
    fn draw_text(&mut self, text: &str, font: &Font, color: Color, x: f32, y: f32);
}
