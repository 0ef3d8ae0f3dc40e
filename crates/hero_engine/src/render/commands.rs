//! Recorded draw commands
//!
//! [`CommandRecorder`] is a [`Rasterizer`] that paints nothing. It stores
//! every draw call, together with the transform and alpha in effect at the
//! time, so headless hosts and tests can inspect what a frame would draw.

use crate::assets::ImageData;
use crate::ecs::components::{Color, Font};
use crate::foundation::math::Mat3;

use super::rasterizer::{Rasterizer, TextMetrics};

/// Advance of one glyph as a fraction of the font size
const GLYPH_WIDTH: f32 = 0.6;
/// Descent as a fraction of the font size
const DESCENT: f32 = 0.2;

/// A single recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// `fill_rect`
    FillRect {
        /// Transform in effect
        transform: Mat3,
        /// Alpha in effect
        alpha: f32,
        /// Left edge
        x: f32,
        /// Top edge
        y: f32,
        /// Width
        width: f32,
        /// Height
        height: f32,
        /// Fill color
        color: Color,
    },
    /// `draw_image`
    Image {
        /// Transform in effect
        transform: Mat3,
        /// Alpha in effect
        alpha: f32,
        /// Left edge
        x: f32,
        /// Top edge
        y: f32,
        /// Width
        width: f32,
        /// Height
        height: f32,
        /// Pixel size of the source bitmap
        source_size: (u32, u32),
    },
    /// `draw_text`
    Text {
        /// Transform in effect
        transform: Mat3,
        /// Alpha in effect
        alpha: f32,
        /// String drawn
        text: String,
        /// Font
        font: Font,
        /// Fill color
        color: Color,
        /// Baseline start x
        x: f32,
        /// Baseline y
        y: f32,
    },
}

/// Rasterizer that records draw calls instead of painting
///
/// Text is measured with fixed-width glyphs derived from the font size.
#[derive(Debug, Clone)]
pub struct CommandRecorder {
    transform: Mat3,
    alpha: f32,
    commands: Vec<DrawCommand>,
}

impl Default for CommandRecorder {
    fn default() -> Self {
        Self {
            transform: Mat3::identity(),
            alpha: 1.0,
            commands: Vec::new(),
        }
    }
}

impl CommandRecorder {
    /// Create a recorder with identity transform and full alpha
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands recorded so far
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take the recorded commands, leaving the recorder empty
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Forget recorded commands; transform and alpha are kept
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Number of recorded commands
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Rasterizer for CommandRecorder {
    fn transform(&self) -> Mat3 {
        self.transform
    }

    fn set_transform(&mut self, transform: Mat3) {
        self.transform = transform;
    }

    fn alpha(&self) -> f32 {
        self.alpha
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha.clamp(0.0, 1.0);
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        self.commands.push(DrawCommand::FillRect {
            transform: self.transform,
            alpha: self.alpha,
            x,
            y,
            width,
            height,
            color,
        });
    }

    fn draw_image(&mut self, image: &ImageData, x: f32, y: f32, width: f32, height: f32) {
        self.commands.push(DrawCommand::Image {
            transform: self.transform,
            alpha: self.alpha,
            x,
            y,
            width,
            height,
            source_size: (image.width, image.height),
        });
    }

    #[allow(clippy::cast_precision_loss)]
    fn text_metrics(&self, text: &str, font: &Font) -> TextMetrics {
        TextMetrics {
            width: text.chars().count() as f32 * font.size * GLYPH_WIDTH,
            height: font.size,
            descent: font.size * DESCENT,
        }
    }

    fn draw_text(&mut self, text: &str, font: &Font, color: Color, x: f32, y: f32) {
        self.commands.push(DrawCommand::Text {
            transform: self.transform,
            alpha: self.alpha,
            text: text.to_string(),
            font: font.clone(),
            color,
            x,
            y,
        });
    }
}
