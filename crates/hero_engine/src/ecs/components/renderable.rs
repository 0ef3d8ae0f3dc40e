//! Renderable components for ECS
//!
//! Sprites and images are drawn by the scene compositor in ascending
//! z-order, centered on their entity's transform. Text is drawn after all of
//! them, unrotated.

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::assets::{AssetError, ImageData};

/// RGBA color with 8 bits per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
    /// Alpha (255 = opaque)
    pub a: u8,
}

impl Color {
    /// Opaque white
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Opaque black
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque red
    pub const RED: Self = Self::rgb(255, 0, 0);
    /// Opaque green
    pub const GREEN: Self = Self::rgb(0, 255, 0);
    /// Opaque blue
    pub const BLUE: Self = Self::rgb(0, 0, 255);
    /// Opaque yellow
    pub const YELLOW: Self = Self::rgb(255, 255, 0);
    /// Fully transparent
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    /// Opaque color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Color with alpha
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Channels as `[r, g, b, a]`
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Font description handed to the rasterizer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Font {
    /// Font family name
    pub family: String,
    /// Size in points
    pub size: f32,
    /// Bold weight
    pub bold: bool,
}

impl Default for Font {
    fn default() -> Self {
        Self {
            family: "SansSerif".to_string(),
            size: 24.0,
            bold: true,
        }
    }
}

impl Font {
    /// Create a font
    pub fn new(family: impl Into<String>, size: f32, bold: bool) -> Self {
        Self {
            family: family.into(),
            size,
            bold,
        }
    }
}

/// Anything placed in the z-ordered draw pass
pub trait Drawable {
    /// Whether the item is drawn at all
    fn is_visible(&self) -> bool;

    /// Draw order; lower values are drawn first
    fn z_order(&self) -> i32;
}

/// Solid-color rectangle centered on the entity
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    /// Width in pixels before scaling
    pub width: f32,
    /// Height in pixels before scaling
    pub height: f32,
    /// Fill color
    pub color: Color,
    /// Visibility flag
    pub visible: bool,
    /// Draw order
    pub z_order: i32,
}

impl Sprite {
    /// Create a visible sprite at z-order 0
    pub fn new(width: f32, height: f32, color: Color) -> Self {
        Self {
            width,
            height,
            color,
            visible: true,
            z_order: 0,
        }
    }

    /// Builder pattern: Set the draw order
    pub fn with_z_order(mut self, z_order: i32) -> Self {
        self.z_order = z_order;
        self
    }

    /// Resize the rectangle
    pub fn set_size(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    /// Change the fill color
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Show or hide
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Change the draw order
    pub fn set_z_order(&mut self, z_order: i32) {
        self.z_order = z_order;
    }
}

impl Drawable for Sprite {
    fn is_visible(&self) -> bool {
        self.visible
    }

    fn z_order(&self) -> i32 {
        self.z_order
    }
}

/// Bitmap drawn into a rectangle centered on the entity
///
/// Pixel data is shared, so cloning the component is cheap.
#[derive(Debug, Clone)]
pub struct ImageSprite {
    /// Decoded pixel data
    pub image: Arc<ImageData>,
    /// Draw width in pixels before scaling
    pub width: f32,
    /// Draw height in pixels before scaling
    pub height: f32,
    /// Visibility flag
    pub visible: bool,
    /// Draw order
    pub z_order: i32,
    opacity: f32,
}

impl ImageSprite {
    /// Wrap decoded pixels, drawn at their natural size
    pub fn from_image(image: Arc<ImageData>) -> Self {
        #[allow(clippy::cast_precision_loss)]
        let (width, height) = (image.width as f32, image.height as f32);
        Self {
            image,
            width,
            height,
            visible: true,
            z_order: 0,
            opacity: 1.0,
        }
    }

    /// Decode an image file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AssetError> {
        Ok(Self::from_image(Arc::new(ImageData::from_file(path)?)))
    }

    /// Decode an in-memory image
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AssetError> {
        Ok(Self::from_image(Arc::new(ImageData::from_bytes(bytes)?)))
    }

    /// Builder pattern: Set the draw size
    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.set_size(width, height);
        self
    }

    /// Builder pattern: Set the draw order
    pub fn with_z_order(mut self, z_order: i32) -> Self {
        self.z_order = z_order;
        self
    }

    /// Opacity in `[0, 1]`
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Set opacity, clamped to `[0, 1]`
    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    /// Change the draw size
    pub fn set_size(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    /// Replace the pixels and reset the draw size to the new bitmap's size
    #[allow(clippy::cast_precision_loss)]
    pub fn set_image(&mut self, image: Arc<ImageData>) {
        self.width = image.width as f32;
        self.height = image.height as f32;
        self.image = image;
    }

    /// Width of the decoded bitmap
    pub fn original_width(&self) -> u32 {
        self.image.width
    }

    /// Height of the decoded bitmap
    pub fn original_height(&self) -> u32 {
        self.image.height
    }

    /// Show or hide
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Change the draw order
    pub fn set_z_order(&mut self, z_order: i32) {
        self.z_order = z_order;
    }
}

impl Drawable for ImageSprite {
    fn is_visible(&self) -> bool {
        self.visible
    }

    fn z_order(&self) -> i32 {
        self.z_order
    }
}

/// Text label centered on the entity
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    /// Label contents
    pub text: String,
    /// Font
    pub font: Font,
    /// Fill color
    pub color: Color,
    /// Visibility flag
    pub visible: bool,
}

impl Text {
    /// Create a visible white label in the default font
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font: Font::default(),
            color: Color::WHITE,
            visible: true,
        }
    }

    /// Builder pattern: Set the color
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Builder pattern: Set the font
    pub fn with_font(mut self, font: Font) -> Self {
        self.font = font;
        self
    }

    /// Replace the label contents
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Show or hide
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}
