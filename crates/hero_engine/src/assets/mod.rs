//! Asset loading
//!
//! Decodes image files for [`crate::ecs::components::ImageSprite`]. Failures
//! are returned as values; nothing here panics on bad input.

pub mod image_loader;

pub use image_loader::ImageData;

use thiserror::Error;

/// Asset loading errors
#[derive(Error, Debug)]
pub enum AssetError {
    /// Asset could not be read or decoded
    #[error("Failed to load asset: {0}")]
    LoadFailed(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Decoded asset is unusable
    #[error("Invalid asset: {0}")]
    Invalid(String),
}
