//! Image loading utilities
//!
//! Provides PNG and other image format decoding into RGBA8 pixel data.

use std::path::Path;

use crate::assets::AssetError;

/// Decoded RGBA8 image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    /// Raw RGBA pixel data, row-major
    pub data: Vec<u8>,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
}

impl ImageData {
    /// Load an image from a file path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AssetError> {
        let path_ref = path.as_ref();

        log::debug!("Loading image from: {:?}", path_ref);

        let img = image::open(path_ref).map_err(|e| match e {
            image::ImageError::IoError(io) => AssetError::Io(io),
            other => AssetError::LoadFailed(format!(
                "Failed to load image {}: {}",
                path_ref.display(),
                other
            )),
        })?;
        let image = Self::from_dynamic(&img)?;

        log::info!("Loaded image {}x{} from {:?}", image.width, image.height, path_ref);
        Ok(image)
    }

    /// Load image from memory (useful for embedded resources)
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AssetError> {
        let img = image::load_from_memory(bytes)
            .map_err(|e| AssetError::LoadFailed(format!("Failed to load image from bytes: {}", e)))?;
        let image = Self::from_dynamic(&img)?;

        log::debug!("Loaded image {}x{} from memory", image.width, image.height);
        Ok(image)
    }

    fn from_dynamic(img: &image::DynamicImage) -> Result<Self, AssetError> {
        let rgba_img = img.to_rgba8();
        let (width, height) = rgba_img.dimensions();
        if width == 0 || height == 0 {
            return Err(AssetError::Invalid(format!("Empty image ({}x{})", width, height)));
        }

        Ok(Self {
            data: rgba_img.into_raw(),
            width,
            height,
        })
    }

    /// Create a solid color image (useful for testing and placeholders)
    pub fn solid_color(width: u32, height: u32, color: [u8; 4]) -> Self {
        let pixel_count = width as usize * height as usize;
        let mut data = Vec::with_capacity(pixel_count * 4);

        for _ in 0..pixel_count {
            data.extend_from_slice(&color);
        }

        Self { data, width, height }
    }

    /// RGBA value of one pixel
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * 4;
        let bytes = self.data.get(offset..offset + 4)?;
        Some([bytes[0], bytes[1], bytes[2], bytes[3]])
    }

    /// Get the size of the image data in bytes
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn encode_png(width: u32, height: u32, pixels: Vec<u8>) -> Vec<u8> {
        let buffer = image::RgbaImage::from_raw(width, height, pixels).unwrap();
        let mut bytes = Cursor::new(Vec::new());
        buffer.write_to(&mut bytes, image::ImageFormat::Png).unwrap();
        bytes.into_inner()
    }

    #[test]
    fn test_solid_color_image() {
        let img = ImageData::solid_color(4, 4, [255, 0, 0, 255]);
        assert_eq!(img.width, 4);
        assert_eq!(img.height, 4);
        assert_eq!(img.size_bytes(), 4 * 4 * 4);
        assert_eq!(img.pixel(0, 0), Some([255, 0, 0, 255]));
        assert_eq!(img.pixel(4, 0), None);
    }

    #[test]
    fn test_decode_png_bytes() {
        let pixels = vec![
            255, 0, 0, 255, // red
            0, 255, 0, 128, // translucent green
        ];
        let image = ImageData::from_bytes(&encode_png(2, 1, pixels)).unwrap();
        assert_eq!((image.width, image.height), (2, 1));
        assert_eq!(image.pixel(1, 0), Some([0, 255, 0, 128]));
    }

    #[test]
    fn test_malformed_bytes() {
        let err = ImageData::from_bytes(&[0x89, b'P', b'N', b'G', 0, 0]).unwrap_err();
        assert!(matches!(err, AssetError::LoadFailed(_)));
    }

    #[test]
    fn test_missing_file() {
        let path = std::env::temp_dir().join("hero_engine_missing_image.png");
        let err = ImageData::from_file(&path).unwrap_err();
        assert!(matches!(err, AssetError::Io(ref io) if io.kind() == std::io::ErrorKind::NotFound));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("hero_engine_image_{}.png", std::process::id()));
        std::fs::write(&path, encode_png(1, 1, vec![1, 2, 3, 4])).unwrap();

        let image = ImageData::from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(image.pixel(0, 0), Some([1, 2, 3, 4]));
    }
}
