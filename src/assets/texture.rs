//! Decoded texture pixels.

use crate::core::{Error, Result};

/// RGBA8 pixels ready for upload.
#[derive(Clone, Debug, PartialEq)]
pub struct TextureData {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl TextureData {
    /// Decode an encoded image (PNG, JPEG, ...) held in memory.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let image = image::load_from_memory(bytes)?.to_rgba8();
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(Error::Asset("decoded image is empty".to_string()));
        }
        Ok(Self { width, height, rgba: image.into_raw() })
    }

    /// 1x1 opaque white, bound while a real texture is missing.
    pub fn white() -> Self {
        Self { width: 1, height: 1, rgba: vec![255; 4] }
    }

    /// Bytes per row of the tightly packed pixel data.
    pub fn bytes_per_row(&self) -> u32 {
        self.width * 4
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn encode_png(img: &image::RgbaImage) -> Vec<u8> {
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png).unwrap();
        bytes
    }

    #[test]
    fn test_decode_png() {
        let img = image::RgbaImage::from_pixel(3, 2, image::Rgba([10, 20, 30, 255]));
        let tex = TextureData::decode(&encode_png(&img)).unwrap();
        assert_eq!((tex.width, tex.height), (3, 2));
        assert_eq!(tex.rgba.len(), 3 * 2 * 4);
        assert_eq!(&tex.rgba[..4], &[10, 20, 30, 255]);
        assert_eq!(tex.bytes_per_row(), 12);
    }

    #[test]
    fn test_decode_garbage_fails() {
        assert!(matches!(TextureData::decode(b"not an image"), Err(Error::Image(_))));
    }

    #[test]
    fn test_white_fallback() {
        let tex = TextureData::white();
        assert_eq!(tex.rgba, vec![255, 255, 255, 255]);
    }
}
