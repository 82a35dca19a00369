//! Pixel buffer types shared across the engine.
//!
//! The engine operates on in-memory RGBA buffers handed to it by the host;
//! decoding and encoding image file formats is the host's responsibility.

use image::RgbaImage;

/// Bytes per RGBA pixel.
pub const BYTES_PER_PIXEL: usize = 4;

/// An RGBA image with row-major pixel data.
#[derive(Debug, Clone)]
pub struct ImageBuffer {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// RGBA pixel data in row-major order (4 bytes per pixel).
    /// Length should be width * height * 4.
    pub pixels: Vec<u8>,
}

impl ImageBuffer {
    /// Create a new ImageBuffer with the given dimensions and pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * BYTES_PER_PIXEL,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create an opaque black buffer of the given dimensions.
    pub fn blank(width: u32, height: u32) -> Self {
        let mut pixels = vec![0u8; width as usize * height as usize * BYTES_PER_PIXEL];
        for chunk in pixels.chunks_exact_mut(BYTES_PER_PIXEL) {
            chunk[3] = 255;
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create an ImageBuffer from an image::RgbaImage.
    pub fn from_rgba_image(img: RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        let pixels = img.into_raw();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Convert to an image::RgbaImage for further processing by the host.
    pub fn to_rgba_image(&self) -> Option<RgbaImage> {
        RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }

    /// Get the size of the pixel buffer in bytes.
    pub fn byte_size(&self) -> usize {
        self.pixels.len()
    }

    /// Check if this is an empty/invalid image.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }

    /// Read the RGBA value at (x, y). Callers must stay in bounds.
    #[inline]
    pub fn rgba_at(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL;
        [
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ]
    }
}

/// A single-channel alpha matte, as returned by the matting collaborator.
///
/// Values are 0 (background) to 255 (foreground). The matte may be produced
/// at an inference resolution smaller than the image; see
/// [`crate::matte::resize_matte`].
#[derive(Debug, Clone)]
pub struct AlphaMatte {
    /// Matte width in pixels.
    pub width: u32,
    /// Matte height in pixels.
    pub height: u32,
    /// Alpha values in row-major order (1 byte per pixel).
    pub alpha: Vec<u8>,
}

impl AlphaMatte {
    /// Create a new AlphaMatte with the given dimensions and coverage data.
    pub fn new(width: u32, height: u32, alpha: Vec<u8>) -> Self {
        debug_assert_eq!(
            alpha.len(),
            width as usize * height as usize,
            "Matte buffer size mismatch"
        );
        Self {
            width,
            height,
            alpha,
        }
    }

    /// Check if this is an empty/invalid matte.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.alpha.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_buffer_creation() {
        let pixels = vec![0u8; 100 * 50 * 4];
        let img = ImageBuffer::new(100, 50, pixels);

        assert_eq!(img.width, 100);
        assert_eq!(img.height, 50);
        assert_eq!(img.pixel_count(), 5000);
        assert_eq!(img.byte_size(), 20000);
        assert!(!img.is_empty());
    }

    #[test]
    fn test_image_buffer_empty() {
        let img = ImageBuffer::new(0, 0, vec![]);
        assert!(img.is_empty());
    }

    #[test]
    fn test_blank_is_opaque() {
        let img = ImageBuffer::blank(4, 4);
        for chunk in img.pixels.chunks_exact(4) {
            assert_eq!(chunk, &[0, 0, 0, 255]);
        }
    }

    #[test]
    fn test_rgba_at() {
        let mut pixels = vec![0u8; 2 * 2 * 4];
        // Pixel (1, 1) = (10, 20, 30, 40)
        pixels[12..16].copy_from_slice(&[10, 20, 30, 40]);
        let img = ImageBuffer::new(2, 2, pixels);

        assert_eq!(img.rgba_at(1, 1), [10, 20, 30, 40]);
        assert_eq!(img.rgba_at(0, 0), [0, 0, 0, 0]);
    }

    #[test]
    fn test_rgba_image_round_trip() {
        let pixels: Vec<u8> = (0..3 * 2 * 4).map(|i| (i * 7 % 256) as u8).collect();
        let img = ImageBuffer::new(3, 2, pixels.clone());

        let rgba = img.to_rgba_image().expect("valid buffer");
        let back = ImageBuffer::from_rgba_image(rgba);

        assert_eq!(back.width, 3);
        assert_eq!(back.height, 2);
        assert_eq!(back.pixels, pixels);
    }

    #[test]
    fn test_alpha_matte_creation() {
        let matte = AlphaMatte::new(10, 5, vec![128u8; 50]);
        assert_eq!(matte.width, 10);
        assert_eq!(matte.height, 5);
        assert!(!matte.is_empty());
    }

    #[test]
    fn test_alpha_matte_empty() {
        let matte = AlphaMatte::new(0, 0, vec![]);
        assert!(matte.is_empty());
    }
}
