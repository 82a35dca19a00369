//! WASM-compatible wrapper types for image data.
//!
//! This module provides JavaScript-friendly types that wrap the core
//! Cropforge types, handling the conversion between Rust and JavaScript
//! data representations.

use cropforge_core::{CropShape, EditScope, Handle, ImageBuffer};
use wasm_bindgen::prelude::*;

/// An RGBA image wrapper for JavaScript.
///
/// This type wraps the core `ImageBuffer` type and provides a
/// JavaScript-friendly interface for accessing image dimensions and pixel
/// data.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. When you call `pixels()`, a copy
/// is made to JavaScript memory as a `Uint8Array`. For performance-critical
/// code, keep the image in WASM memory and only extract pixels when needed.
///
/// The `free()` method can be called to explicitly release WASM memory, but
/// this is optional as wasm-bindgen's finalizer handles cleanup
/// automatically.
#[wasm_bindgen]
pub struct JsImageBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsImageBuffer {
    /// Create a new JsImageBuffer from dimensions and pixel data.
    ///
    /// # Arguments
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `pixels` - RGBA pixel data (4 bytes per pixel, row-major order)
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsImageBuffer {
        JsImageBuffer {
            width,
            height,
            pixels,
        }
    }

    /// Get the image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the number of bytes in the pixel buffer (width * height * 4)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGBA pixel data as Uint8Array.
    ///
    /// Note: This creates a copy of the pixel data, ready to feed into an
    /// ImageData for canvas rendering.
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Explicitly free WASM memory.
    ///
    /// This is optional - wasm-bindgen's finalizer will handle cleanup
    /// automatically. Call this to immediately release a large image.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsImageBuffer {
    /// Create a JsImageBuffer from a core ImageBuffer.
    pub(crate) fn from_core(img: ImageBuffer) -> Self {
        Self {
            width: img.width,
            height: img.height,
            pixels: img.pixels,
        }
    }

    /// Convert back to a core ImageBuffer.
    ///
    /// Note: This clones the pixel data.
    pub(crate) fn to_core(&self) -> ImageBuffer {
        ImageBuffer {
            width: self.width,
            height: self.height,
            pixels: self.pixels.clone(),
        }
    }
}

/// Convert a u8 shape value to the core CropShape enum.
///
/// Values:
/// - 0 = Rectangle
/// - 1 = Circle
/// - 2 = Ellipse
///
/// Any other value defaults to Rectangle.
pub(crate) fn shape_from_u8(value: u8) -> CropShape {
    match value {
        1 => CropShape::Circle,
        2 => CropShape::Ellipse,
        _ => CropShape::Rectangle, // Default
    }
}

/// Convert a u8 handle value to the core Handle enum.
///
/// Values:
/// - 0 = Move, 1 = North, 2 = South, 3 = East, 4 = West
/// - 5 = NorthEast, 6 = NorthWest, 7 = SouthEast, 8 = SouthWest
/// - 9 = Rotate
///
/// Any other value defaults to Move.
pub(crate) fn handle_from_u8(value: u8) -> Handle {
    match value {
        1 => Handle::North,
        2 => Handle::South,
        3 => Handle::East,
        4 => Handle::West,
        5 => Handle::NorthEast,
        6 => Handle::NorthWest,
        7 => Handle::SouthEast,
        8 => Handle::SouthWest,
        9 => Handle::Rotate,
        _ => Handle::Move, // Default
    }
}

/// Convert a u8 scope value to the core EditScope enum.
///
/// Values:
/// - 0 = Crop
/// - 1 = Matte
///
/// Any other value defaults to Crop.
pub(crate) fn scope_from_u8(value: u8) -> EditScope {
    match value {
        1 => EditScope::Matte,
        _ => EditScope::Crop, // Default
    }
}
