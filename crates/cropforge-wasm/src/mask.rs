//! WASM bindings for feathered ellipse mask generation.
//!
//! Hosts that render their own crop preview can generate the mask directly
//! and composite it on a canvas without round-tripping pixels through WASM.

use cropforge_core::mask::EllipseMask;
use wasm_bindgen::prelude::*;

/// A generated alpha mask for JavaScript.
#[wasm_bindgen]
pub struct JsEllipseMask {
    width: u32,
    height: u32,
    alpha: Vec<f32>,
}

#[wasm_bindgen]
impl JsEllipseMask {
    /// Mask width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Mask height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Alpha values as Float32Array, row-major, 0.0 (outside) to 1.0
    /// (inside).
    pub fn values(&self) -> Vec<f32> {
        self.alpha.clone()
    }

    /// Alpha values scaled to 0-255 as Uint8Array, ready for an ImageData
    /// alpha channel.
    pub fn values_u8(&self) -> Vec<u8> {
        self.alpha
            .iter()
            .map(|v| (v * 255.0).round() as u8)
            .collect()
    }
}

/// Generate a feathered ellipse mask.
///
/// The mask covers the rotated ellipse's bounding box plus the feather
/// padding margin; `feather_px = 0` produces a hard edge.
///
/// # Arguments
///
/// * `rx`, `ry` - Ellipse semi-axes in pixels
/// * `angle_deg` - Rotation in degrees
/// * `feather_px` - Feather band width in pixels
#[wasm_bindgen]
pub fn generate_ellipse_mask(rx: f64, ry: f64, angle_deg: f64, feather_px: f64) -> JsEllipseMask {
    let mask = EllipseMask::generate(rx, ry, angle_deg, feather_px);
    JsEllipseMask {
        width: mask.width,
        height: mask.height,
        alpha: mask.alpha,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_dimensions() {
        let mask = generate_ellipse_mask(50.0, 30.0, 0.0, 0.0);
        assert_eq!(mask.width(), 104);
        assert_eq!(mask.height(), 64);
        assert_eq!(mask.values().len(), (104 * 64) as usize);
    }

    #[test]
    fn test_values_u8_scaling() {
        let mask = generate_ellipse_mask(10.0, 10.0, 0.0, 0.0);
        let bytes = mask.values_u8();
        assert!(bytes.iter().all(|&v| v == 0 || v == 255), "hard edge is binary");
        let center_idx = (mask.height() / 2 * mask.width() + mask.width() / 2) as usize;
        assert_eq!(bytes[center_idx], 255);
    }
}
