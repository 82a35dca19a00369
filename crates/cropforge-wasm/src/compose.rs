//! WASM bindings for crop compositing.

use crate::types::{shape_from_u8, JsImageBuffer};
use cropforge_core::compose::commit_crop as core_commit;
use cropforge_core::geometry::{CropRect, CropState};
use wasm_bindgen::prelude::*;

/// Commit a crop against a source image.
///
/// For rectangle crops this is a direct copy of the region; for circle and
/// ellipse crops the output is the padded bounding-box canvas with the
/// feathered mask multiplied into the alpha channel. Committing the same
/// inputs twice yields byte-identical output.
///
/// # Arguments
///
/// * `image` - Source image
/// * `x`, `y`, `w`, `h` - Crop bounding rectangle in source pixels
/// * `shape` - 0 = Rectangle, 1 = Circle, 2 = Ellipse
/// * `angle_deg` - Ellipse rotation in degrees (ignored for other shapes)
/// * `feather_px` - Feather band width in pixels (ignored for rectangles)
///
/// # Example (TypeScript)
///
/// ```typescript
/// // Feathered circular headshot crop
/// const cropped = commit_crop(source, 125, 125, 750, 750, 1, 0, 12);
/// ```
#[wasm_bindgen]
#[allow(clippy::too_many_arguments)]
pub fn commit_crop(
    image: &JsImageBuffer,
    x: i32,
    y: i32,
    w: u32,
    h: u32,
    shape: u8,
    angle_deg: f64,
    feather_px: f64,
) -> JsImageBuffer {
    let crop = CropState {
        rect: CropRect::new(x, y, w, h),
        shape: shape_from_u8(shape),
        angle_deg,
        feather_px,
    };
    let result = core_commit(&image.to_core(), &crop);
    JsImageBuffer::from_core(result)
}
