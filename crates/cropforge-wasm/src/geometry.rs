//! WASM bindings for the crop geometry kernel.
//!
//! These are thin stateless wrappers for hosts that render their own crop
//! overlay and only need the constrained math. Hosts that want the full
//! drag state machine should use `JsEditorSession` instead.

use crate::types::handle_from_u8;
use cropforge_core::geometry::{
    self, ellipse_bounding_box, initial_crop, rotate::rotate_from_pointer, CropRect,
};
use wasm_bindgen::prelude::*;

/// A crop rectangle in source-image pixel space.
#[wasm_bindgen]
#[derive(Clone, Copy)]
pub struct JsCropRect {
    x: i32,
    y: i32,
    w: u32,
    h: u32,
}

#[wasm_bindgen]
impl JsCropRect {
    #[wasm_bindgen(constructor)]
    pub fn new(x: i32, y: i32, w: u32, h: u32) -> JsCropRect {
        JsCropRect { x, y, w, h }
    }

    #[wasm_bindgen(getter)]
    pub fn x(&self) -> i32 {
        self.x
    }

    #[wasm_bindgen(getter)]
    pub fn y(&self) -> i32 {
        self.y
    }

    #[wasm_bindgen(getter)]
    pub fn w(&self) -> u32 {
        self.w
    }

    #[wasm_bindgen(getter)]
    pub fn h(&self) -> u32 {
        self.h
    }
}

impl JsCropRect {
    pub(crate) fn from_core(rect: CropRect) -> Self {
        Self {
            x: rect.x,
            y: rect.y,
            w: rect.w,
            h: rect.h,
        }
    }

    pub(crate) fn to_core(self) -> CropRect {
        CropRect::new(self.x, self.y, self.w, self.h)
    }
}

/// Shift a crop rectangle, clamped inside the image.
#[wasm_bindgen]
pub fn translate_crop(
    rect: &JsCropRect,
    dx: i32,
    dy: i32,
    img_w: u32,
    img_h: u32,
) -> JsCropRect {
    JsCropRect::from_core(geometry::translate(rect.to_core(), dx, dy, img_w, img_h))
}

/// Resize a crop rectangle by a handle with independent edges.
///
/// `handle` uses the numbering documented on the session bindings
/// (0 = Move, 1-8 = edges/corners, 9 = Rotate).
#[wasm_bindgen]
pub fn resize_crop(
    rect: &JsCropRect,
    handle: u8,
    dx: i32,
    dy: i32,
    img_w: u32,
    img_h: u32,
) -> JsCropRect {
    JsCropRect::from_core(geometry::resize_free(
        rect.to_core(),
        handle_from_u8(handle),
        dx,
        dy,
        img_w,
        img_h,
    ))
}

/// Resize a crop rectangle by a handle, preserving `aspect = w / h`.
#[wasm_bindgen]
pub fn resize_crop_with_aspect(
    rect: &JsCropRect,
    handle: u8,
    dx: i32,
    dy: i32,
    aspect: f64,
    img_w: u32,
    img_h: u32,
) -> JsCropRect {
    JsCropRect::from_core(geometry::resize_with_aspect(
        rect.to_core(),
        handle_from_u8(handle),
        dx,
        dy,
        aspect,
        img_w,
        img_h,
    ))
}

/// Force a crop rectangle into the inscribed square for a circle crop.
#[wasm_bindgen]
pub fn enforce_circle_crop(rect: &JsCropRect, img_w: u32, img_h: u32) -> JsCropRect {
    JsCropRect::from_core(geometry::enforce_circle(rect.to_core(), img_w, img_h))
}

/// Centered default crop for a freshly loaded image.
///
/// Pass `aspect <= 0` for free-form cropping.
#[wasm_bindgen]
pub fn initial_crop_rect(img_w: u32, img_h: u32, aspect: f64) -> JsCropRect {
    let aspect = if aspect > 0.0 && aspect.is_finite() {
        Some(aspect)
    } else {
        None
    };
    JsCropRect::from_core(initial_crop(img_w, img_h, aspect))
}

/// New rotation angle for a rotate gesture, snapped and normalized.
///
/// Pointer angles are in radians around the crop center; the result is in
/// degrees within [0, 360).
#[wasm_bindgen]
pub fn rotate_crop_angle(
    pointer_angle: f64,
    start_pointer_angle: f64,
    start_angle_deg: f64,
) -> f64 {
    rotate_from_pointer(pointer_angle, start_pointer_angle, start_angle_deg)
}

/// Axis-aligned `[width, height]` of an ellipse with semi-axes `rx, ry`
/// rotated by `angle_rad`.
#[wasm_bindgen]
pub fn ellipse_bounds(rx: f64, ry: f64, angle_rad: f64) -> Vec<f64> {
    let (w, h) = ellipse_bounding_box(rx, ry, angle_rad);
    vec![w, h]
}
