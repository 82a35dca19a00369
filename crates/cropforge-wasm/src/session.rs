//! Stateful editor session binding.
//!
//! `JsEditorSession` keeps the loaded image, crop state, adjustment settings
//! and undo/redo history inside WASM memory; the host only sends pointer
//! events and reads back buffers when it needs to draw. This avoids copying
//! pixels across the boundary on every drag move.

use crate::adjustments::AdjustmentSettings;
use crate::types::{handle_from_u8, scope_from_u8, shape_from_u8, JsImageBuffer};
use cropforge_core::buffer::AlphaMatte;
use cropforge_core::matte::{MatteError, MattingEngine};
use cropforge_core::{AspectRatio, CropShape, EditorSession, ImageBuffer};
use wasm_bindgen::prelude::*;

/// Report a binding-level failure to the host.
///
/// Goes to the browser console in WASM builds and to stderr in native test
/// builds, where the imported console functions are not callable.
fn report_error(message: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::error_1(&message.into());
    #[cfg(not(target_arch = "wasm32"))]
    eprintln!("{message}");
}

/// Matting adapter: the JS host runs the model and hands the finished matte
/// in, so the "engine" just returns it.
struct ProvidedMatte(AlphaMatte);

impl MattingEngine for ProvidedMatte {
    fn infer_matte(
        &self,
        _image: &ImageBuffer,
        _target_size: u32,
    ) -> Result<AlphaMatte, MatteError> {
        Ok(self.0.clone())
    }
}

/// Interactive editing session for JavaScript.
#[wasm_bindgen]
pub struct JsEditorSession {
    inner: EditorSession,
}

impl Default for JsEditorSession {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl JsEditorSession {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            inner: EditorSession::new(),
        }
    }

    // ===== Image lifecycle =====

    /// Load an image from RGBA pixel data, resetting crop, adjustments and
    /// history.
    pub fn load_image(&mut self, width: u32, height: u32, pixels: Vec<u8>) {
        if pixels.len() != width as usize * height as usize * 4 {
            report_error("load_image: pixel buffer size mismatch");
            return;
        }
        self.inner.load_image(ImageBuffer::new(width, height, pixels));
    }

    /// Drop the loaded image and all per-image state.
    pub fn unload(&mut self) {
        self.inner.unload();
    }

    /// Whether an image is loaded.
    pub fn has_image(&self) -> bool {
        self.inner.state().current().is_some()
    }

    /// The current (latest committed) buffer, or undefined if none loaded.
    pub fn current_image(&self) -> Option<JsImageBuffer> {
        self.inner
            .state()
            .current()
            .map(|b| JsImageBuffer::from_core(b.clone()))
    }

    // ===== Pointer events =====

    /// Begin a drag gesture. Handle numbering: 0 = Move, 1 = North,
    /// 2 = South, 3 = East, 4 = West, 5 = NorthEast, 6 = NorthWest,
    /// 7 = SouthEast, 8 = SouthWest, 9 = Rotate.
    pub fn pointer_down(&mut self, handle: u8, x: f64, y: f64) {
        self.inner.pointer_down(handle_from_u8(handle), x, y);
    }

    /// Update the active gesture with a pointer position in image space.
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.inner.pointer_move(x, y);
    }

    /// End the active gesture.
    pub fn pointer_up(&mut self) {
        self.inner.pointer_up();
    }

    // ===== Crop state =====

    /// Switch the crop shape (0 = Rectangle, 1 = Circle, 2 = Ellipse).
    pub fn set_shape(&mut self, shape: u8) {
        self.inner.set_shape(shape_from_u8(shape));
    }

    /// Select an aspect ratio as `width / height`; pass 0 or a negative
    /// value for free-form cropping.
    pub fn set_aspect_ratio(&mut self, ratio: f64) {
        let aspect = if ratio > 0.0 && ratio.is_finite() {
            AspectRatio::Custom(ratio)
        } else {
            AspectRatio::Free
        };
        self.inner.set_aspect(aspect);
    }

    /// Set the feather radius in pixels.
    pub fn set_feather(&mut self, feather_px: f64) {
        self.inner.set_feather(feather_px);
    }

    /// Set the ellipse rotation directly, in degrees.
    pub fn set_angle(&mut self, angle_deg: f64) {
        self.inner.set_angle(angle_deg);
    }

    #[wasm_bindgen(getter)]
    pub fn crop_x(&self) -> i32 {
        self.inner.state().crop.rect.x
    }

    #[wasm_bindgen(getter)]
    pub fn crop_y(&self) -> i32 {
        self.inner.state().crop.rect.y
    }

    #[wasm_bindgen(getter)]
    pub fn crop_w(&self) -> u32 {
        self.inner.state().crop.rect.w
    }

    #[wasm_bindgen(getter)]
    pub fn crop_h(&self) -> u32 {
        self.inner.state().crop.rect.h
    }

    #[wasm_bindgen(getter)]
    pub fn crop_shape(&self) -> u8 {
        match self.inner.state().crop.shape {
            CropShape::Rectangle => 0,
            CropShape::Circle => 1,
            CropShape::Ellipse => 2,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn crop_angle(&self) -> f64 {
        self.inner.state().crop.angle_deg
    }

    #[wasm_bindgen(getter)]
    pub fn crop_feather(&self) -> f64 {
        self.inner.state().crop.feather_px
    }

    /// Whether a crop has been committed since load.
    #[wasm_bindgen(getter)]
    pub fn cropped(&self) -> bool {
        self.inner.state().cropped
    }

    // ===== Commits and adjustments =====

    /// Commit the active crop; the result becomes the new source. Returns
    /// false (a no-op) when no image is loaded.
    pub fn commit_crop(&mut self) -> bool {
        self.inner.commit_crop()
    }

    /// Replace the adjustment parameters.
    pub fn set_adjustments(&mut self, settings: &AdjustmentSettings) {
        self.inner.set_settings(settings.to_core());
    }

    /// Apply the current adjustment settings to the preserved original and
    /// return the result, or undefined when no image is loaded.
    pub fn adjusted_preview(&self) -> Option<JsImageBuffer> {
        self.inner.adjusted().map(JsImageBuffer::from_core)
    }

    /// Composite a host-computed alpha matte into the current buffer.
    ///
    /// The matte may be at inference resolution; it is resized to the image.
    /// Returns false and reports to the console on failure, leaving the
    /// session state untouched.
    pub fn apply_matte(&mut self, width: u32, height: u32, alpha: Vec<u8>) -> bool {
        if alpha.len() != width as usize * height as usize {
            report_error("apply_matte: matte buffer size mismatch");
            return false;
        }
        let engine = ProvidedMatte(AlphaMatte::new(width, height, alpha));
        match self.inner.apply_matte(&engine, width.max(height)) {
            Ok(applied) => applied,
            Err(err) => {
                report_error(&format!("apply_matte: {err}"));
                false
            }
        }
    }

    // ===== History =====

    /// Undo the latest entry in a scope (0 = Crop, 1 = Matte).
    pub fn undo(&mut self, scope: u8) -> bool {
        self.inner.undo(scope_from_u8(scope))
    }

    /// Redo the latest undone entry in a scope.
    pub fn redo(&mut self, scope: u8) -> bool {
        self.inner.redo(scope_from_u8(scope))
    }

    pub fn can_undo(&self, scope: u8) -> bool {
        self.inner.can_undo(scope_from_u8(scope))
    }

    pub fn can_redo(&self, scope: u8) -> bool {
        self.inner.can_redo(scope_from_u8(scope))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_with(width: u32, height: u32) -> JsEditorSession {
        let mut session = JsEditorSession::new();
        let mut pixels = vec![100u8; (width * height) as usize * 4];
        for chunk in pixels.chunks_exact_mut(4) {
            chunk[3] = 255;
        }
        session.load_image(width, height, pixels);
        session
    }

    #[test]
    fn test_load_and_query() {
        let session = session_with(100, 100);
        assert!(session.has_image());
        assert_eq!(session.crop_w(), 90);
        assert_eq!(session.crop_h(), 90);
        assert!(!session.cropped());
    }

    #[test]
    fn test_load_rejects_bad_buffer() {
        let mut session = JsEditorSession::new();
        session.load_image(10, 10, vec![0u8; 7]);
        assert!(!session.has_image());
    }

    #[test]
    fn test_drag_and_commit_round_trip() {
        let mut session = session_with(100, 100);
        session.pointer_down(0, 50.0, 50.0); // Move
        session.pointer_move(60.0, 50.0);
        session.pointer_up();

        assert!(session.commit_crop());
        assert!(session.cropped());
        assert_eq!(session.current_image().unwrap().width(), 90);
        assert!(session.can_undo(0));

        assert!(session.undo(0));
        assert!(!session.cropped());
        assert_eq!(session.current_image().unwrap().width(), 100);
        assert!(session.redo(0));
        assert!(session.cropped());
    }

    #[test]
    fn test_shape_and_aspect() {
        let mut session = session_with(200, 100);
        session.set_aspect_ratio(1.0);
        assert_eq!(session.crop_w(), session.crop_h());

        session.set_shape(1); // Circle
        assert_eq!(session.crop_shape(), 1);
        assert_eq!(session.crop_w(), session.crop_h());
    }

    #[test]
    fn test_adjusted_preview() {
        let mut session = session_with(10, 10);
        let mut settings = AdjustmentSettings::new();
        settings.set_brightness(50.0);
        session.set_adjustments(&settings);

        let preview = session.adjusted_preview().unwrap();
        assert_eq!(preview.pixels()[0], 150);
    }

    #[test]
    fn test_apply_matte_binding() {
        let mut session = session_with(8, 8);
        let applied = session.apply_matte(4, 4, vec![128; 16]);
        assert!(applied);
        assert!(session.can_undo(1));

        let current = session.current_image().unwrap();
        assert_eq!(current.pixels()[3], 128);
    }

    #[test]
    fn test_apply_matte_rejects_bad_buffer() {
        let mut session = session_with(8, 8);
        assert!(!session.apply_matte(4, 4, vec![128; 3]));
        assert!(!session.can_undo(1));
    }
}
