//! Cropforge WASM - WebAssembly bindings for the Cropforge engine
//!
//! This crate exposes the cropforge-core functionality to
//! JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `session` - Stateful editor session (pointer events, commits, history)
//! - `geometry` - Stateless crop geometry helpers
//! - `adjustments` - Adjustment settings and the pixel pipeline
//! - `compose` - Crop compositing
//! - `mask` - Feathered ellipse mask generation
//! - `histogram` - Channel histograms for the edit view
//! - `types` - WASM-compatible wrapper types for image data
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsEditorSession } from '@cropforge/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const session = new JsEditorSession();
//! session.load_image(imageData.width, imageData.height,
//!                    new Uint8Array(imageData.data.buffer));
//! session.pointer_down(7, 640, 480); // drag the south-east handle
//! session.pointer_move(600, 440);
//! session.pointer_up();
//! session.commit_crop();
//! ```

use wasm_bindgen::prelude::*;

mod adjustments;
mod compose;
mod geometry;
mod histogram;
mod mask;
mod session;
mod types;

// Re-export public types
pub use adjustments::{apply_adjustments, AdjustmentSettings};
pub use compose::commit_crop;
pub use geometry::{
    ellipse_bounds, enforce_circle_crop, initial_crop_rect, resize_crop,
    resize_crop_with_aspect, rotate_crop_angle, translate_crop, JsCropRect,
};
pub use histogram::{compute_histogram, JsHistogram};
pub use mask::{generate_ellipse_mask, JsEllipseMask};
pub use session::JsEditorSession;
pub use types::JsImageBuffer;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    // Future: Set up panic hook for better error messages in browser console
    // when console_error_panic_hook feature is added
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
