//! Adjustment settings WASM bindings.
//!
//! This module provides JavaScript bindings for the AdjustmentSettings type,
//! allowing the nine editing parameters to be manipulated from TypeScript,
//! plus the binding that runs the pipeline.

use crate::types::JsImageBuffer;
use cropforge_core::adjust::apply_adjustments as core_apply;
use wasm_bindgen::prelude::*;

/// Adjustment settings wrapper for JavaScript
#[wasm_bindgen]
pub struct AdjustmentSettings {
    inner: cropforge_core::AdjustmentSettings,
}

impl Default for AdjustmentSettings {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl AdjustmentSettings {
    /// Create new adjustment settings with neutral values
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            inner: cropforge_core::AdjustmentSettings::new(),
        }
    }

    /// Get brightness value
    #[wasm_bindgen(getter)]
    pub fn brightness(&self) -> f32 {
        self.inner.brightness
    }

    /// Set brightness value
    #[wasm_bindgen(setter)]
    pub fn set_brightness(&mut self, value: f32) {
        self.inner.brightness = value;
    }

    /// Get contrast value
    #[wasm_bindgen(getter)]
    pub fn contrast(&self) -> f32 {
        self.inner.contrast
    }

    /// Set contrast value
    #[wasm_bindgen(setter)]
    pub fn set_contrast(&mut self, value: f32) {
        self.inner.contrast = value;
    }

    /// Get saturation value
    #[wasm_bindgen(getter)]
    pub fn saturation(&self) -> f32 {
        self.inner.saturation
    }

    /// Set saturation value
    #[wasm_bindgen(setter)]
    pub fn set_saturation(&mut self, value: f32) {
        self.inner.saturation = value;
    }

    /// Get highlights value
    #[wasm_bindgen(getter)]
    pub fn highlights(&self) -> f32 {
        self.inner.highlights
    }

    /// Set highlights value
    #[wasm_bindgen(setter)]
    pub fn set_highlights(&mut self, value: f32) {
        self.inner.highlights = value;
    }

    /// Get shadows value
    #[wasm_bindgen(getter)]
    pub fn shadows(&self) -> f32 {
        self.inner.shadows
    }

    /// Set shadows value
    #[wasm_bindgen(setter)]
    pub fn set_shadows(&mut self, value: f32) {
        self.inner.shadows = value;
    }

    /// Get whites value
    #[wasm_bindgen(getter)]
    pub fn whites(&self) -> f32 {
        self.inner.whites
    }

    /// Set whites value
    #[wasm_bindgen(setter)]
    pub fn set_whites(&mut self, value: f32) {
        self.inner.whites = value;
    }

    /// Get blacks value
    #[wasm_bindgen(getter)]
    pub fn blacks(&self) -> f32 {
        self.inner.blacks
    }

    /// Set blacks value
    #[wasm_bindgen(setter)]
    pub fn set_blacks(&mut self, value: f32) {
        self.inner.blacks = value;
    }

    /// Get sharpness value (neutral at 100)
    #[wasm_bindgen(getter)]
    pub fn sharpness(&self) -> f32 {
        self.inner.sharpness
    }

    /// Set sharpness value
    #[wasm_bindgen(setter)]
    pub fn set_sharpness(&mut self, value: f32) {
        self.inner.sharpness = value;
    }

    /// Get vignette value
    #[wasm_bindgen(getter)]
    pub fn vignette(&self) -> f32 {
        self.inner.vignette
    }

    /// Set vignette value
    #[wasm_bindgen(setter)]
    pub fn set_vignette(&mut self, value: f32) {
        self.inner.vignette = value;
    }

    /// Check if all values are at their neutral defaults
    pub fn is_neutral(&self) -> bool {
        self.inner.is_neutral()
    }

    /// Reset all values to their neutral defaults
    pub fn reset(&mut self) {
        self.inner = cropforge_core::AdjustmentSettings::default();
    }
}

impl AdjustmentSettings {
    pub(crate) fn to_core(&self) -> cropforge_core::AdjustmentSettings {
        self.inner.clone()
    }
}

/// Apply adjustment settings to an image.
///
/// Always call this with the untouched original image: the pipeline is
/// designed to be recomputed from the original on every parameter change so
/// values never compound.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const settings = new AdjustmentSettings();
/// settings.brightness = 20;
/// settings.vignette = 40;
/// const preview = apply_adjustments(originalImage, settings);
/// ```
#[wasm_bindgen]
pub fn apply_adjustments(
    image: &JsImageBuffer,
    settings: &AdjustmentSettings,
) -> JsImageBuffer {
    let result = core_apply(&image.to_core(), &settings.to_core());
    JsImageBuffer::from_core(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_default_neutral() {
        let settings = AdjustmentSettings::new();
        assert!(settings.is_neutral());
        assert_eq!(settings.sharpness(), 100.0);
        assert_eq!(settings.brightness(), 0.0);
    }

    #[test]
    fn test_settings_setters() {
        let mut settings = AdjustmentSettings::new();
        settings.set_brightness(30.0);
        settings.set_vignette(50.0);
        assert_eq!(settings.brightness(), 30.0);
        assert_eq!(settings.vignette(), 50.0);
        assert!(!settings.is_neutral());
    }

    #[test]
    fn test_settings_reset() {
        let mut settings = AdjustmentSettings::new();
        settings.set_contrast(80.0);
        settings.reset();
        assert!(settings.is_neutral());
    }

    #[test]
    fn test_apply_neutral_identity() {
        let img = JsImageBuffer::new(2, 2, vec![128u8; 16]);
        let out = apply_adjustments(&img, &AdjustmentSettings::new());
        assert_eq!(out.pixels(), img.pixels());
    }

    #[test]
    fn test_apply_brightness() {
        let mut pixels = vec![100u8; 16];
        for chunk in pixels.chunks_exact_mut(4) {
            chunk[3] = 255;
        }
        let img = JsImageBuffer::new(2, 2, pixels);
        let mut settings = AdjustmentSettings::new();
        settings.set_brightness(50.0);
        let out = apply_adjustments(&img, &settings);
        assert_eq!(out.pixels()[0], 150);
    }
}
