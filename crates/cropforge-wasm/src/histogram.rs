//! WASM bindings for histogram computation.

use crate::types::JsImageBuffer;
use cropforge_core::histogram::compute_histogram as core_histogram;
use cropforge_core::Histogram;
use wasm_bindgen::prelude::*;

/// Histogram data wrapper for JavaScript.
#[wasm_bindgen]
pub struct JsHistogram {
    inner: Histogram,
}

#[wasm_bindgen]
impl JsHistogram {
    /// Red channel bins as Uint32Array (256 entries)
    pub fn red(&self) -> Vec<u32> {
        self.inner.red.to_vec()
    }

    /// Green channel bins as Uint32Array (256 entries)
    pub fn green(&self) -> Vec<u32> {
        self.inner.green.to_vec()
    }

    /// Blue channel bins as Uint32Array (256 entries)
    pub fn blue(&self) -> Vec<u32> {
        self.inner.blue.to_vec()
    }

    /// Luminance bins as Uint32Array (256 entries)
    pub fn luminance(&self) -> Vec<u32> {
        self.inner.luminance.to_vec()
    }

    /// Maximum bin value across the RGB channels, for display scaling
    pub fn max_value(&self) -> u32 {
        self.inner.max_value()
    }

    /// Whether any channel clips at pure white
    pub fn has_highlight_clipping(&self) -> bool {
        self.inner.has_highlight_clipping()
    }

    /// Whether any channel clips at pure black
    pub fn has_shadow_clipping(&self) -> bool {
        self.inner.has_shadow_clipping()
    }
}

/// Compute RGB and luminance histograms for an image.
///
/// Fully transparent pixels are skipped, so the cleared corners of a round
/// crop do not distort the shadow bins.
#[wasm_bindgen]
pub fn compute_histogram(image: &JsImageBuffer) -> JsHistogram {
    JsHistogram {
        inner: core_histogram(&image.to_core()),
    }
}
