//! Cropforge Core - Image editing engine
//!
//! This crate provides the processing core for Cropforge: the interactive
//! crop geometry kernel, feathered mask generation and compositing, the
//! non-destructive adjustment pipeline, scoped undo/redo history, and the
//! pointer-driven editor session that ties them together.
//!
//! The engine operates purely on in-memory RGBA buffers; decoding, encoding
//! and UI rendering belong to the host.

pub mod adjust;
pub mod buffer;
pub mod compose;
pub mod geometry;
pub mod histogram;
pub mod history;
pub mod mask;
pub mod matte;
pub mod session;

pub use adjust::apply_adjustments;
pub use buffer::{AlphaMatte, ImageBuffer};
pub use compose::commit_crop;
pub use geometry::{AspectRatio, CropRect, CropShape, CropState, Handle};
pub use history::{EditHistory, EditScope, EditSnapshot, HistoryEntry};
pub use mask::EllipseMask;
pub use matte::{MatteError, MattingEngine};
pub use session::{DragPhase, DragState, EditorSession, EditorState};

/// Non-destructive adjustment parameters.
///
/// The nine parameters are independent of each other: applying them is a
/// pure function of `(original, settings)`, never of previously adjusted
/// pixels, so repeated changes cannot accumulate rounding drift.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AdjustmentSettings {
    /// Brightness (-100 to 100, neutral 0)
    pub brightness: f32,
    /// Contrast (-100 to 100, neutral 0); pivots around mid-gray
    pub contrast: f32,
    /// Saturation (-100 to 100, neutral 0)
    pub saturation: f32,
    /// Highlights (-100 to 100, neutral 0); bright tones only
    pub highlights: f32,
    /// Shadows (-100 to 100, neutral 0); dark tones only
    pub shadows: f32,
    /// Whites (-100 to 100, neutral 0); extreme bright tones
    pub whites: f32,
    /// Blacks (-100 to 100, neutral 0); extreme dark tones
    pub blacks: f32,
    /// Sharpness (0 to 200, neutral 100)
    pub sharpness: f32,
    /// Vignette strength (0 to 100, neutral 0)
    pub vignette: f32,
}

impl Default for AdjustmentSettings {
    fn default() -> Self {
        Self {
            brightness: 0.0,
            contrast: 0.0,
            saturation: 0.0,
            highlights: 0.0,
            shadows: 0.0,
            whites: 0.0,
            blacks: 0.0,
            sharpness: 100.0,
            vignette: 0.0,
        }
    }
}

impl AdjustmentSettings {
    /// Create a new AdjustmentSettings with neutral values
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if all values are at their neutral defaults
    pub fn is_neutral(&self) -> bool {
        *self == Self::default()
    }
}

/// Histogram data for an image
#[derive(Debug, Clone)]
pub struct Histogram {
    /// Red channel histogram (256 bins)
    pub red: [u32; 256],
    /// Green channel histogram (256 bins)
    pub green: [u32; 256],
    /// Blue channel histogram (256 bins)
    pub blue: [u32; 256],
    /// Luminance histogram (256 bins)
    pub luminance: [u32; 256],
}

impl Default for Histogram {
    fn default() -> Self {
        Self {
            red: [0; 256],
            green: [0; 256],
            blue: [0; 256],
            luminance: [0; 256],
        }
    }
}

impl Histogram {
    /// Create a new empty histogram
    pub fn new() -> Self {
        Self::default()
    }

    /// Find the maximum value across all channels for normalization
    pub fn max_value(&self) -> u32 {
        let max_r = *self.red.iter().max().unwrap_or(&0);
        let max_g = *self.green.iter().max().unwrap_or(&0);
        let max_b = *self.blue.iter().max().unwrap_or(&0);
        max_r.max(max_g).max(max_b)
    }

    /// Check for highlight clipping (values at 255)
    pub fn has_highlight_clipping(&self) -> bool {
        self.red[255] > 0 || self.green[255] > 0 || self.blue[255] > 0
    }

    /// Check for shadow clipping (values at 0)
    pub fn has_shadow_clipping(&self) -> bool {
        self.red[0] > 0 || self.green[0] > 0 || self.blue[0] > 0
    }
}
