//! Crop geometry kernel.
//!
//! Pure functions over a crop rectangle in source-image pixel space. Every
//! operation takes the current image bounds and returns a rectangle that is
//! fully clamped inside `[0, W] x [0, H]` with dimensions of at least 1.
//!
//! # Coordinate System
//!
//! - (0, 0) = top-left corner of the image
//! - x grows right, y grows down
//! - Angles are in degrees, normalized to [0, 360)

pub mod resize;
pub mod rotate;

pub use resize::{
    clamp_to_bounds, enforce_circle, resize_free, resize_with_aspect, snap_to_aspect, translate,
};
pub use rotate::{ellipse_bounding_box, normalize_degrees, rotate_from_pointer};

use serde::{Deserialize, Serialize};

/// Fraction of the constraining dimension used for the initial crop.
const INITIAL_CROP_FRACTION: f64 = 0.9;

/// The crop's bounding rectangle in source-image pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropRect {
    /// Left edge, >= 0.
    pub x: i32,
    /// Top edge, >= 0.
    pub y: i32,
    /// Width, >= 1.
    pub w: u32,
    /// Height, >= 1.
    pub h: u32,
}

impl CropRect {
    pub fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// Right edge (exclusive).
    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w as i32
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h as i32
    }

    /// Center point in continuous coordinates.
    #[inline]
    pub fn center(&self) -> (f64, f64) {
        (
            self.x as f64 + self.w as f64 / 2.0,
            self.y as f64 + self.h as f64 / 2.0,
        )
    }
}

impl Default for CropRect {
    fn default() -> Self {
        Self {
            x: 0,
            y: 0,
            w: 1,
            h: 1,
        }
    }
}

/// Shape of the crop region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CropShape {
    /// Plain rectangular crop.
    #[default]
    Rectangle,
    /// Circular crop; the bounding rectangle is kept square.
    Circle,
    /// Elliptical crop, optionally rotated.
    Ellipse,
}

/// The full crop description: bounding rectangle, shape, rotation, feather.
///
/// `angle_deg` is meaningful only for [`CropShape::Ellipse`]; `feather_px`
/// only for non-rectangle shapes. Both are carried unconditionally so shape
/// switches do not lose slider values mid-session.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CropState {
    /// Bounding rectangle in source pixels.
    pub rect: CropRect,
    /// Shape of the region.
    pub shape: CropShape,
    /// Rotation in degrees, normalized to [0, 360).
    pub angle_deg: f64,
    /// Feather radius in pixels, >= 0.
    pub feather_px: f64,
}

impl CropState {
    /// A rectangular crop covering the whole image.
    pub fn full_extent(width: u32, height: u32) -> Self {
        Self {
            rect: CropRect::new(0, 0, width.max(1), height.max(1)),
            shape: CropShape::Rectangle,
            angle_deg: 0.0,
            feather_px: 0.0,
        }
    }
}

/// A named anchor manipulated by a drag gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Handle {
    /// Drag the whole rectangle.
    Move,
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
    /// Rotate around the rectangle center (ellipse only).
    Rotate,
}

impl Handle {
    /// True for the eight edge/corner resize handles.
    pub fn is_resize(&self) -> bool {
        !matches!(self, Handle::Move | Handle::Rotate)
    }

    /// Whether this handle moves the left, right, top or bottom edge.
    #[inline]
    pub(crate) fn edges(&self) -> (bool, bool, bool, bool) {
        match self {
            Handle::North => (false, false, true, false),
            Handle::South => (false, false, false, true),
            Handle::East => (false, true, false, false),
            Handle::West => (true, false, false, false),
            Handle::NorthEast => (false, true, true, false),
            Handle::NorthWest => (true, false, true, false),
            Handle::SouthEast => (false, true, false, true),
            Handle::SouthWest => (true, false, false, true),
            Handle::Move | Handle::Rotate => (false, false, false, false),
        }
    }
}

/// Crop aspect ratio presets.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum AspectRatio {
    #[default]
    Free,
    Square,
    ThreeByFour,
    FourByThree,
    SixteenByNine,
    /// Arbitrary width/height ratio supplied by the host.
    Custom(f64),
}

impl AspectRatio {
    /// Return the width/height ratio, or `None` for free-form cropping.
    pub fn ratio(&self) -> Option<f64> {
        match self {
            AspectRatio::Free => None,
            AspectRatio::Square => Some(1.0),
            AspectRatio::ThreeByFour => Some(3.0 / 4.0),
            AspectRatio::FourByThree => Some(4.0 / 3.0),
            AspectRatio::SixteenByNine => Some(16.0 / 9.0),
            AspectRatio::Custom(r) => {
                if r.is_finite() && *r > 0.0 {
                    Some(*r)
                } else {
                    None
                }
            }
        }
    }
}

/// Compute the default crop for a freshly loaded image.
///
/// The crop is centered and sized to 90% of the constraining dimension for
/// the active aspect ratio: `w = min(0.9*W, H*aspect)` then
/// `h = min(0.9*H, w/aspect)`. When the image itself is the binding
/// constraint the result can deviate from the exact target aspect; clamping
/// takes priority over aspect preservation.
pub fn initial_crop(img_w: u32, img_h: u32, aspect: Option<f64>) -> CropRect {
    let wf = img_w.max(1) as f64;
    let hf = img_h.max(1) as f64;

    let (w, h) = match aspect {
        Some(r) if r.is_finite() && r > 0.0 => {
            let w = (wf * INITIAL_CROP_FRACTION).min(hf * r);
            let h = (hf * INITIAL_CROP_FRACTION).min(w / r);
            (w, h)
        }
        _ => (wf * INITIAL_CROP_FRACTION, hf * INITIAL_CROP_FRACTION),
    };

    let w = (w.round() as u32).max(1).min(img_w.max(1));
    let h = (h.round() as u32).max(1).min(img_h.max(1));
    let x = ((wf - w as f64) / 2.0).round() as i32;
    let y = ((hf - h as f64) / 2.0).round() as i32;

    clamp_to_bounds(CropRect::new(x, y, w, h), img_w.max(1), img_h.max(1))
}
