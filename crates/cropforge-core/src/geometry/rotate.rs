//! Rotation gestures and rotated-ellipse bounds.
//!
//! Rotation is driven by the pointer's angle around the crop center: the
//! difference between the current and gesture-start pointer angles is added
//! to the gesture-start rotation, snapped to 15-degree stops when close, and
//! normalized into [0, 360). Rotation never changes the bounding rectangle.

use std::f64::consts::{PI, TAU};

/// Angle multiple the rotation gesture snaps to, in degrees.
pub const SNAP_STEP_DEG: f64 = 15.0;

/// Maximum distance from a snap stop that still snaps, in degrees.
pub const SNAP_TOLERANCE_DEG: f64 = 3.0;

/// Normalize an angle in degrees into [0, 360).
#[inline]
pub fn normalize_degrees(deg: f64) -> f64 {
    let d = deg % 360.0;
    if d < 0.0 {
        d + 360.0
    } else {
        d
    }
}

/// Normalize an angle in radians into [-PI, PI].
#[inline]
fn normalize_radians_signed(rad: f64) -> f64 {
    let mut d = rad % TAU;
    if d > PI {
        d -= TAU;
    } else if d < -PI {
        d += TAU;
    }
    d
}

/// Angle of the pointer around a center point, in radians.
#[inline]
pub fn pointer_angle(cx: f64, cy: f64, px: f64, py: f64) -> f64 {
    (py - cy).atan2(px - cx)
}

/// Compute the new rotation angle for a rotate gesture.
///
/// `pointer_angle` and `start_pointer_angle` are in radians (as returned by
/// [`pointer_angle`]); `start_angle_deg` is the rotation at gesture start.
/// The pointer delta is normalized into [-PI, PI] so the gesture never jumps
/// when the pointer crosses the atan2 seam. The result snaps to the nearest
/// multiple of 15 degrees when within 3 degrees of it and is normalized into
/// [0, 360). Non-finite pointer angles leave the rotation unchanged.
pub fn rotate_from_pointer(
    pointer_angle: f64,
    start_pointer_angle: f64,
    start_angle_deg: f64,
) -> f64 {
    if !pointer_angle.is_finite() || !start_pointer_angle.is_finite() {
        return normalize_degrees(start_angle_deg);
    }

    let delta = normalize_radians_signed(pointer_angle - start_pointer_angle);
    let raw = normalize_degrees(start_angle_deg + delta.to_degrees());

    normalize_degrees(snap_angle(raw))
}

/// Snap to the nearest multiple of [`SNAP_STEP_DEG`] when within tolerance.
fn snap_angle(deg: f64) -> f64 {
    let nearest = (deg / SNAP_STEP_DEG).round() * SNAP_STEP_DEG;
    if (deg - nearest).abs() <= SNAP_TOLERANCE_DEG {
        nearest
    } else {
        deg
    }
}

/// Axis-aligned bounding box of an ellipse with semi-axes `rx, ry` rotated
/// by `angle_rad`.
///
/// Derived from the rotated-ellipse extremum formula:
/// `w = 2 * sqrt((rx*cos)^2 + (ry*sin)^2)`, `h` with the axes swapped. Used
/// to size the crop's canvas so no rotated content is lost.
pub fn ellipse_bounding_box(rx: f64, ry: f64, angle_rad: f64) -> (f64, f64) {
    let cos = angle_rad.cos();
    let sin = angle_rad.sin();
    let w = 2.0 * ((rx * cos).powi(2) + (ry * sin).powi(2)).sqrt();
    let h = 2.0 * ((rx * sin).powi(2) + (ry * cos).powi(2)).sqrt();
    (w, h)
}
