//! Feathered alpha masks for round and elliptical crops.
//!
//! A mask covers the rotated ellipse's axis-aligned bounding box plus a
//! padding margin so the feather falloff is never clipped. Values are 1.0
//! strictly inside the ellipse, 0.0 strictly outside, and eased across a
//! band of width `feather_px` straddling the boundary, measured as signed
//! distance to the rotated ellipse curve along the ray from its center.

use crate::geometry::ellipse_bounding_box;

/// Smootherstep interpolation function.
///
/// Returns values from 0.0 to 1.0 with zero velocity and acceleration at
/// boundaries, producing smooth transitions without visible banding.
///
/// Formula: `6t^5 - 15t^4 + 10t^3`
#[inline]
pub fn smootherstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

/// Padding margin added on each side of the mask canvas, in pixels.
///
/// The literal `ceil(feather + 2)` formula leaves room for the feather band
/// plus the half-pixel sampling offsets at the canvas border.
pub fn feather_padding(feather_px: f64) -> u32 {
    (feather_px.max(0.0) + 2.0).ceil() as u32
}

/// An alpha mask sized to a padded, rotated ellipse bounding box.
#[derive(Debug, Clone)]
pub struct EllipseMask {
    /// Mask width in pixels.
    pub width: u32,
    /// Mask height in pixels.
    pub height: u32,
    /// Alpha values in row-major order, 0.0 (outside) to 1.0 (inside).
    pub alpha: Vec<f32>,
}

impl EllipseMask {
    /// Generate the mask for an ellipse with semi-axes `rx, ry` rotated by
    /// `angle_deg`, with a feather band of `feather_px` pixels.
    ///
    /// The canvas is the rotated bounding box plus [`feather_padding`] on
    /// each side; the ellipse is centered on the canvas. `feather_px = 0`
    /// degenerates to a hard edge at the ellipse boundary.
    pub fn generate(rx: f64, ry: f64, angle_deg: f64, feather_px: f64) -> Self {
        // Floor the radii so degenerate crops cannot divide by zero
        let rx = rx.max(0.5);
        let ry = ry.max(0.5);
        let feather = if feather_px.is_finite() {
            feather_px.max(0.0)
        } else {
            0.0
        };

        let angle = angle_deg.to_radians();
        let (bbox_w, bbox_h) = ellipse_bounding_box(rx, ry, angle);
        let pad = feather_padding(feather);
        let width = bbox_w.ceil() as u32 + 2 * pad;
        let height = bbox_h.ceil() as u32 + 2 * pad;

        let cx = width as f64 / 2.0;
        let cy = height as f64 / 2.0;
        let (cos_r, sin_r) = (angle.cos(), angle.sin());

        let mut alpha = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                // Sample at the pixel center, rotated into ellipse-local space
                let dx = x as f64 + 0.5 - cx;
                let dy = y as f64 + 0.5 - cy;
                let local_x = dx * cos_r + dy * sin_r;
                let local_y = -dx * sin_r + dy * cos_r;

                let d = signed_boundary_distance(local_x, local_y, rx, ry);
                alpha.push(feathered_alpha(d, feather));
            }
        }

        Self {
            width,
            height,
            alpha,
        }
    }

    /// Mask value at a pixel. Callers must stay in bounds.
    #[inline]
    pub fn value_at(&self, x: u32, y: u32) -> f32 {
        self.alpha[y as usize * self.width as usize + x as usize]
    }
}

/// Signed distance from a point (in ellipse-local space) to the ellipse
/// boundary, measured along the ray from the center. Negative inside.
#[inline]
fn signed_boundary_distance(local_x: f64, local_y: f64, rx: f64, ry: f64) -> f64 {
    let norm = ((local_x / rx).powi(2) + (local_y / ry).powi(2)).sqrt();
    if norm < 1e-9 {
        // At the center: as deep inside as the minor radius allows
        return -rx.min(ry);
    }
    let r_point = (local_x * local_x + local_y * local_y).sqrt();
    r_point - r_point / norm
}

/// Alpha for a signed boundary distance and feather width.
#[inline]
fn feathered_alpha(d: f64, feather: f64) -> f32 {
    if feather <= 0.0 {
        return if d <= 0.0 { 1.0 } else { 0.0 };
    }
    let t = ((d + feather / 2.0) / feather).clamp(0.0, 1.0) as f32;
    1.0 - smootherstep(t)
}
