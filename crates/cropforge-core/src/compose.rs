//! Crop compositing.
//!
//! Committing a crop produces a new pixel buffer: a straight rectangular
//! copy for rectangle crops, or a copy multiplied by a feathered ellipse
//! mask for round and elliptical crops. Committing is idempotent on its
//! inputs; the same `(source, crop)` pair always yields byte-identical
//! output.

use crate::buffer::{ImageBuffer, BYTES_PER_PIXEL};
use crate::geometry::{CropShape, CropState};
use crate::mask::EllipseMask;

/// Commit a crop against a source buffer.
///
/// The caller's crop rectangle is expected to be clamped inside the source
/// (the geometry kernel guarantees this), but the sampled region is clipped
/// against the source bounds anyway: partial overlap at image edges is legal
/// and must not panic. After a commit the caller should treat the returned
/// buffer as the new full-extent source.
pub fn commit_crop(source: &ImageBuffer, crop: &CropState) -> ImageBuffer {
    if source.is_empty() {
        return source.clone();
    }

    match crop.shape {
        CropShape::Rectangle => crop_rectangle(source, crop),
        CropShape::Circle | CropShape::Ellipse => crop_masked(source, crop),
    }
}

/// Direct pixel copy of the crop rectangle. No mask is involved.
fn crop_rectangle(source: &ImageBuffer, crop: &CropState) -> ImageBuffer {
    let rect = crop.rect;

    // Clip against the source; out-of-range rectangles shrink, never throw
    let x0 = rect.x.clamp(0, source.width.saturating_sub(1) as i32) as u32;
    let y0 = rect.y.clamp(0, source.height.saturating_sub(1) as i32) as u32;
    let x1 = (rect.right().max(0) as u32).min(source.width);
    let y1 = (rect.bottom().max(0) as u32).min(source.height);

    let out_w = x1.saturating_sub(x0).max(1);
    let out_h = y1.saturating_sub(y0).max(1);

    let mut output = vec![0u8; out_w as usize * out_h as usize * BYTES_PER_PIXEL];

    // Copy row by row
    for y in 0..out_h {
        let src_start = ((y0 + y) as usize * source.width as usize + x0 as usize) * BYTES_PER_PIXEL;
        let src_end = src_start + out_w as usize * BYTES_PER_PIXEL;
        let dst_start = y as usize * out_w as usize * BYTES_PER_PIXEL;
        let dst_end = dst_start + out_w as usize * BYTES_PER_PIXEL;
        output[dst_start..dst_end].copy_from_slice(&source.pixels[src_start..src_end]);
    }

    ImageBuffer::new(out_w, out_h, output)
}

/// Masked copy for circle and ellipse crops.
///
/// The output canvas is the padded, rotated bounding box of the ellipse,
/// centered on the crop rectangle's center. Pixels never covered by the
/// source stay fully transparent.
fn crop_masked(source: &ImageBuffer, crop: &CropState) -> ImageBuffer {
    let rect = crop.rect;
    let rx = rect.w as f64 / 2.0;
    let ry = rect.h as f64 / 2.0;
    let angle_deg = match crop.shape {
        CropShape::Ellipse => crop.angle_deg,
        _ => 0.0,
    };

    let mask = EllipseMask::generate(rx, ry, angle_deg, crop.feather_px);
    let out_w = mask.width;
    let out_h = mask.height;

    // Align the canvas center with the crop center in source space
    let (cx, cy) = rect.center();
    let origin_x = (cx - out_w as f64 / 2.0).round() as i32;
    let origin_y = (cy - out_h as f64 / 2.0).round() as i32;

    // Clip the sampled region; a negative origin shifts the draw origin
    let src_x_start = origin_x.max(0);
    let src_y_start = origin_y.max(0);
    let src_x_end = (origin_x + out_w as i32).min(source.width as i32);
    let src_y_end = (origin_y + out_h as i32).min(source.height as i32);

    let mut output = vec![0u8; out_w as usize * out_h as usize * BYTES_PER_PIXEL];

    for sy in src_y_start..src_y_end {
        let dy = (sy - origin_y) as u32;
        for sx in src_x_start..src_x_end {
            let dx = (sx - origin_x) as u32;

            let src_idx =
                (sy as usize * source.width as usize + sx as usize) * BYTES_PER_PIXEL;
            let dst_idx = (dy as usize * out_w as usize + dx as usize) * BYTES_PER_PIXEL;

            let coverage = mask.value_at(dx, dy);
            output[dst_idx] = source.pixels[src_idx];
            output[dst_idx + 1] = source.pixels[src_idx + 1];
            output[dst_idx + 2] = source.pixels[src_idx + 2];
            output[dst_idx + 3] =
                (source.pixels[src_idx + 3] as f32 * coverage).round() as u8;
        }
    }

    ImageBuffer::new(out_w, out_h, output)
}
