//! Background-matting collaborator seam.
//!
//! Matting itself is an external collaborator: something hands the current
//! pixel buffer to a model at a target inference size and gets an alpha
//! matte back (or fails). This module only defines that seam and consumes
//! the result — upsampling the matte to image size and multiplying it into
//! the alpha channel.

use thiserror::Error;

use crate::buffer::{AlphaMatte, ImageBuffer, BYTES_PER_PIXEL};

/// Error types for the matting collaborator.
///
/// A matting failure is reported to the caller so the UI can surface it; it
/// never corrupts crop state or history.
#[derive(Debug, Error)]
pub enum MatteError {
    /// The collaborator's inference failed.
    #[error("matting engine failed: {0}")]
    Inference(String),

    /// The collaborator returned a zero-area matte.
    #[error("matting engine returned an empty matte")]
    EmptyMatte,
}

/// The external background-removal collaborator.
///
/// Implementations run whatever model they like; this core only requires
/// that the returned matte describe the given image (at any resolution).
pub trait MattingEngine {
    /// Compute an alpha matte for `image`, inferring at `target_size`.
    fn infer_matte(&self, image: &ImageBuffer, target_size: u32)
        -> Result<AlphaMatte, MatteError>;
}

/// Resize a matte to the given dimensions with bilinear interpolation.
///
/// Mattes usually arrive at the model's inference resolution; they are
/// upsampled here before compositing. Same-size input is returned as-is.
pub fn resize_matte(matte: &AlphaMatte, width: u32, height: u32) -> AlphaMatte {
    if matte.width == width && matte.height == height {
        return matte.clone();
    }
    if matte.is_empty() || width == 0 || height == 0 {
        return AlphaMatte::new(width, height, vec![0; (width * height) as usize]);
    }

    let mut alpha = Vec::with_capacity(width as usize * height as usize);
    let scale_x = matte.width as f64 / width as f64;
    let scale_y = matte.height as f64 / height as f64;

    for y in 0..height {
        for x in 0..width {
            // Map the destination pixel center into source space
            let sx = (x as f64 + 0.5) * scale_x - 0.5;
            let sy = (y as f64 + 0.5) * scale_y - 0.5;
            alpha.push(sample_bilinear(matte, sx, sy));
        }
    }

    AlphaMatte::new(width, height, alpha)
}

/// Sample a matte with bilinear interpolation, clamping at the edges.
fn sample_bilinear(matte: &AlphaMatte, x: f64, y: f64) -> u8 {
    let max_x = (matte.width - 1) as f64;
    let max_y = (matte.height - 1) as f64;
    let x = x.clamp(0.0, max_x);
    let y = y.clamp(0.0, max_y);

    let x0 = x.floor() as usize;
    let y0 = y.floor() as usize;
    let x1 = (x0 + 1).min(matte.width as usize - 1);
    let y1 = (y0 + 1).min(matte.height as usize - 1);

    // Fractional distances
    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    let w = matte.width as usize;
    let p00 = matte.alpha[y0 * w + x0] as f64;
    let p10 = matte.alpha[y0 * w + x1] as f64;
    let p01 = matte.alpha[y1 * w + x0] as f64;
    let p11 = matte.alpha[y1 * w + x1] as f64;

    let v = p00 * (1.0 - fx) * (1.0 - fy)
        + p10 * fx * (1.0 - fy)
        + p01 * (1.0 - fx) * fy
        + p11 * fx * fy;
    v.clamp(0.0, 255.0).round() as u8
}

/// Multiply a matte into an image's alpha channel.
///
/// The matte is resized to the image dimensions first if needed. RGB is
/// left untouched; compositing against a background is the host's job.
pub fn composite_matte(image: &ImageBuffer, matte: &AlphaMatte) -> ImageBuffer {
    if image.is_empty() {
        return image.clone();
    }

    let matte = if matte.width == image.width && matte.height == image.height {
        matte.clone()
    } else {
        resize_matte(matte, image.width, image.height)
    };

    let mut out = image.clone();
    for (chunk, m) in out
        .pixels
        .chunks_exact_mut(BYTES_PER_PIXEL)
        .zip(matte.alpha.iter())
    {
        chunk[3] = ((chunk[3] as u16 * *m as u16) / 255) as u8;
    }
    out
}
