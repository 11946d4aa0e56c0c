//! Mean-luminance thresholding that turns a photo into a binary subject mask.

const LUMA_R: f64 = 0.299;
const LUMA_G: f64 = 0.587;
const LUMA_B: f64 = 0.114;

/// Statistics of one thresholding pass.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ThresholdStats {
    pub mean_luminance: f64,
    pub threshold: f64,
    pub subject_pixels: usize,
    pub background_pixels: usize,
}

pub fn luminance(r: u8, g: u8, b: u8) -> f64 {
    f64::from(r) * LUMA_R + f64::from(g) * LUMA_G + f64::from(b) * LUMA_B
}

/// Mean luminance over every pixel of a straight-alpha RGBA buffer, alpha ignored.
pub fn mean_luminance(rgba: &[u8]) -> f64 {
    let count = rgba.len() / 4;
    if count == 0 {
        return 0.0;
    }
    let total: f64 = rgba
        .chunks_exact(4)
        .map(|px| luminance(px[0], px[1], px[2]))
        .sum();
    total / count as f64
}

/// Binarize `rgba` in place.
///
/// Pixels darker than `mean * factor` become opaque black (subject); all others get
/// alpha 0 (background). Color channels of background pixels are left as they were.
pub fn apply_adaptive_threshold(rgba: &mut [u8], factor: f64) -> ThresholdStats {
    let mean = mean_luminance(rgba);
    let threshold = mean * factor;

    let mut subject_pixels = 0usize;
    let mut background_pixels = 0usize;
    for px in rgba.chunks_exact_mut(4) {
        if luminance(px[0], px[1], px[2]) < threshold {
            px.copy_from_slice(&[0, 0, 0, 255]);
            subject_pixels += 1;
        } else {
            px[3] = 0;
            background_pixels += 1;
        }
    }

    ThresholdStats {
        mean_luminance: mean,
        threshold,
        subject_pixels,
        background_pixels,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mask/threshold.rs"]
mod tests;
