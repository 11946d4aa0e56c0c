use crate::foundation::core::{Affine, Canvas, Vec2};

/// Uniform scale and centering offset that fit an image inside a padded canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FitPlacement {
    pub scale: f64,
    pub offset: Vec2,
    /// Image size after scaling, in surface pixels.
    pub size: Vec2,
}

impl FitPlacement {
    /// Image-space to surface-space transform.
    pub fn to_affine(self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.scale)
    }
}

/// Fit an `image_w` x `image_h` image into `canvas` minus `padding` (total, both sides).
///
/// The same factor is applied to both axes, so aspect ratio is preserved; images smaller
/// than the padded area are scaled up.
pub fn fit_centered(canvas: Canvas, image_w: u32, image_h: u32, padding: f64) -> FitPlacement {
    let cw = f64::from(canvas.width);
    let ch = f64::from(canvas.height);
    let iw = f64::from(image_w.max(1));
    let ih = f64::from(image_h.max(1));

    let scale = ((cw - padding) / iw).min((ch - padding) / ih).max(0.0);
    let size = Vec2::new(iw * scale, ih * scale);
    let offset = Vec2::new((cw - size.x) / 2.0, (ch - size.y) / 2.0);

    FitPlacement {
        scale,
        offset,
        size,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mask/fit.rs"]
mod tests;
