use crate::{
    assets::SourceImage,
    foundation::config::StudioConfig,
    foundation::core::{Rect, Rgba8},
    foundation::error::PaleoResult,
    mask::fit::{FitPlacement, fit_centered},
    mask::threshold::{ThresholdStats, apply_adaptive_threshold},
    render::{CompositeMode, RasterSurface},
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MaskSettings {
    pub padding_px: f64,
    pub threshold_factor: f64,
    pub guide_color: Rgba8,
}

impl From<&StudioConfig> for MaskSettings {
    fn from(cfg: &StudioConfig) -> Self {
        Self {
            padding_px: cfg.padding_px,
            threshold_factor: cfg.threshold_factor,
            guide_color: cfg.guide_color,
        }
    }
}

impl Default for MaskSettings {
    fn default() -> Self {
        Self::from(&StudioConfig::default())
    }
}

/// Outcome of a successful masking pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MaskReport {
    pub placement: FitPlacement,
    pub stats: ThresholdStats,
}

/// Turns a decoded photo into the gray coloring-book silhouette on a surface.
#[derive(Clone, Debug, Default)]
pub struct SilhouetteMasker {
    settings: MaskSettings,
}

impl SilhouetteMasker {
    pub fn new(settings: MaskSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &MaskSettings {
        &self.settings
    }

    /// Clear `surface`, draw `image` fitted and centered, then binarize it.
    ///
    /// After success every pixel is either transparent or opaque guide color, and the
    /// surface is back in [`CompositeMode::SourceOver`]. Fails with
    /// `PaleoError::MaskProcessing` when the drawn pixels cannot be read back.
    #[tracing::instrument(skip(self, surface, image), fields(w = image.width, h = image.height))]
    pub fn render(&self, surface: &mut RasterSurface, image: &SourceImage) -> PaleoResult<MaskReport> {
        surface.set_composite_mode(CompositeMode::SourceOver);
        surface.clear();

        let placement = fit_centered(
            surface.canvas(),
            image.width,
            image.height,
            self.settings.padding_px,
        );
        surface.draw_image(image, placement.to_affine())?;

        let stats = self.binarize(surface)?;
        tracing::debug!(
            mean = stats.mean_luminance,
            threshold = stats.threshold,
            subject = stats.subject_pixels,
            "silhouette masked"
        );
        Ok(MaskReport { placement, stats })
    }

    /// Threshold whatever is on `surface` and recolor the subject to the guide color.
    pub fn binarize(&self, surface: &mut RasterSurface) -> PaleoResult<ThresholdStats> {
        let mut pixels = surface.read_pixels()?;
        let stats = apply_adaptive_threshold(&mut pixels, self.settings.threshold_factor);
        surface.write_pixels(&pixels)?;

        let canvas = surface.canvas();
        let full = Rect::new(
            0.0,
            0.0,
            f64::from(canvas.width),
            f64::from(canvas.height),
        );
        surface.set_composite_mode(CompositeMode::SourceIn);
        let filled = surface.fill_rect(full, self.settings.guide_color);
        surface.set_composite_mode(CompositeMode::SourceOver);
        filled?;

        Ok(stats)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mask/silhouette.rs"]
mod tests;
