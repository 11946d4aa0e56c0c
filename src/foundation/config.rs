use std::path::Path;

use anyhow::Context;

use crate::foundation::core::{Canvas, Rgba8};
use crate::foundation::error::{PaleoError, PaleoResult};

/// Tuning knobs for a painting studio.
///
/// Defaults reproduce the classic coloring-book layout: a 1000x650 surface, a 150 px
/// margin around the silhouette, a threshold 5% below mean luminance and a gray guide.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StudioConfig {
    pub canvas: Canvas,
    /// Total margin (both sides summed) kept free around the fitted image.
    pub padding_px: f64,
    pub threshold_factor: f64,
    pub guide_color: Rgba8,
    pub palette: Vec<Rgba8>,
    pub brush_sizes: Vec<f64>,
    pub default_color_index: usize,
    pub default_size_index: usize,
    pub completion_xp: u32,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas {
                width: 1000,
                height: 650,
            },
            padding_px: 150.0,
            threshold_factor: 0.95,
            guide_color: Rgba8::opaque(0x6B, 0x72, 0x80),
            palette: vec![
                Rgba8::opaque(0x9C, 0x42, 0x21),
                Rgba8::opaque(0xF4, 0xD0, 0x3F),
                Rgba8::opaque(0x29, 0x80, 0xB9),
                Rgba8::opaque(0x27, 0xAE, 0x60),
                Rgba8::opaque(0x8E, 0x44, 0xAD),
                Rgba8::opaque(0xE6, 0x7E, 0x22),
                Rgba8::opaque(0x00, 0x00, 0x00),
                Rgba8::opaque(0xFF, 0xFF, 0xFF),
            ],
            brush_sizes: vec![8.0, 12.0, 20.0, 32.0],
            default_color_index: 4,
            default_size_index: 1,
            completion_xp: 150,
        }
    }
}

impl StudioConfig {
    pub fn from_json_file(path: &Path) -> PaleoResult<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read config '{}'", path.display()))?;
        let cfg: Self =
            serde_json::from_slice(&bytes).map_err(|e| PaleoError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Apply `PALEO_PADDING_PX` and `PALEO_THRESHOLD_FACTOR` when set and parseable.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(v) = std::env::var("PALEO_PADDING_PX")
            .ok()
            .and_then(|v| v.parse::<f64>().ok())
            .filter(|v| v.is_finite() && *v >= 0.0)
        {
            self.padding_px = v;
        }
        if let Some(v) = std::env::var("PALEO_THRESHOLD_FACTOR")
            .ok()
            .and_then(|v| v.parse::<f64>().ok())
            .filter(|v| v.is_finite() && *v > 0.0)
        {
            self.threshold_factor = v;
        }
        self
    }

    pub fn validate(&self) -> PaleoResult<()> {
        Canvas::new(self.canvas.width, self.canvas.height)?;
        if !self.padding_px.is_finite() || self.padding_px < 0.0 {
            return Err(PaleoError::validation("padding_px must be finite and >= 0"));
        }
        if self.padding_px >= f64::from(self.canvas.width.min(self.canvas.height)) {
            return Err(PaleoError::validation(
                "padding_px must leave room for the silhouette",
            ));
        }
        if !self.threshold_factor.is_finite() || self.threshold_factor <= 0.0 {
            return Err(PaleoError::validation(
                "threshold_factor must be finite and > 0",
            ));
        }
        if self.palette.is_empty() {
            return Err(PaleoError::validation("palette must not be empty"));
        }
        if self.brush_sizes.is_empty() {
            return Err(PaleoError::validation("brush_sizes must not be empty"));
        }
        if self.default_color_index >= self.palette.len() {
            return Err(PaleoError::validation("default_color_index out of range"));
        }
        if self.default_size_index >= self.brush_sizes.len() {
            return Err(PaleoError::validation("default_size_index out of range"));
        }
        Ok(())
    }

    pub fn default_color(&self) -> Rgba8 {
        self.palette
            .get(self.default_color_index)
            .copied()
            .unwrap_or(Rgba8::opaque(0, 0, 0))
    }

    pub fn default_size(&self) -> f64 {
        self.brush_sizes
            .get(self.default_size_index)
            .copied()
            .unwrap_or(12.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;
