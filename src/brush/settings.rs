use crate::foundation::config::StudioConfig;
use crate::foundation::core::Rgba8;
use crate::foundation::error::{PaleoError, PaleoResult};

pub const MIN_WIDTH: f64 = 1.0;
pub const MAX_WIDTH: f64 = 256.0;
pub const DEFAULT_WIDTH: f64 = 12.0;

/// Current stroke color and width.
///
/// Any width is accepted and clamped into `[MIN_WIDTH, MAX_WIDTH]`; non-finite widths
/// fall back to [`DEFAULT_WIDTH`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BrushSettings {
    color: Rgba8,
    width: f64,
}

impl Default for BrushSettings {
    fn default() -> Self {
        Self::from_config(&StudioConfig::default())
    }
}

impl BrushSettings {
    pub fn new(color: Rgba8, width: f64) -> Self {
        Self {
            color,
            width: sanitize_width(width),
        }
    }

    pub fn from_config(cfg: &StudioConfig) -> Self {
        Self::new(cfg.default_color(), cfg.default_size())
    }

    /// Pick by index from the configured palette and size set.
    pub fn from_palette(cfg: &StudioConfig, color_index: usize, size_index: usize) -> PaleoResult<Self> {
        let color = cfg.palette.get(color_index).copied().ok_or_else(|| {
            PaleoError::validation(format!("palette index {color_index} out of range"))
        })?;
        let width = cfg.brush_sizes.get(size_index).copied().ok_or_else(|| {
            PaleoError::validation(format!("brush size index {size_index} out of range"))
        })?;
        Ok(Self::new(color, width))
    }

    pub fn color(&self) -> Rgba8 {
        self.color
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn set_color(&mut self, color: Rgba8) {
        self.color = color;
    }

    pub fn set_width(&mut self, width: f64) {
        self.width = sanitize_width(width);
    }
}

fn sanitize_width(width: f64) -> f64 {
    if !width.is_finite() {
        return DEFAULT_WIDTH;
    }
    width.clamp(MIN_WIDTH, MAX_WIDTH)
}

#[cfg(test)]
#[path = "../../tests/unit/brush/settings.rs"]
mod tests;
