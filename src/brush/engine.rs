use crate::{
    brush::settings::BrushSettings,
    foundation::core::Point,
    foundation::error::PaleoResult,
    render::{CompositeMode, RasterSurface},
};

/// Points of the gesture in progress, in surface pixels.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StrokeSession {
    points: Vec<Point>,
}

impl StrokeSession {
    fn start(at: Point) -> Self {
        Self { points: vec![at] }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn last(&self) -> Option<Point> {
        self.points.last().copied()
    }
}

/// Brush indicator that follows the pointer while it hovers the surface.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct CursorPreview {
    /// Unscaled position relative to the displayed surface.
    pub position: Point,
    pub visible: bool,
}

impl Default for CursorPreview {
    fn default() -> Self {
        Self {
            position: Point::new(-100.0, -100.0),
            visible: false,
        }
    }
}

/// Paints strokes that can only land on already-opaque pixels.
#[derive(Clone, Debug, Default)]
pub struct BrushEngine {
    settings: BrushSettings,
    stroke: Option<StrokeSession>,
    cursor: CursorPreview,
}

impl BrushEngine {
    pub fn new(settings: BrushSettings) -> Self {
        Self {
            settings,
            stroke: None,
            cursor: CursorPreview::default(),
        }
    }

    pub fn settings(&self) -> &BrushSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut BrushSettings {
        &mut self.settings
    }

    pub fn active_stroke(&self) -> Option<&StrokeSession> {
        self.stroke.as_ref()
    }

    pub fn is_drawing(&self) -> bool {
        self.stroke.is_some()
    }

    pub fn cursor(&self) -> CursorPreview {
        self.cursor
    }

    /// Start a stroke at `at` and clip all further paint to the existing mask.
    ///
    /// Nothing is painted until the first [`BrushEngine::extend_stroke`].
    pub fn begin_stroke(&mut self, surface: &mut RasterSurface, at: Point) {
        surface.set_composite_mode(CompositeMode::SourceAtop);
        self.stroke = Some(StrokeSession::start(at));
    }

    /// Paint a segment from the previous point to `to` when a stroke is active.
    ///
    /// Returns whether anything was painted.
    pub fn extend_stroke(&mut self, surface: &mut RasterSurface, to: Point) -> PaleoResult<bool> {
        let Some(stroke) = self.stroke.as_mut() else {
            return Ok(false);
        };
        let from = stroke.last().unwrap_or(to);
        stroke.points.push(to);

        surface.stroke_polyline(&[from, to], self.settings.width(), self.settings.color())?;
        Ok(true)
    }

    /// Finish the active stroke, if any. The committed pixels stay; the points are dropped.
    pub fn end_stroke(&mut self) -> Option<StrokeSession> {
        self.stroke.take()
    }

    pub fn hover(&mut self, viewport: Point) {
        self.cursor = CursorPreview {
            position: viewport,
            visible: true,
        };
    }

    pub fn show_cursor(&mut self) {
        self.cursor.visible = true;
    }

    pub fn hide_cursor(&mut self) {
        self.cursor.visible = false;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/brush/engine.rs"]
mod tests;
