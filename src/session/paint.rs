use crate::{
    assets::decode::decode_fetched,
    assets::fetch::{FetchedImage, ImageFetcher, cache_bust_token, cache_busted_url},
    brush::{
        BrushEngine, BrushSettings, CursorPreview, DisplayRect, PointerCoords, PointerEvent,
        StrokeScript, coordinate_for,
    },
    catalog::Species,
    foundation::config::StudioConfig,
    foundation::core::Point,
    foundation::error::{PaleoError, PaleoResult},
    mask::{MaskReport, MaskSettings, SilhouetteMasker},
    render::{FrameRgba, RasterSurface},
    session::state::LoadState,
};

/// Ticket for one in-flight silhouette fetch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadRequest {
    pub generation: u64,
    pub species_id: String,
    /// Cache-busted URL to fetch.
    pub url: String,
}

/// Pointer input delivered to a session.
#[derive(Clone, Debug, PartialEq)]
pub enum CanvasEvent {
    PointerDown(PointerEvent),
    PointerMove(PointerEvent),
    PointerUp,
    PointerEnter,
    PointerLeave,
}

/// Result of finishing a painting.
#[derive(Clone, Debug)]
pub struct Finish {
    pub species_id: String,
    pub snapshot: FrameRgba,
    pub xp_delta: u32,
}

/// One species being painted: owns the surface, the masker, and the brush.
#[derive(Debug)]
pub struct PaintSession {
    config: StudioConfig,
    surface: RasterSurface,
    masker: SilhouetteMasker,
    brush: BrushEngine,
    state: LoadState,
    species: Option<Species>,
    generation: u64,
    last_mask: Option<MaskReport>,
}

impl PaintSession {
    pub fn new(config: StudioConfig) -> PaleoResult<Self> {
        config.validate()?;
        Ok(Self {
            surface: RasterSurface::new(config.canvas)?,
            masker: SilhouetteMasker::new(MaskSettings::from(&config)),
            brush: BrushEngine::new(BrushSettings::from_config(&config)),
            state: LoadState::Loading,
            species: None,
            generation: 0,
            last_mask: None,
            config,
        })
    }

    pub fn config(&self) -> &StudioConfig {
        &self.config
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn surface(&self) -> &RasterSurface {
        &self.surface
    }

    pub fn species(&self) -> Option<&Species> {
        self.species.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn last_mask(&self) -> Option<&MaskReport> {
        self.last_mask.as_ref()
    }

    pub fn brush(&self) -> &BrushSettings {
        self.brush.settings()
    }

    pub fn brush_mut(&mut self) -> &mut BrushSettings {
        self.brush.settings_mut()
    }

    pub fn is_drawing(&self) -> bool {
        self.brush.is_drawing()
    }

    /// Brush preview as it should be displayed; hidden unless the mask is ready.
    pub fn cursor(&self) -> CursorPreview {
        let mut cursor = self.brush.cursor();
        cursor.visible &= self.state.is_ready();
        cursor
    }

    /// Enter `Loading` for `species` and return the fetch to perform.
    ///
    /// Any earlier request becomes stale.
    pub fn begin_load(&mut self, species: &Species) -> LoadRequest {
        self.begin_load_with_token(species, cache_bust_token())
    }

    pub fn begin_load_with_token(&mut self, species: &Species, token: u64) -> LoadRequest {
        self.generation += 1;
        self.state = LoadState::Loading;
        self.brush.end_stroke();
        self.species = Some(species.clone());
        LoadRequest {
            generation: self.generation,
            species_id: species.id.clone(),
            url: cache_busted_url(&species.silhouette_url, token),
        }
    }

    /// Deliver the outcome of `request`'s fetch.
    ///
    /// Stale requests are ignored. Failures end in [`LoadState::Error`] with the
    /// player-facing message; they are never returned.
    pub fn complete_load(
        &mut self,
        request: &LoadRequest,
        fetched: PaleoResult<FetchedImage>,
    ) -> &LoadState {
        if request.generation != self.generation {
            tracing::debug!(
                stale = request.generation,
                current = self.generation,
                species = %request.species_id,
                "discarding stale silhouette load"
            );
            return &self.state;
        }

        let masked = fetched
            .and_then(|f| decode_fetched(&f))
            .and_then(|img| self.masker.render(&mut self.surface, &img));

        match masked {
            Ok(report) => {
                self.last_mask = Some(report);
                self.state = LoadState::Ready;
            }
            Err(err) => {
                tracing::warn!(species = %request.species_id, error = %err, "silhouette load failed");
                self.last_mask = None;
                self.state = LoadState::Error(err.user_message().to_owned());
            }
        }
        &self.state
    }

    /// Fetch, decode, and mask `species` in one go.
    #[tracing::instrument(skip(self, species, fetcher), fields(species = %species.id))]
    pub fn load_silhouette(
        &mut self,
        species: &Species,
        fetcher: &mut dyn ImageFetcher,
    ) -> &LoadState {
        let request = self.begin_load(species);
        let fetched = fetcher.fetch(&request.url);
        self.complete_load(&request, fetched)
    }

    /// Discard all strokes by re-masking the current species.
    pub fn reload(&mut self, fetcher: &mut dyn ImageFetcher) -> PaleoResult<&LoadState> {
        let species = self
            .species
            .clone()
            .ok_or_else(|| PaleoError::validation("no species selected"))?;
        Ok(self.load_silhouette(&species, fetcher))
    }

    /// Start a stroke at `at` (surface pixels). Ignored unless ready.
    pub fn begin_stroke(&mut self, at: Point) -> bool {
        if !self.state.is_ready() {
            return false;
        }
        self.brush.begin_stroke(&mut self.surface, at);
        true
    }

    /// Move the cursor preview and, during a stroke, paint up to `coords`.
    ///
    /// Returns whether pixels were painted.
    pub fn extend_stroke(&mut self, coords: PointerCoords) -> bool {
        self.brush.hover(coords.viewport);
        if !self.state.is_ready() {
            return false;
        }
        match self.brush.extend_stroke(&mut self.surface, coords.canvas) {
            Ok(painted) => painted,
            Err(err) => {
                tracing::warn!(error = %err, "stroke segment dropped");
                false
            }
        }
    }

    pub fn end_stroke(&mut self) {
        self.brush.end_stroke();
    }

    /// Dispatch one pointer event shown through `rect`.
    pub fn handle(&mut self, event: &CanvasEvent, rect: DisplayRect) {
        let canvas = self.surface.canvas();
        match event {
            CanvasEvent::PointerDown(pointer) => {
                if let Some(coords) = coordinate_for(pointer, rect, canvas) {
                    self.begin_stroke(coords.canvas);
                }
            }
            CanvasEvent::PointerMove(pointer) => {
                if let Some(coords) = coordinate_for(pointer, rect, canvas) {
                    self.extend_stroke(coords);
                }
            }
            CanvasEvent::PointerUp => self.end_stroke(),
            CanvasEvent::PointerEnter => self.brush.show_cursor(),
            CanvasEvent::PointerLeave => {
                self.end_stroke();
                self.brush.hide_cursor();
            }
        }
    }

    /// Replay recorded strokes as if they came from an unscaled pointer.
    ///
    /// Each stroke's color and width become the current brush settings. Returns the
    /// number of painted segments.
    pub fn replay(&mut self, script: &StrokeScript) -> usize {
        let mut painted = 0;
        for stroke in &script.strokes {
            self.brush.settings_mut().set_color(stroke.color);
            self.brush.settings_mut().set_width(stroke.width);

            let mut points = stroke.points();
            let Some(first) = points.next() else {
                continue;
            };
            if !self.begin_stroke(first) {
                return painted;
            }
            for p in points {
                let coords = PointerCoords {
                    canvas: p,
                    viewport: p,
                };
                painted += usize::from(self.extend_stroke(coords));
            }
            self.end_stroke();
        }
        painted
    }

    /// Snapshot the finished painting and award completion XP. Only valid when ready.
    pub fn finish(&mut self) -> PaleoResult<Finish> {
        if !self.state.is_ready() {
            return Err(PaleoError::validation(format!(
                "cannot finish while {}",
                self.state
            )));
        }
        self.end_stroke();
        let species_id = self
            .species
            .as_ref()
            .map(|s| s.id.clone())
            .unwrap_or_default();
        Ok(Finish {
            species_id,
            snapshot: self.surface.snapshot()?,
            xp_delta: self.config.completion_xp,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/paint.rs"]
mod tests;
