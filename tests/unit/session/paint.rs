use super::*;
use crate::foundation::core::{Canvas, Rgba8};
use crate::foundation::error::{FETCH_USER_MESSAGE, MASK_USER_MESSAGE};

const GUIDE: Rgba8 = Rgba8::opaque(0x6B, 0x72, 0x80);
const BLUE: Rgba8 = Rgba8::opaque(0x29, 0x80, 0xB9);

/// PNG whose left half is dark and right half light.
fn halves_png(w: u32, h: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_fn(w, h, |x, _| {
        let l = if x < w / 2 { 20 } else { 220 };
        image::Rgba([l, l, l, 255])
    });
    let mut out = std::io::Cursor::new(Vec::new());
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut out, image::ImageFormat::Png)
        .unwrap();
    out.into_inner()
}

struct StubFetcher {
    bytes: Option<Vec<u8>>,
    readable: bool,
    urls: Vec<String>,
}

impl StubFetcher {
    fn ok() -> Self {
        Self {
            bytes: Some(halves_png(40, 30)),
            readable: true,
            urls: Vec::new(),
        }
    }
}

impl ImageFetcher for StubFetcher {
    fn fetch(&mut self, url: &str) -> PaleoResult<FetchedImage> {
        self.urls.push(url.to_owned());
        let bytes = self
            .bytes
            .clone()
            .ok_or_else(|| PaleoError::fetch("connection refused"))?;
        Ok(FetchedImage {
            bytes,
            cross_origin_readable: self.readable,
        })
    }
}

fn small_config() -> StudioConfig {
    StudioConfig {
        canvas: Canvas::new(100, 65).unwrap(),
        padding_px: 15.0,
        ..StudioConfig::default()
    }
}

fn species() -> Species {
    Species {
        id: "glyptodon".to_owned(),
        name: "Glyptodon".to_owned(),
        scientific_name: "Glyptotherium sp.".to_owned(),
        silhouette_url: "mem://glyptodon.png".to_owned(),
        base_color: Rgba8::opaque(0x27, 0xAE, 0x60),
        description: String::new(),
    }
}

fn ready_session() -> PaintSession {
    let mut s = PaintSession::new(small_config()).unwrap();
    assert!(s.load_silhouette(&species(), &mut StubFetcher::ok()).is_ready());
    s
}

fn at(x: f64, y: f64) -> PointerCoords {
    PointerCoords {
        canvas: Point::new(x, y),
        viewport: Point::new(x, y),
    }
}

#[test]
fn new_session_starts_loading_and_ignores_strokes() {
    let mut s = PaintSession::new(small_config()).unwrap();
    assert!(s.state().is_loading());
    assert!(!s.begin_stroke(Point::new(30.0, 30.0)));
    assert!(!s.extend_stroke(at(40.0, 30.0)));
    assert!(s.surface().data_premul().iter().all(|&b| b == 0));
}

#[test]
fn load_requests_are_cache_busted() {
    let mut s = PaintSession::new(small_config()).unwrap();
    let req = s.begin_load_with_token(&species(), 42);
    assert_eq!(req.url, "mem://glyptodon.png?cb=42");
    assert_eq!(req.generation, 1);
    assert_eq!(req.species_id, "glyptodon");

    let mut fetcher = StubFetcher::ok();
    s.load_silhouette(&species(), &mut fetcher);
    assert!(fetcher.urls[0].starts_with("mem://glyptodon.png?cb="));
}

#[test]
fn stroke_paints_inside_mask_only() {
    let mut s = ready_session();
    s.brush_mut().set_color(BLUE);
    s.brush_mut().set_width(4.0);

    assert_eq!(s.surface().pixel(30, 30), Some(GUIDE));
    assert!(s.begin_stroke(Point::new(25.0, 30.0)));
    assert!(s.extend_stroke(at(40.0, 30.0)));
    assert_eq!(s.surface().pixel(30, 30), Some(BLUE));

    s.end_stroke();
    assert!(s.begin_stroke(Point::new(60.0, 30.0)));
    s.extend_stroke(at(78.0, 30.0));
    assert_eq!(s.surface().pixel(70, 30), Some(Rgba8::transparent()));
}

#[test]
fn fetch_failure_sets_error_and_blocks_strokes() {
    let mut s = PaintSession::new(small_config()).unwrap();
    let mut fetcher = StubFetcher {
        bytes: None,
        ..StubFetcher::ok()
    };
    let state = s.load_silhouette(&species(), &mut fetcher).clone();
    assert_eq!(state, LoadState::Error(FETCH_USER_MESSAGE.to_owned()));
    assert!(!s.begin_stroke(Point::new(30.0, 30.0)));

    let mut bad_bytes = StubFetcher {
        bytes: Some(b"not an image".to_vec()),
        ..StubFetcher::ok()
    };
    assert_eq!(
        s.load_silhouette(&species(), &mut bad_bytes).error_message(),
        Some(FETCH_USER_MESSAGE)
    );
}

#[test]
fn unreadable_image_reports_mask_error_then_recovers() {
    let mut s = PaintSession::new(small_config()).unwrap();
    let mut opaque_origin = StubFetcher {
        readable: false,
        ..StubFetcher::ok()
    };
    assert_eq!(
        s.load_silhouette(&species(), &mut opaque_origin).error_message(),
        Some(MASK_USER_MESSAGE)
    );

    assert!(s.reload(&mut StubFetcher::ok()).unwrap().is_ready());
    assert!(s.surface().is_origin_clean());
}

#[test]
fn stale_completion_is_discarded() {
    let mut s = PaintSession::new(small_config()).unwrap();
    let first = s.begin_load(&species());
    let second = s.begin_load(&species());
    assert!(second.generation > first.generation);

    let fetched = StubFetcher::ok().fetch(&first.url);
    assert!(s.complete_load(&first, fetched).is_loading());
    assert!(s.last_mask().is_none());

    let fetched = StubFetcher::ok().fetch(&second.url);
    assert!(s.complete_load(&second, fetched).is_ready());

    let late = s.complete_load(&first, Err(PaleoError::fetch("late failure")));
    assert!(late.is_ready());
}

#[test]
fn reload_restores_pristine_mask() {
    let mut s = ready_session();
    let pristine = s.surface().data_premul().to_vec();

    s.brush_mut().set_color(BLUE);
    s.begin_stroke(Point::new(20.0, 20.0));
    s.extend_stroke(at(45.0, 45.0));
    assert_ne!(s.surface().data_premul(), pristine.as_slice());

    s.reload(&mut StubFetcher::ok()).unwrap();
    assert_eq!(s.surface().data_premul(), pristine.as_slice());
    assert!(!s.is_drawing());
}

#[test]
fn reload_without_species_is_rejected() {
    let mut s = PaintSession::new(small_config()).unwrap();
    assert!(matches!(
        s.reload(&mut StubFetcher::ok()),
        Err(PaleoError::Validation(_))
    ));
}

#[test]
fn events_drive_stroke_and_cursor() {
    let mut s = ready_session();
    let rect = DisplayRect::unscaled(s.surface().canvas());

    s.handle(&CanvasEvent::PointerEnter, rect);
    s.handle(&CanvasEvent::PointerMove(PointerEvent::mouse(10.0, 12.0)), rect);
    assert!(s.cursor().visible);
    assert_eq!(s.cursor().position, Point::new(10.0, 12.0));
    assert!(!s.is_drawing());

    s.handle(&CanvasEvent::PointerDown(PointerEvent::touch(25.0, 30.0)), rect);
    assert!(s.is_drawing());
    s.handle(&CanvasEvent::PointerMove(PointerEvent::touch(40.0, 30.0)), rect);
    s.handle(&CanvasEvent::PointerLeave, rect);
    assert!(!s.is_drawing());
    assert!(!s.cursor().visible);

    s.handle(&CanvasEvent::PointerUp, rect);
    assert!(!s.is_drawing());
}

#[test]
fn cursor_hidden_while_loading() {
    let mut s = ready_session();
    s.handle(&CanvasEvent::PointerEnter, DisplayRect::unscaled(s.surface().canvas()));
    assert!(s.cursor().visible);
    s.begin_load(&species());
    assert!(!s.cursor().visible);
}

#[test]
fn replay_paints_each_segment() {
    let mut s = ready_session();
    let script = StrokeScript::from_json_str(
        r##"[{"color":"#2980B9","width":4,"points":[[25,30],[40,30],[40,40]]}]"##,
    )
    .unwrap();
    assert_eq!(s.replay(&script), 2);
    assert_eq!(s.surface().pixel(30, 30), Some(BLUE));
    assert_eq!(s.brush().width(), 4.0);
}

#[test]
fn finish_requires_ready() {
    let mut s = PaintSession::new(small_config()).unwrap();
    assert!(s.finish().is_err());

    let mut s = ready_session();
    let done = s.finish().unwrap();
    assert_eq!(done.species_id, "glyptodon");
    assert_eq!(done.xp_delta, 150);
    assert_eq!(done.snapshot.width, 100);
    assert_eq!(done.snapshot.data.len(), 100 * 65 * 4);
}
