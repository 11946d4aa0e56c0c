use std::sync::Arc;

use super::*;
use crate::foundation::core::Canvas;
use crate::foundation::error::PaleoError;

const GUIDE: Rgba8 = Rgba8::opaque(0x6B, 0x72, 0x80);

fn halves_image(w: u32, h: u32, readable: bool) -> SourceImage {
    let mut px = Vec::with_capacity((w * h * 4) as usize);
    for _y in 0..h {
        for x in 0..w {
            let l = if x < w / 2 { 20 } else { 220 };
            px.extend_from_slice(&[l, l, l, 255]);
        }
    }
    SourceImage {
        width: w,
        height: h,
        rgba8_premul: Arc::new(px),
        cross_origin_readable: readable,
    }
}

fn masker() -> SilhouetteMasker {
    SilhouetteMasker::new(MaskSettings {
        padding_px: 15.0,
        threshold_factor: 0.95,
        guide_color: GUIDE,
    })
}

#[test]
fn render_produces_binary_uniform_mask() {
    let mut surface = RasterSurface::new(Canvas::new(100, 65).unwrap()).unwrap();
    let report = masker().render(&mut surface, &halves_image(40, 30, true)).unwrap();

    assert!((report.placement.scale - 50.0 / 30.0).abs() < 1e-9);
    assert!(report.stats.subject_pixels > 0);
    assert!(report.stats.background_pixels > 0);
    assert_eq!(surface.composite_mode(), CompositeMode::SourceOver);

    let pixels = surface.read_pixels().unwrap();
    for px in pixels.chunks_exact(4) {
        match px[3] {
            0 => {}
            255 => assert_eq!(&px[..3], &[GUIDE.r, GUIDE.g, GUIDE.b]),
            a => panic!("non-binary alpha {a}"),
        }
    }

    assert_eq!(surface.pixel(30, 32), Some(GUIDE));
    assert_eq!(surface.pixel(70, 32).map(|c| c.a), Some(0));
}

#[test]
fn transparent_margin_counts_as_dark() {
    let mut surface = RasterSurface::new(Canvas::new(100, 65).unwrap()).unwrap();
    masker().render(&mut surface, &halves_image(40, 30, true)).unwrap();
    assert_eq!(surface.pixel(1, 1), Some(GUIDE));
}

#[test]
fn tainted_image_fails_as_mask_processing() {
    let mut surface = RasterSurface::new(Canvas::new(100, 65).unwrap()).unwrap();
    let err = masker()
        .render(&mut surface, &halves_image(40, 30, false))
        .unwrap_err();
    assert!(matches!(err, PaleoError::MaskProcessing(_)));
    assert_eq!(surface.composite_mode(), CompositeMode::SourceOver);
}

#[test]
fn rerender_is_deterministic() {
    let img = halves_image(40, 30, true);
    let mut a = RasterSurface::new(Canvas::new(100, 65).unwrap()).unwrap();
    let mut b = RasterSurface::new(Canvas::new(100, 65).unwrap()).unwrap();
    masker().render(&mut a, &img).unwrap();
    masker().render(&mut b, &img).unwrap();
    masker().render(&mut b, &img).unwrap();
    assert_eq!(a.data_premul(), b.data_premul());
}
