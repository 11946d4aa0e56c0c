use super::*;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 0.05
}

#[test]
fn landscape_photo_is_height_limited() {
    let canvas = Canvas::new(1000, 650).unwrap();
    let fit = fit_centered(canvas, 400, 300, 150.0);

    assert!(approx(fit.scale, 500.0 / 300.0));
    assert!(approx(fit.size.x, 666.67));
    assert!(approx(fit.size.y, 500.0));
    assert!(approx(fit.offset.x, 166.67));
    assert!(approx(fit.offset.y, 75.0));
}

#[test]
fn wide_photo_is_width_limited() {
    let canvas = Canvas::new(1000, 650).unwrap();
    let fit = fit_centered(canvas, 1700, 100, 150.0);

    assert!(approx(fit.scale, 0.5));
    assert!(approx(fit.offset.x, 75.0));
    assert!(approx(fit.offset.y, 300.0));
}

#[test]
fn affine_maps_image_corners_to_placement() {
    let canvas = Canvas::new(1000, 650).unwrap();
    let fit = fit_centered(canvas, 400, 300, 150.0);
    let a = fit.to_affine();

    let origin = a * kurbo::Point::new(0.0, 0.0);
    assert!(approx(origin.x, fit.offset.x) && approx(origin.y, fit.offset.y));

    let corner = a * kurbo::Point::new(400.0, 300.0);
    assert!(approx(corner.x, fit.offset.x + fit.size.x));
    assert!(approx(corner.y, fit.offset.y + fit.size.y));
}
