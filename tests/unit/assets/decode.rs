use std::io::Cursor;

use super::*;

fn png_bytes(img: image::RgbaImage) -> Vec<u8> {
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_image_png_dimensions_and_premul() {
    let img = image::RgbaImage::from_raw(1, 1, vec![100u8, 50u8, 200u8, 128u8]).unwrap();
    let prepared = decode_image(&png_bytes(img)).unwrap();

    assert_eq!(prepared.width, 1);
    assert_eq!(prepared.height, 1);
    assert!(prepared.cross_origin_readable);
    assert_eq!(
        prepared.rgba8_premul.as_slice(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn decode_garbage_is_a_fetch_error() {
    let err = decode_image(b"definitely not an image").unwrap_err();
    assert!(matches!(err, PaleoError::Fetch(_)));
}

#[test]
fn decode_fetched_keeps_readability() {
    let img = image::RgbaImage::from_pixel(2, 2, image::Rgba([9, 9, 9, 255]));
    let fetched = FetchedImage {
        bytes: png_bytes(img),
        cross_origin_readable: false,
    };
    let decoded = decode_fetched(&fetched).unwrap();
    assert!(!decoded.cross_origin_readable);
    assert_eq!(decoded.rgba8_premul.len(), 16);
}
