use std::sync::Arc;

use crate::{
    assets::{SourceImage, fetch::FetchedImage},
    foundation::error::{PaleoError, PaleoResult},
};

/// Decode encoded image bytes and convert to premultiplied RGBA8.
///
/// Decode failures are reported as [`PaleoError::Fetch`]: to a player a corrupt file
/// and a missing file look the same.
pub fn decode_image(bytes: &[u8]) -> PaleoResult<SourceImage> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| PaleoError::fetch(format!("decode image from memory: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(PaleoError::fetch("decoded image has zero size"));
    }

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(SourceImage {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
        cross_origin_readable: true,
    })
}

/// Decode a fetched payload, carrying over its cross-origin readability.
pub fn decode_fetched(fetched: &FetchedImage) -> PaleoResult<SourceImage> {
    let mut img = decode_image(&fetched.bytes)?;
    img.cross_origin_readable = fetched.cross_origin_readable;
    Ok(img)
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
