use crate::foundation::error::{PaleoError, PaleoResult};

pub type PremulRgba8 = [u8; 4];

/// Porter-Duff rule used when new paint lands on a surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum CompositeMode {
    /// Normal painting.
    #[default]
    SourceOver,
    /// Paint only where the destination already has coverage; destination alpha is kept.
    SourceAtop,
    /// Replace the destination with the source, masked by destination alpha.
    SourceIn,
}

pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u16;
    let sa = mul_div255(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = add_sat_u8(sa, mul_div255(u16::from(dst[3]), inv));

    for i in 0..3 {
        let sc = mul_div255(u16::from(src[i]), op);
        let dc = mul_div255(u16::from(dst[i]), inv);
        out[i] = add_sat_u8(sc, dc);
    }
    out
}

/// `src` atop `dst`: a fully transparent destination is returned untouched, color included.
pub fn source_atop(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    let da = dst[3];
    if da == 0 || src[3] == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(src[3]);

    let mut out = [0u8; 4];
    out[3] = da;
    for i in 0..3 {
        let sc = mul_div255(u16::from(src[i]), u16::from(da));
        let dc = mul_div255(u16::from(dst[i]), inv);
        out[i] = add_sat_u8(sc, dc).min(da);
    }
    out
}

pub fn source_in(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    let da = u16::from(dst[3]);
    [
        mul_div255(u16::from(src[0]), da),
        mul_div255(u16::from(src[1]), da),
        mul_div255(u16::from(src[2]), da),
        mul_div255(u16::from(src[3]), da),
    ]
}

pub fn composite(dst: PremulRgba8, src: PremulRgba8, mode: CompositeMode) -> PremulRgba8 {
    match mode {
        CompositeMode::SourceOver => over(dst, src, 1.0),
        CompositeMode::SourceAtop => source_atop(dst, src),
        CompositeMode::SourceIn => source_in(dst, src),
    }
}

/// Composite a whole layer onto `dst`.
///
/// `src` is a full-size layer. Under [`CompositeMode::SourceIn`] pixels the layer does
/// not cover are cleared, matching a canvas-wide source-in fill.
pub fn composite_in_place(dst: &mut [u8], src: &[u8], mode: CompositeMode) -> PaleoResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(PaleoError::validation(
            "composite_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = composite([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]], mode);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Composite a single color over every pixel of `dst`.
pub fn fill_in_place(dst: &mut [u8], src: PremulRgba8, mode: CompositeMode) -> PaleoResult<()> {
    if !dst.len().is_multiple_of(4) {
        return Err(PaleoError::validation(
            "fill_in_place expects an rgba8 buffer",
        ));
    }
    for d in dst.chunks_exact_mut(4) {
        let out = composite([d[0], d[1], d[2], d[3]], src, mode);
        d.copy_from_slice(&out);
    }
    Ok(())
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

fn add_sat_u8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
