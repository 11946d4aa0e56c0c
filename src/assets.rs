use std::sync::Arc;

pub mod decode;
pub mod fetch;

/// Decoded silhouette source in premultiplied RGBA8 form.
#[derive(Clone, Debug)]
pub struct SourceImage {
    pub width: u32,
    pub height: u32,
    /// Premultiplied RGBA8, row-major, tightly packed.
    pub rgba8_premul: Arc<Vec<u8>>,
    /// Whether pixels drawn from this image may be read back from a surface.
    pub cross_origin_readable: bool,
}
