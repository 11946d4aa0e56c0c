use crate::{
    assets::SourceImage,
    foundation::core::{Affine, Canvas, Point, Rect, Rgba8},
    foundation::error::{PaleoError, PaleoResult},
    render::composite::{self, CompositeMode},
};

/// Read-back of a whole surface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRgba {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

impl FrameRgba {
    pub fn to_rgba_image(&self) -> PaleoResult<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.data.clone())
            .ok_or_else(|| PaleoError::validation("frame byte length mismatch"))
    }
}

/// Fixed-size RGBA8 raster that both the masker and the brush engine paint into.
///
/// Pixels are stored premultiplied in a `vello_cpu` pixmap. `vello_cpu` renders into a
/// fresh buffer, so every draw goes through a temporary layer that is then composited
/// onto the stored pixels with the current [`CompositeMode`].
///
/// Drawing an image that is not cross-origin readable taints the surface; reads fail
/// with [`PaleoError::MaskProcessing`] until the next [`RasterSurface::clear`].
pub struct RasterSurface {
    canvas: Canvas,
    pixmap: vello_cpu::Pixmap,
    mode: CompositeMode,
    origin_clean: bool,
}

impl std::fmt::Debug for RasterSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterSurface")
            .field("canvas", &self.canvas)
            .field("mode", &self.mode)
            .field("origin_clean", &self.origin_clean)
            .finish()
    }
}

impl RasterSurface {
    pub fn new(canvas: Canvas) -> PaleoResult<Self> {
        let canvas = Canvas::new(canvas.width, canvas.height)?;
        let (w, h) = dims_u16(canvas)?;
        Ok(Self {
            canvas,
            pixmap: vello_cpu::Pixmap::new(w, h),
            mode: CompositeMode::SourceOver,
            origin_clean: true,
        })
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn composite_mode(&self) -> CompositeMode {
        self.mode
    }

    pub fn set_composite_mode(&mut self, mode: CompositeMode) {
        self.mode = mode;
    }

    pub fn is_origin_clean(&self) -> bool {
        self.origin_clean
    }

    /// Clear every pixel to transparent and forget any cross-origin taint.
    pub fn clear(&mut self) {
        self.pixmap.data_as_u8_slice_mut().fill(0);
        self.origin_clean = true;
    }

    /// Premultiplied pixel bytes, row-major.
    pub fn data_premul(&self) -> &[u8] {
        self.pixmap.data_as_u8_slice()
    }

    /// Straight-alpha color of one pixel, ignoring taint.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        if !self.canvas.contains(i64::from(x), i64::from(y)) {
            return None;
        }
        let idx = (y as usize * self.canvas.width as usize + x as usize) * 4;
        let px = &self.data_premul()[idx..idx + 4];
        let [r, g, b, a] = unpremultiply([px[0], px[1], px[2], px[3]]);
        Some(Rgba8 { r, g, b, a })
    }

    /// Draw `img` through `transform` (image space to surface space).
    pub fn draw_image(&mut self, img: &SourceImage, transform: Affine) -> PaleoResult<()> {
        let pixmap = image_premul_bytes_to_pixmap(&img.rgba8_premul, img.width, img.height)?;
        let paint = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(std::sync::Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        };
        let (w, h) = (f64::from(img.width), f64::from(img.height));

        let layer = self.render_layer(|ctx| {
            ctx.set_transform(affine_to_cpu(transform));
            ctx.set_paint(paint);
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, w, h));
        });
        self.composite_layer(&layer)?;

        if !img.cross_origin_readable {
            self.origin_clean = false;
        }
        Ok(())
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Rgba8) -> PaleoResult<()> {
        let covers_canvas = rect.x0 <= 0.0
            && rect.y0 <= 0.0
            && rect.x1 >= f64::from(self.canvas.width)
            && rect.y1 >= f64::from(self.canvas.height);
        if covers_canvas {
            return composite::fill_in_place(
                self.pixmap.data_as_u8_slice_mut(),
                color.to_premul(),
                self.mode,
            );
        }

        let layer = self.render_layer(|ctx| {
            ctx.set_paint(color_to_cpu(color));
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(rect.x0, rect.y0, rect.x1, rect.y1));
        });
        self.composite_layer(&layer)
    }

    /// Stroke connected line segments through `points` with round caps and joins.
    pub fn stroke_polyline(&mut self, points: &[Point], width: f64, color: Rgba8) -> PaleoResult<()> {
        let Some((first, rest)) = points.split_first() else {
            return Ok(());
        };

        let mut path = vello_cpu::kurbo::BezPath::new();
        path.move_to(point_to_cpu(*first));
        if rest.is_empty() {
            path.line_to(point_to_cpu(*first));
        }
        for p in rest {
            path.line_to(point_to_cpu(*p));
        }

        let stroke = vello_cpu::kurbo::Stroke::new(width)
            .with_caps(vello_cpu::kurbo::Cap::Round)
            .with_join(vello_cpu::kurbo::Join::Round);

        let layer = self.render_layer(|ctx| {
            ctx.set_stroke(stroke);
            ctx.set_paint(color_to_cpu(color));
            ctx.stroke_path(&path);
        });
        self.composite_layer(&layer)
    }

    /// Full straight-alpha RGBA read-back.
    pub fn read_pixels(&self) -> PaleoResult<Vec<u8>> {
        if !self.origin_clean {
            return Err(PaleoError::mask_processing(
                "surface is tainted by cross-origin data",
            ));
        }
        let mut out = self.data_premul().to_vec();
        for px in out.chunks_exact_mut(4) {
            let straight = unpremultiply([px[0], px[1], px[2], px[3]]);
            px.copy_from_slice(&straight);
        }
        Ok(out)
    }

    /// Replace every pixel with straight-alpha `rgba`, ignoring the composite mode.
    pub fn write_pixels(&mut self, rgba: &[u8]) -> PaleoResult<()> {
        let dst = self.pixmap.data_as_u8_slice_mut();
        if rgba.len() != dst.len() {
            return Err(PaleoError::validation(
                "write_pixels expects a full-surface rgba8 buffer",
            ));
        }
        for (d, s) in dst.chunks_exact_mut(4).zip(rgba.chunks_exact(4)) {
            let c = Rgba8 {
                r: s[0],
                g: s[1],
                b: s[2],
                a: s[3],
            };
            d.copy_from_slice(&c.to_premul());
        }
        Ok(())
    }

    pub fn snapshot(&self) -> PaleoResult<FrameRgba> {
        Ok(FrameRgba {
            width: self.canvas.width,
            height: self.canvas.height,
            data: self.read_pixels()?,
            premultiplied: false,
        })
    }

    fn render_layer(&self, draw: impl FnOnce(&mut vello_cpu::RenderContext)) -> vello_cpu::Pixmap {
        let (w, h) = (self.pixmap.width(), self.pixmap.height());
        let mut ctx = vello_cpu::RenderContext::new(w, h);
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        draw(&mut ctx);
        ctx.flush();
        let mut layer = vello_cpu::Pixmap::new(w, h);
        ctx.render_to_pixmap(&mut layer);
        layer
    }

    fn composite_layer(&mut self, layer: &vello_cpu::Pixmap) -> PaleoResult<()> {
        composite::composite_in_place(
            self.pixmap.data_as_u8_slice_mut(),
            layer.data_as_u8_slice(),
            self.mode,
        )
    }
}

fn dims_u16(canvas: Canvas) -> PaleoResult<(u16, u16)> {
    let w: u16 = canvas
        .width
        .try_into()
        .map_err(|_| PaleoError::validation("surface width exceeds u16"))?;
    let h: u16 = canvas
        .height
        .try_into()
        .map_err(|_| PaleoError::validation("surface height exceeds u16"))?;
    Ok((w, h))
}

fn unpremultiply(px: [u8; 4]) -> [u8; 4] {
    let a = u16::from(px[3]);
    match a {
        0 => [0, 0, 0, 0],
        255 => px,
        _ => {
            let un = |c: u8| -> u8 { ((u16::from(c) * 255 + a / 2) / a).min(255) as u8 };
            [un(px[0]), un(px[1]), un(px[2]), px[3]]
        }
    }
}

fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn image_premul_bytes_to_pixmap(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> PaleoResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| PaleoError::validation("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| PaleoError::validation("image height exceeds u16"))?;
    if rgba8_premul.len() != width as usize * height as usize * 4 {
        return Err(PaleoError::validation("source image byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for px in rgba8_premul.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
