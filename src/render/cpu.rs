use std::collections::HashMap;
use std::sync::Arc;

use kurbo::Shape;

use crate::card::layout::{CardLayout, DrawCmd, TextAlign, TextStyle};
use crate::card::theme::GradientStop;
use crate::foundation::core::{Point, Rect, Rgba8};
use crate::foundation::error::{CardError, CardResult};
use crate::render::backend::{CardBackend, FrameRGBA, RenderSettings};
use crate::render::fonts::{FaceKey, FontBook};
use crate::render::text::{TextBrushRgba8, TextLayoutEngine};

/// CPU backend powered by `vello_cpu` for vector and text rasterization.
pub struct CpuBackend {
    fonts: FontBook,
    text_engine: TextLayoutEngine,
    font_cache: HashMap<FaceKey, vello_cpu::peniko::FontData>,
    gradient_cache: HashMap<GradientKey, vello_cpu::Image>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct GradientKey {
    w: u32,
    h: u32,
    axis: [u64; 4],
    stops: Vec<(u64, [u8; 4])>,
}

impl GradientKey {
    fn new(w: u32, h: u32, start: Point, end: Point, stops: &[GradientStop]) -> Self {
        Self {
            w,
            h,
            axis: [
                start.x.to_bits(),
                start.y.to_bits(),
                end.x.to_bits(),
                end.y.to_bits(),
            ],
            stops: stops
                .iter()
                .map(|s| {
                    let c = s.color;
                    (s.offset.to_bits(), [c.r, c.g, c.b, c.a])
                })
                .collect(),
        }
    }
}

impl std::fmt::Debug for CpuBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuBackend")
            .field("fonts", &self.fonts)
            .field("font_cache", &self.font_cache.len())
            .field("gradient_cache", &self.gradient_cache.len())
            .finish()
    }
}

impl CpuBackend {
    /// Backend with fonts discovered according to `settings`.
    pub fn new(settings: &RenderSettings) -> Self {
        Self::with_fonts(FontBook::new(settings))
    }

    /// Backend over an existing font book.
    pub fn with_fonts(fonts: FontBook) -> Self {
        Self {
            fonts,
            text_engine: TextLayoutEngine::new(),
            font_cache: HashMap::new(),
            gradient_cache: HashMap::new(),
        }
    }

    /// Borrow the font book.
    pub fn fonts(&self) -> &FontBook {
        &self.fonts
    }
}

impl CardBackend for CpuBackend {
    #[tracing::instrument(skip(self, layout), fields(commands = layout.commands.len()))]
    fn render(&mut self, layout: &CardLayout) -> CardResult<FrameRGBA> {
        let width: u16 = layout
            .canvas
            .width
            .try_into()
            .map_err(|_| CardError::render("canvas width exceeds u16"))?;
        let height: u16 = layout
            .canvas
            .height
            .try_into()
            .map_err(|_| CardError::render("canvas height exceeds u16"))?;
        if width == 0 || height == 0 {
            return Err(CardError::render("canvas has zero area"));
        }

        let mut ctx = vello_cpu::RenderContext::new(width, height);
        for cmd in &layout.commands {
            self.draw_cmd(&mut ctx, cmd)?;
        }
        ctx.flush();

        let mut pixmap = vello_cpu::Pixmap::new(width, height);
        ctx.render_to_pixmap(&mut pixmap);

        Ok(FrameRGBA {
            width: layout.canvas.width,
            height: layout.canvas.height,
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }
}

impl CpuBackend {
    fn draw_cmd(&mut self, ctx: &mut vello_cpu::RenderContext, cmd: &DrawCmd) -> CardResult<()> {
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);

        match cmd {
            DrawCmd::LinearGradient {
                rect,
                start,
                end,
                stops,
            } => {
                let (w, h) = rect_size_px(*rect)?;
                let img = self.gradient_paint(*rect, w, h, *start, *end, stops)?;
                ctx.set_transform(vello_cpu::kurbo::Affine::translate((rect.x0, rect.y0)));
                ctx.set_paint(img);
                ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                    0.0,
                    0.0,
                    f64::from(w),
                    f64::from(h),
                ));
                Ok(())
            }
            DrawCmd::FillCircle {
                center,
                radius,
                color,
            } => {
                let path = kurbo::Circle::new(*center, *radius).to_path(0.1);
                ctx.set_paint(to_cpu_color(*color));
                ctx.fill_path(&bezpath_to_cpu(&path));
                Ok(())
            }
            DrawCmd::Text {
                text,
                origin,
                style,
                color,
                align,
            } => self.draw_text(ctx, text, style, *color, *origin, *align),
            DrawCmd::StrokeRoundedRect {
                rect,
                radius,
                width,
                color,
            } => {
                let path = rounded_rect_path(*rect, *radius);
                ctx.set_stroke(vello_cpu::kurbo::Stroke::new(*width));
                ctx.set_paint(to_cpu_color(*color));
                ctx.stroke_path(&bezpath_to_cpu(&path));
                Ok(())
            }
        }
    }

    fn draw_text(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        text: &str,
        style: &TextStyle,
        color: Rgba8,
        origin: Point,
        align: TextAlign,
    ) -> CardResult<()> {
        if text.is_empty() {
            return Ok(());
        }

        let key = FaceKey::from(style);
        let resolved = self.fonts.resolve(key)?;
        let placed = self.text_engine.layout_line(
            text,
            style,
            &resolved,
            TextBrushRgba8::from(color),
            origin,
            align,
        )?;
        let font = self
            .font_cache
            .entry(key)
            .or_insert_with(|| {
                vello_cpu::peniko::FontData::new(
                    vello_cpu::peniko::Blob::from(resolved.bytes.as_ref().clone()),
                    resolved.index,
                )
            })
            .clone();

        ctx.set_transform(vello_cpu::kurbo::Affine::translate(placed.offset));
        for line in placed.layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };

                let brush = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));

                let mut x = run.offset();
                let y = run.baseline();
                let glyphs: Vec<vello_cpu::Glyph> = run
                    .glyphs()
                    .map(|g| {
                        let gx = x + g.x;
                        x += g.advance;
                        vello_cpu::Glyph {
                            id: g.id,
                            x: gx,
                            y: y - g.y,
                        }
                    })
                    .collect();
                ctx.glyph_run(&font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs.into_iter());
            }
        }
        Ok(())
    }

    fn gradient_paint(
        &mut self,
        rect: Rect,
        w: u32,
        h: u32,
        start: Point,
        end: Point,
        stops: &[GradientStop],
    ) -> CardResult<vello_cpu::Image> {
        let key = GradientKey::new(w, h, start, end, stops);
        if let Some(img) = self.gradient_cache.get(&key).cloned() {
            return Ok(img);
        }

        let bytes = bake_linear_gradient(rect, w, h, start, end, stops)?;
        let img = rgba_premul_to_image(&bytes, w, h)?;
        self.gradient_cache.insert(key, img.clone());
        Ok(img)
    }
}

fn rect_size_px(rect: Rect) -> CardResult<(u32, u32)> {
    let w = rect.width();
    let h = rect.height();
    if !(w.is_finite() && h.is_finite()) || w < 1.0 || h < 1.0 {
        return Err(CardError::render("gradient rect must be at least 1x1"));
    }
    Ok((w.round() as u32, h.round() as u32))
}

/// Premultiplied RGBA8 bytes of a linear gradient sampled at pixel centers of `rect`.
pub(crate) fn bake_linear_gradient(
    rect: Rect,
    w: u32,
    h: u32,
    start: Point,
    end: Point,
    stops: &[GradientStop],
) -> CardResult<Vec<u8>> {
    if stops.is_empty() {
        return Err(CardError::render("gradient needs at least one stop"));
    }

    let axis = end - start;
    let len2 = axis.hypot2();
    let mut bytes = vec![0u8; (w as usize).saturating_mul(h as usize).saturating_mul(4)];
    for (i, px) in bytes.chunks_exact_mut(4).enumerate() {
        let x = (i % w as usize) as f64 + 0.5 + rect.x0;
        let y = (i / w as usize) as f64 + 0.5 + rect.y0;
        let t = if len2 <= f64::EPSILON {
            0.0
        } else {
            ((Point::new(x, y) - start).dot(axis) / len2).clamp(0.0, 1.0)
        };
        px.copy_from_slice(&sample_stops(stops, t).to_premul());
    }
    Ok(bytes)
}

fn sample_stops(stops: &[GradientStop], t: f64) -> Rgba8 {
    let mut prev = stops[0];
    if t <= prev.offset {
        return prev.color;
    }
    for &next in &stops[1..] {
        if t <= next.offset {
            let span = next.offset - prev.offset;
            let u = if span <= f64::EPSILON {
                1.0
            } else {
                (t - prev.offset) / span
            };
            return lerp_rgba(prev.color, next.color, u);
        }
        prev = next;
    }
    prev.color
}

fn lerp_rgba(a: Rgba8, b: Rgba8, t: f64) -> Rgba8 {
    let lerp = |x: u8, y: u8| -> u8 {
        let xf = f64::from(x);
        let yf = f64::from(y);
        (xf + (yf - xf) * t).round().clamp(0.0, 255.0) as u8
    };
    Rgba8 {
        r: lerp(a.r, b.r),
        g: lerp(a.g, b.g),
        b: lerp(a.b, b.b),
        a: lerp(a.a, b.a),
    }
}

/// Rounded rectangle outline with quadratic corners.
pub(crate) fn rounded_rect_path(rect: Rect, radius: f64) -> kurbo::BezPath {
    let r = radius.min(rect.width() / 2.0).min(rect.height() / 2.0).max(0.0);
    let (x0, y0, x1, y1) = (rect.x0, rect.y0, rect.x1, rect.y1);

    let mut p = kurbo::BezPath::new();
    p.move_to((x0 + r, y0));
    p.line_to((x1 - r, y0));
    p.quad_to((x1, y0), (x1, y0 + r));
    p.line_to((x1, y1 - r));
    p.quad_to((x1, y1), (x1 - r, y1));
    p.line_to((x0 + r, y1));
    p.quad_to((x0, y1), (x0, y1 - r));
    p.line_to((x0, y0 + r));
    p.quad_to((x0, y0), (x0 + r, y0));
    p.close_path();
    p
}

fn to_cpu_color(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn bezpath_to_cpu(path: &kurbo::BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let pt = |p: kurbo::Point| vello_cpu::kurbo::Point::new(p.x, p.y);
    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(pt(p)),
            PathEl::LineTo(p) => out.line_to(pt(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(pt(p1), pt(p2)),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(pt(p1), pt(p2), pt(p3)),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn rgba_premul_to_image(
    bytes_premul: &[u8],
    width: u32,
    height: u32,
) -> CardResult<vello_cpu::Image> {
    let w: u16 = width
        .try_into()
        .map_err(|_| CardError::render("pixmap width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| CardError::render("pixmap height exceeds u16"))?;
    if bytes_premul.len() != width as usize * height as usize * 4 {
        return Err(CardError::render("pixmap byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let pixels = bytes_premul
        .chunks_exact(4)
        .map(|px| {
            may_have_opacities |= px[3] != 255;
            vello_cpu::peniko::color::PremulRgba8 {
                r: px[0],
                g: px[1],
                b: px[2],
                a: px[3],
            }
        })
        .collect::<Vec<_>>();

    let pixmap = vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, may_have_opacities);
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
