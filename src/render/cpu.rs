use vello_cpu::kurbo::Shape as _;

use crate::draw::{DrawList, DrawOp};
use crate::foundation::core::{Canvas, Point, Rgba8};
use crate::foundation::error::{SketchError, SketchResult};
use crate::render::backend::{FrameRGBA, RenderBackend, RenderSettings};

/// Flattening tolerance for circles, in pixels.
const CIRCLE_TOLERANCE: f64 = 0.1;

pub struct CpuBackend {
    settings: RenderSettings,
    target: Option<CpuTarget>,
}

struct CpuTarget {
    width: u16,
    height: u16,
    ctx: vello_cpu::RenderContext,
    pixmap: vello_cpu::Pixmap,
}

impl CpuBackend {
    pub fn new(settings: RenderSettings) -> Self {
        Self {
            settings,
            target: None,
        }
    }

    fn target_for(&mut self, canvas: Canvas) -> SketchResult<&mut CpuTarget> {
        canvas.validate()?;
        let width: u16 = canvas
            .width
            .try_into()
            .map_err(|_| SketchError::render("canvas width exceeds u16"))?;
        let height: u16 = canvas
            .height
            .try_into()
            .map_err(|_| SketchError::render("canvas height exceeds u16"))?;

        let stale = self
            .target
            .as_ref()
            .is_none_or(|t| t.width != width || t.height != height);
        if stale {
            self.target = Some(CpuTarget {
                width,
                height,
                ctx: vello_cpu::RenderContext::new(width, height),
                pixmap: vello_cpu::Pixmap::new(width, height),
            });
        }
        self.target
            .as_mut()
            .ok_or_else(|| SketchError::render("cpu render target missing"))
    }
}

impl RenderBackend for CpuBackend {
    #[tracing::instrument(level = "trace", skip(self, list), fields(ops = list.len()))]
    fn render(&mut self, canvas: Canvas, list: &DrawList) -> SketchResult<FrameRGBA> {
        let clear = self.settings.clear_rgba;
        let target = self.target_for(canvas)?;
        let full = vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(target.width),
            f64::from(target.height),
        );

        target.ctx.reset();
        clear_pixmap(&mut target.pixmap, [0, 0, 0, 0]);
        let ctx = &mut target.ctx;
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        if let Some(c) = clear {
            ctx.set_paint(color_to_cpu(c));
            ctx.fill_rect(&full);
        }

        for op in list.ops() {
            draw_op(ctx, op, &full);
        }

        ctx.flush();
        ctx.render_to_pixmap(&mut target.pixmap);

        Ok(FrameRGBA {
            width: canvas.width,
            height: canvas.height,
            data: target.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }
}

fn draw_op(ctx: &mut vello_cpu::RenderContext, op: &DrawOp, full: &vello_cpu::kurbo::Rect) {
    match op {
        DrawOp::Clear(color) => {
            ctx.set_paint(color_to_cpu(*color));
            ctx.fill_rect(full);
        }
        DrawOp::Circle {
            center,
            radius,
            fill,
        } => {
            ctx.set_paint(color_to_cpu(*fill));
            let path = vello_cpu::kurbo::Circle::new(point_to_cpu(*center), *radius)
                .to_path(CIRCLE_TOLERANCE);
            ctx.fill_path(&path);
        }
        DrawOp::Ring {
            center,
            radius,
            width,
            stroke,
        } => {
            ctx.set_paint(color_to_cpu(*stroke));
            ctx.set_stroke(vello_cpu::kurbo::Stroke::new(*width));
            let path = vello_cpu::kurbo::Circle::new(point_to_cpu(*center), *radius)
                .to_path(CIRCLE_TOLERANCE);
            ctx.stroke_path(&path);
        }
        DrawOp::Line {
            from,
            to,
            width,
            stroke,
        } => {
            ctx.set_paint(color_to_cpu(*stroke));
            ctx.set_stroke(vello_cpu::kurbo::Stroke::new(*width));
            let mut path = vello_cpu::kurbo::BezPath::new();
            path.move_to(point_to_cpu(*from));
            path.line_to(point_to_cpu(*to));
            ctx.stroke_path(&path);
        }
        DrawOp::Polyline {
            points,
            closed,
            width,
            stroke,
        } => {
            ctx.set_paint(color_to_cpu(*stroke));
            ctx.set_stroke(vello_cpu::kurbo::Stroke::new(*width));
            ctx.stroke_path(&polyline_to_cpu(points, *closed));
        }
    }
}

fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn polyline_to_cpu(points: &[Point], closed: bool) -> vello_cpu::kurbo::BezPath {
    let mut out = vello_cpu::kurbo::BezPath::new();
    let mut it = points.iter();
    if let Some(first) = it.next() {
        out.move_to(point_to_cpu(*first));
        for p in it {
            out.line_to(point_to_cpu(*p));
        }
        if closed {
            out.close_path();
        }
    }
    out
}

fn clear_pixmap(pixmap: &mut vello_cpu::Pixmap, rgba: [u8; 4]) {
    let data = pixmap.data_as_u8_slice_mut();
    for px in data.chunks_exact_mut(4) {
        px.copy_from_slice(&rgba);
    }
}
