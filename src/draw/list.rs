use crate::foundation::core::{Point, Rgba8};

/// One immediate-mode primitive. Coordinates are canvas pixels.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// Paint the whole canvas. Translucent colors blend over what is already drawn.
    Clear(Rgba8),
    Circle {
        center: Point,
        radius: f64,
        fill: Rgba8,
    },
    /// Stroked circle outline.
    Ring {
        center: Point,
        radius: f64,
        width: f64,
        stroke: Rgba8,
    },
    Line {
        from: Point,
        to: Point,
        width: f64,
        stroke: Rgba8,
    },
    Polyline {
        points: Vec<Point>,
        closed: bool,
        width: f64,
        stroke: Rgba8,
    },
}

/// Ordered primitive list for one frame. Paint order is push order.
///
/// Primitives with non-finite geometry are dropped at push time and counted, so one bad entity
/// never reaches the rasterizer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DrawList {
    ops: Vec<DrawOp>,
    dropped: usize,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget every primitive, keeping the allocation.
    pub fn reset(&mut self) {
        self.ops.clear();
        self.dropped = 0;
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Primitives rejected since the last [`DrawList::reset`].
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn background(&mut self, color: Rgba8) {
        self.ops.push(DrawOp::Clear(color));
    }

    /// Returns `false` when the circle was dropped.
    pub fn circle(&mut self, center: Point, radius: f64, fill: Rgba8) -> bool {
        if !point_ok(center) || !radius.is_finite() || radius < 0.0 {
            return self.reject();
        }
        if radius == 0.0 || fill.a == 0 {
            return true;
        }
        self.ops.push(DrawOp::Circle {
            center,
            radius,
            fill,
        });
        true
    }

    pub fn ring(&mut self, center: Point, radius: f64, width: f64, stroke: Rgba8) -> bool {
        if !point_ok(center) || !radius.is_finite() || radius < 0.0 || !width_ok(width) {
            return self.reject();
        }
        if stroke.a == 0 {
            return true;
        }
        self.ops.push(DrawOp::Ring {
            center,
            radius,
            width,
            stroke,
        });
        true
    }

    pub fn line(&mut self, from: Point, to: Point, width: f64, stroke: Rgba8) -> bool {
        if !point_ok(from) || !point_ok(to) || !width_ok(width) {
            return self.reject();
        }
        if stroke.a == 0 {
            return true;
        }
        self.ops.push(DrawOp::Line {
            from,
            to,
            width,
            stroke,
        });
        true
    }

    /// Open or closed polyline. Fewer than two points draws nothing; any non-finite point drops
    /// the whole primitive.
    pub fn polyline(
        &mut self,
        points: impl IntoIterator<Item = Point>,
        closed: bool,
        width: f64,
        stroke: Rgba8,
    ) -> bool {
        let points: Vec<Point> = points.into_iter().collect();
        if !width_ok(width) || !points.iter().all(|p| point_ok(*p)) {
            return self.reject();
        }
        if points.len() < 2 || stroke.a == 0 {
            return true;
        }
        self.ops.push(DrawOp::Polyline {
            points,
            closed,
            width,
            stroke,
        });
        true
    }

    /// Soft glow: `layers` concentric discs whose alpha falls off towards the rim.
    pub fn glow(&mut self, center: Point, radius: f64, color: Rgba8, layers: usize) -> bool {
        if !point_ok(center) || !radius.is_finite() || radius < 0.0 {
            return self.reject();
        }
        let layers = layers.max(1);
        for k in 0..layers {
            let f = 1.0 - k as f64 / layers as f64;
            let alpha = (k + 1) as f64 / layers as f64;
            self.circle(center, radius * f, color.fade(alpha * alpha));
        }
        true
    }

    fn reject(&mut self) -> bool {
        self.dropped += 1;
        false
    }
}

fn point_ok(p: Point) -> bool {
    p.x.is_finite() && p.y.is_finite()
}

fn width_ok(w: f64) -> bool {
    w.is_finite() && w > 0.0
}

#[cfg(test)]
#[path = "../../tests/unit/draw/list.rs"]
mod tests;
