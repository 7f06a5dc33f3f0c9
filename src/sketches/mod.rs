//! Built-in sketches. Each one is a [`crate::driver::Sketch`] registered in
//! [`crate::driver::registry`].

pub mod aizawa_trail;
pub mod bronze_flow;
pub mod drift_field;
pub mod harmonic_bloom;
pub mod orbit_dust;
pub mod phyllotaxis;
pub mod sacred_bloom;
pub mod supershape;

use crate::draw::{Camera, DrawList};
use crate::foundation::core::{Point, Rgba8, Vec3};

/// A projected primitive waiting for depth sorting.
#[derive(Clone, Copy, Debug)]
pub(crate) enum Splat {
    Disc {
        center: Point,
        radius: f64,
        color: Rgba8,
    },
    Glow {
        center: Point,
        radius: f64,
        color: Rgba8,
    },
    Line {
        from: Point,
        to: Point,
        width: f64,
        color: Rgba8,
    },
}

/// Painter's-algorithm queue: primitives are emitted far to near.
#[derive(Debug, Default)]
pub(crate) struct DepthQueue {
    items: Vec<(f64, Splat)>,
}

impl DepthQueue {
    pub(crate) fn with_capacity(n: usize) -> Self {
        Self {
            items: Vec::with_capacity(n),
        }
    }

    pub(crate) fn push(&mut self, depth: f64, splat: Splat) {
        self.items.push((depth, splat));
    }

    /// Project `p` and queue a disc of world radius `size`. Culled points are ignored.
    pub(crate) fn disc(&mut self, camera: &Camera, p: Vec3, size: f64, color: Rgba8) {
        if let Some(pr) = camera.project(p) {
            self.push(
                pr.depth,
                Splat::Disc {
                    center: pr.point,
                    radius: size * pr.scale,
                    color,
                },
            );
        }
    }

    pub(crate) fn glow(&mut self, camera: &Camera, p: Vec3, size: f64, color: Rgba8) {
        if let Some(pr) = camera.project(p) {
            self.push(
                pr.depth,
                Splat::Glow {
                    center: pr.point,
                    radius: size * pr.scale,
                    color,
                },
            );
        }
    }

    pub(crate) fn segment(&mut self, camera: &Camera, a: Vec3, b: Vec3, width: f64, color: Rgba8) {
        if let (Some(pa), Some(pb)) = (camera.project(a), camera.project(b)) {
            self.push(
                0.5 * (pa.depth + pb.depth),
                Splat::Line {
                    from: pa.point,
                    to: pb.point,
                    width: width * 0.5 * (pa.scale + pb.scale),
                    color,
                },
            );
        }
    }

    /// Emit everything into `list`, farthest first. Ties keep push order.
    pub(crate) fn flush(mut self, list: &mut DrawList) {
        self.items.sort_by(|a, b| b.0.total_cmp(&a.0));
        for (_, splat) in self.items {
            match splat {
                Splat::Disc {
                    center,
                    radius,
                    color,
                } => {
                    list.circle(center, radius, color);
                }
                Splat::Glow {
                    center,
                    radius,
                    color,
                } => {
                    list.glow(center, radius, color, 4);
                }
                Splat::Line {
                    from,
                    to,
                    width,
                    color,
                } => {
                    list.line(from, to, width, color);
                }
            }
        }
    }
}
