use std::f64::consts::TAU;

use crate::foundation::core::{Point, Vec3};
use crate::foundation::error::{SketchError, SketchResult};

/// Vertices of Metatron's cube.
pub const METATRON_VERTICES: usize = 13;

/// Axial hex-lattice steps in ring-walk order.
const HEX_STEPS: [(i32, i32); 6] = [(1, 0), (0, 1), (-1, 1), (-1, 0), (0, -1), (1, -1)];

fn axial(q: i32, r: i32, spacing: f64) -> Point {
    let (q, r) = (f64::from(q), f64::from(r));
    Point::new(spacing * (q + 0.5 * r), spacing * r * 3f64.sqrt() / 2.0)
}

/// Number of circles in a Flower of Life with `rings` hexagonal rings.
pub fn flower_count(rings: usize) -> usize {
    1 + 3 * rings * (rings + 1)
}

/// Circle centres of a Flower of Life, relative to the middle circle.
///
/// Neighbouring centres are `spacing` apart, so circles of radius `spacing` pass through each
/// other's centres. The middle circle comes first, then each ring in turn, `6·k` centres for
/// ring `k`.
pub fn flower_of_life(rings: usize, spacing: f64) -> Vec<Point> {
    let mut centres = Vec::with_capacity(flower_count(rings));
    centres.push(Point::ORIGIN);
    for k in 1..=rings as i32 {
        let (mut q, mut r) = (0, -k);
        for (dq, dr) in HEX_STEPS {
            for _ in 0..k {
                centres.push(axial(q, r, spacing));
                q += dq;
                r += dr;
            }
        }
    }
    centres
}

/// Fruit-of-Life centres for circles of `radius`: the middle, an inner hexagon at `2·radius`
/// and an outer hexagon at `4·radius` on the same spokes, turned by `rotation`.
pub fn metatron_vertices(radius: f64, rotation: f64) -> [Point; METATRON_VERTICES] {
    let mut vertices = [Point::ORIGIN; METATRON_VERTICES];
    for i in 0..6 {
        let (s, c) = (rotation + i as f64 * TAU / 6.0).sin_cos();
        vertices[1 + i] = Point::new(2.0 * radius * c, 2.0 * radius * s);
        vertices[7 + i] = Point::new(4.0 * radius * c, 4.0 * radius * s);
    }
    vertices
}

/// Metatron's cube joins every vertex to every other: 78 index pairs, `a < b`.
pub fn metatron_edges() -> Vec<(usize, usize)> {
    (0..METATRON_VERTICES)
        .flat_map(|a| (a + 1..METATRON_VERTICES).map(move |b| (a, b)))
        .collect()
}

/// Ring torus around the y axis.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Torus {
    /// Distance from the axis to the tube center.
    pub major: f64,
    /// Tube radius.
    pub minor: f64,
}

impl Torus {
    pub const fn new(major: f64, minor: f64) -> Self {
        Self { major, minor }
    }

    pub fn validate(&self) -> SketchResult<()> {
        if !self.major.is_finite() || !self.minor.is_finite() {
            return Err(SketchError::validation("torus radii must be finite"));
        }
        if !(self.minor > 0.0 && self.major > self.minor) {
            return Err(SketchError::validation("torus radii must satisfy major > minor > 0"));
        }
        Ok(())
    }

    /// Surface point at angle `u` around the axis and `v` around the tube.
    pub fn point(&self, u: f64, v: f64) -> Vec3 {
        let ring = self.major + self.minor * v.cos();
        Vec3::new(ring * u.cos(), self.minor * v.sin(), ring * u.sin())
    }

    /// Closed `(p, q)` torus knot: `p` turns around the axis, `q` around the tube, with the
    /// tube angle shifted by `phase`.
    pub fn knot(&self, p: u32, q: u32, phase: f64, samples: usize) -> Vec<Vec3> {
        if samples == 0 {
            return Vec::new();
        }
        let step = TAU / samples as f64;
        (0..samples)
            .map(|i| {
                let s = i as f64 * step;
                self.point(f64::from(p) * s, f64::from(q) * s + phase)
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/curves/sacred.rs"]
mod tests;
