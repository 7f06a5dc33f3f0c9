use std::f64::consts::TAU;

use crate::foundation::core::Vec3;
use crate::foundation::error::{SketchError, SketchResult};

/// 3D Lissajous figure `scale · (sin(a·u + phase), sin(b·u + delta), sin(c·u))`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Lissajous3 {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub delta: f64,
    pub scale: f64,
}

impl Lissajous3 {
    pub const fn new(a: f64, b: f64, c: f64, delta: f64, scale: f64) -> Self {
        Self {
            a,
            b,
            c,
            delta,
            scale,
        }
    }

    pub fn validate(&self) -> SketchResult<()> {
        if ![self.a, self.b, self.c, self.delta, self.scale]
            .iter()
            .all(|v| v.is_finite())
        {
            return Err(SketchError::validation("lissajous parameters must be finite"));
        }
        Ok(())
    }

    /// Point at parameter `u`, with the first axis shifted by `phase`.
    pub fn point(&self, u: f64, phase: f64) -> Vec3 {
        Vec3::new(
            self.scale * (self.a * u + phase).sin(),
            self.scale * (self.b * u + self.delta).sin(),
            self.scale * (self.c * u).sin(),
        )
    }

    /// One closed period sampled at `samples` evenly spaced parameters.
    pub fn trace(&self, phase: f64, samples: usize) -> Vec<Vec3> {
        if samples == 0 {
            return Vec::new();
        }
        let step = TAU / samples as f64;
        (0..samples)
            .map(|i| self.point(i as f64 * step, phase))
            .collect()
    }
}
