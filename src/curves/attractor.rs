use std::sync::Arc;

use crate::foundation::core::Vec3;
use crate::foundation::error::{SketchError, SketchResult};

/// Autonomous 3D ODE `dp/dt = f(p)`.
pub trait OdeSystem {
    fn derivative(&self, p: Vec3) -> Vec3;
}

/// Aizawa system.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Aizawa {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for Aizawa {
    fn default() -> Self {
        Self {
            a: 0.95,
            b: 0.7,
            c: 0.6,
            d: 3.5,
            e: 0.25,
            f: 0.1,
        }
    }
}

impl OdeSystem for Aizawa {
    fn derivative(&self, p: Vec3) -> Vec3 {
        let Vec3 { x, y, z } = p;
        Vec3::new(
            (z - self.b) * x - self.d * y,
            self.d * x + (z - self.b) * y,
            self.c + self.a * z - z.powi(3) / 3.0 - (x * x + y * y) * (1.0 + self.e * z)
                + self.f * z * x.powi(3),
        )
    }
}

/// Fixed-step Euler integration settings.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Integration {
    pub start: Vec3,
    pub dt: f64,
    pub steps: usize,
    /// Uniform scale applied to every stored point.
    pub scale: f64,
}

impl Default for Integration {
    fn default() -> Self {
        Self {
            start: Vec3::new(0.1, 0.0, 0.0),
            dt: 0.01,
            steps: 6000,
            scale: 95.0,
        }
    }
}

/// Precomputed, immutable attractor trajectory replayed through a modular window.
///
/// The buffer length is fixed at generation time and is never zero, so every replay index
/// `(start + i) mod len` is in bounds.
#[derive(Clone, Debug, PartialEq)]
pub struct AttractorBuffer {
    points: Arc<[Vec3]>,
}

impl AttractorBuffer {
    #[tracing::instrument(skip(system))]
    pub fn integrate<S: OdeSystem>(system: &S, params: Integration) -> SketchResult<Self> {
        if params.steps == 0 {
            return Err(SketchError::validation("attractor steps must be > 0"));
        }
        if !params.dt.is_finite() || params.dt <= 0.0 {
            return Err(SketchError::validation("attractor dt must be finite and > 0"));
        }
        if !params.scale.is_finite() || !params.start.is_finite() {
            return Err(SketchError::validation(
                "attractor start and scale must be finite",
            ));
        }

        let mut p = params.start;
        let mut points = Vec::with_capacity(params.steps);
        for step in 0..params.steps {
            p = p + system.derivative(p) * params.dt;
            if !p.is_finite() {
                return Err(SketchError::validation(format!(
                    "attractor integration diverged at step {step}"
                )));
            }
            points.push(p * params.scale);
        }

        tracing::debug!(len = points.len(), "attractor buffer ready");
        Ok(Self {
            points: points.into(),
        })
    }

    pub fn from_points(points: Vec<Vec3>) -> SketchResult<Self> {
        if points.is_empty() {
            return Err(SketchError::validation("attractor buffer must not be empty"));
        }
        Ok(Self {
            points: points.into(),
        })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Window start for clock `t`: `floor(t · speed) mod len`. Negative or non-finite input
    /// starts at 0.
    pub fn start_index(&self, t: f64, speed: f64) -> usize {
        let v = t * speed;
        if !v.is_finite() || v < 0.0 {
            return 0;
        }
        let len = self.points.len() as u64;
        ((v.floor() as u64) % len) as usize
    }

    /// Buffer index of the `i`-th sample of a window starting at `start`.
    pub fn replay_index(&self, start: usize, i: usize) -> usize {
        let len = self.points.len();
        (start % len + i % len) % len
    }

    pub fn get(&self, start: usize, i: usize) -> Vec3 {
        self.points[self.replay_index(start, i)]
    }

    /// `count` samples starting at `start`, taking every `stride`-th one.
    pub fn window(
        &self,
        start: usize,
        count: usize,
        stride: usize,
    ) -> impl Iterator<Item = Vec3> + '_ {
        (0..count)
            .step_by(stride.max(1))
            .map(move |i| self.get(start, i))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/curves/attractor.rs"]
mod tests;
