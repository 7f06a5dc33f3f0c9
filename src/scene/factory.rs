use std::f64::consts::TAU;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::curves::harmonics::fibonacci_sphere;
use crate::foundation::core::{Point, Rect, Vec2};
use crate::foundation::error::{SketchError, SketchResult};
use crate::scene::entity::{Entity, Motion};
use crate::scene::palette::Palette;

/// Closed interval `[min, max]` used for randomized entity parameters.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Span {
    pub min: f64,
    pub max: f64,
}

impl Span {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub const fn fixed(v: f64) -> Self {
        Self { min: v, max: v }
    }

    pub fn contains(&self, v: f64) -> bool {
        self.min <= v && v <= self.max
    }

    fn validate(&self, what: &str) -> SketchResult<()> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(SketchError::validation(format!("{what} range must be finite")));
        }
        if self.min > self.max {
            return Err(SketchError::validation(format!(
                "{what} range min ({}) must be <= max ({})",
                self.min, self.max
            )));
        }
        Ok(())
    }

    fn validate_non_negative(&self, what: &str) -> SketchResult<()> {
        self.validate(what)?;
        if self.min < 0.0 {
            return Err(SketchError::validation(format!(
                "{what} range must be non-negative (got min {})",
                self.min
            )));
        }
        Ok(())
    }

    fn sample(&self, rng: &mut Pcg32) -> f64 {
        if self.min == self.max {
            return self.min;
        }
        rng.random_range(self.min..=self.max)
    }

    fn at(&self, u: f64) -> f64 {
        self.min + (self.max - self.min) * u.clamp(0.0, 1.0)
    }
}

/// Orbiting particles: random angle, fixed radius and height.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OrbitConfig {
    pub radius: Span,
    pub height: Span,
    pub speed: Span,
    pub size: Span,
}

/// Particles seeded on a Fibonacci sphere. Placement is closed-form; only sizes are random.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ShellConfig {
    pub radius: Span,
    pub size: Span,
}

/// Free particles drifting in canvas space.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DriftConfig {
    pub bounds: Rect,
    /// Per-axis velocity range, in pixels per frame.
    pub speed: Span,
    pub depth: Span,
    pub size: Span,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntityConfig {
    Orbit(OrbitConfig),
    Shell(ShellConfig),
    Drift(DriftConfig),
}

impl EntityConfig {
    pub fn validate(&self) -> SketchResult<()> {
        match self {
            EntityConfig::Orbit(c) => {
                c.radius.validate_non_negative("orbit radius")?;
                c.height.validate("orbit height")?;
                c.speed.validate("orbit speed")?;
                c.size.validate_non_negative("orbit size")?;
            }
            EntityConfig::Shell(c) => {
                c.radius.validate_non_negative("shell radius")?;
                c.size.validate_non_negative("shell size")?;
            }
            EntityConfig::Drift(c) => {
                let b = c.bounds;
                if ![b.x0, b.y0, b.x1, b.y1].iter().all(|v| v.is_finite())
                    || b.width() <= 0.0
                    || b.height() <= 0.0
                {
                    return Err(SketchError::validation(
                        "drift bounds must be finite with positive width and height",
                    ));
                }
                c.speed.validate("drift speed")?;
                c.depth.validate_non_negative("drift depth")?;
                c.size.validate_non_negative("drift size")?;
            }
        }
        Ok(())
    }
}

/// Seeded generator of entity populations.
///
/// Two factories built from the same seed produce identical populations for identical call
/// sequences.
#[derive(Clone, Debug)]
pub struct EntityFactory {
    rng: Pcg32,
}

impl EntityFactory {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Random source for sketch-level constants drawn alongside the entity layers.
    pub fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    #[tracing::instrument(skip(self, config, palette))]
    pub fn create_entities(
        &mut self,
        count: usize,
        config: &EntityConfig,
        palette: &Palette,
    ) -> SketchResult<Vec<Entity>> {
        config.validate()?;
        let colors = palette.len();
        let rng = &mut self.rng;

        let entities = match config {
            EntityConfig::Orbit(c) => (0..count)
                .map(|_| Entity {
                    motion: Motion::Orbit {
                        angle: rng.random_range(0.0..TAU),
                        radius: c.radius.sample(rng),
                        height: c.height.sample(rng),
                        speed: c.speed.sample(rng),
                    },
                    color: rng.random_range(0..colors),
                    size: c.size.sample(rng),
                    phase: rng.random_range(0.0..TAU),
                })
                .collect(),
            EntityConfig::Shell(c) => (0..count)
                .map(|i| {
                    let (azimuth, polar) = fibonacci_sphere(i, count);
                    Entity {
                        motion: Motion::Shell {
                            azimuth,
                            polar,
                            radius: c.radius.at(0.5 + 0.5 * (i as f64 * 0.5).sin()),
                            speed: 0.5 + (i % 10) as f64 / 10.0,
                        },
                        color: i % colors,
                        size: c.size.sample(rng),
                        phase: i as f64 * 0.1,
                    }
                })
                .collect(),
            EntityConfig::Drift(c) => (0..count)
                .map(|_| {
                    let b = c.bounds;
                    Entity {
                        motion: Motion::Drift {
                            origin: Point::new(
                                rng.random_range(b.x0..b.x1),
                                rng.random_range(b.y0..b.y1),
                            ),
                            velocity: Vec2::new(c.speed.sample(rng), c.speed.sample(rng)),
                            depth: c.depth.sample(rng),
                            bounds: b,
                        },
                        color: rng.random_range(0..colors),
                        size: c.size.sample(rng),
                        phase: rng.random_range(0.0..TAU),
                    }
                })
                .collect(),
        };

        tracing::debug!(count, "created entity layer");
        Ok(entities)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/factory.rs"]
mod tests;
