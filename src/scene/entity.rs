use crate::foundation::core::{Point, Rect, Rgba8, Vec2, Vec3};
use crate::scene::palette::Palette;

/// Frame time handed to every entity: the clock value and the tick count that produced it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EvalCtx {
    pub t: f64,
    pub tick: u64,
}

/// Motion rule of an entity. Every variant is a closed-form function of [`EvalCtx`] and the
/// parameters fixed at creation; nothing here is mutated per frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Motion {
    /// Circular orbit in the XZ plane. `radius` and `height` are never modified.
    Orbit {
        angle: f64,
        radius: f64,
        height: f64,
        speed: f64,
    },
    /// Point on a sphere shell, perturbed by a harmonic radius modulation and a small wobble.
    Shell {
        azimuth: f64,
        polar: f64,
        radius: f64,
        speed: f64,
    },
    /// Straight-line drift in canvas space with toroidal wrap inside `bounds`.
    Drift {
        origin: Point,
        velocity: Vec2,
        depth: f64,
        bounds: Rect,
    },
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Entity {
    pub motion: Motion,
    /// Index into the scene palette.
    pub color: usize,
    pub size: f64,
    pub phase: f64,
}

/// Per-frame evaluated appearance of one entity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub position: Vec3,
    pub size: f64,
    pub color: Rgba8,
}

impl Placement {
    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.size.is_finite()
    }
}

impl Entity {
    /// Evaluate the entity at `ctx`. Pure: depends only on `self`, `ctx` and `palette`.
    pub fn place(&self, ctx: EvalCtx, palette: &Palette) -> Placement {
        let t = ctx.t;
        match &self.motion {
            Motion::Orbit {
                angle,
                radius,
                height,
                speed,
            } => {
                let a = angle + speed * t;
                let position = Vec3::new(
                    radius * a.cos(),
                    height + 12.0 * (t + self.phase).sin(),
                    radius * a.sin(),
                );
                Placement {
                    position,
                    size: self.size * (1.0 + 0.3 * (t * 1.5 + self.phase).sin()),
                    color: palette.blend_next(self.color, (t * 0.3 + self.phase).rem_euclid(1.0)),
                }
            }
            Motion::Shell {
                azimuth,
                polar,
                radius,
                speed,
            } => {
                let ts = t * speed;
                let base = Vec3::from_spherical(*radius, *polar, *azimuth);
                let modulation = 30.0 * (3.0 * (ts + self.phase)).sin() * (2.0 * ts).cos();
                let scale = 1.0 + modulation / 300.0;
                let wobble = Vec3::new(
                    20.0 * (ts + self.phase).sin(),
                    20.0 * (ts * 1.1 + self.phase).cos(),
                    20.0 * (ts * 0.9 + self.phase).sin(),
                );
                Placement {
                    position: base * scale + wobble,
                    size: self.size,
                    color: palette.blend_next(self.color, (t * 0.3 + self.phase).rem_euclid(1.0)),
                }
            }
            Motion::Drift {
                origin,
                velocity,
                depth,
                bounds,
            } => {
                let steps = ctx.tick as f64 * depth;
                let x = wrap(origin.x + velocity.x * steps, bounds.x0, bounds.width());
                let y = wrap(origin.y + velocity.y * steps, bounds.y0, bounds.height());
                Placement {
                    position: Vec3::new(x, y, 0.0),
                    size: self.size * depth,
                    color: palette.get(self.color),
                }
            }
        }
    }

    /// Orbit radius, if this is an orbiting entity.
    pub fn orbit_radius(&self) -> Option<f64> {
        match self.motion {
            Motion::Orbit { radius, .. } => Some(radius),
            _ => None,
        }
    }
}

fn wrap(v: f64, lo: f64, span: f64) -> f64 {
    if span <= 0.0 {
        return lo;
    }
    let r = (v - lo).rem_euclid(span);
    // rem_euclid can round up to `span` for tiny negative inputs.
    if r >= span { lo } else { lo + r }
}
