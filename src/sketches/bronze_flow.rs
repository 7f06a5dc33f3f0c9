use std::f64::consts::PI;

use crate::curves::spiral::PowerSpiral;
use crate::draw::{Camera, DrawList};
use crate::driver::sketch::{FrameContext, Sketch};
use crate::foundation::core::{Canvas, Rgba8, Vec3};
use crate::foundation::error::SketchResult;
use crate::foundation::math::map_range;
use crate::scene::factory::{EntityConfig, EntityFactory, OrbitConfig, Span};
use crate::scene::palette::Palette;
use crate::scene::state::Layer;
use crate::sketches::DepthQueue;

pub const ELEMENTS: usize = 700;
pub const ORBITALS: usize = 100;
const GEM_EVERY: usize = 25;

/// Bronze-ratio helix of petals and needles, circled by slow orbitals.
#[derive(Debug)]
pub struct BronzeFlow {
    /// Constant-radius bronze arm; its radius is the helix base radius.
    arm: PowerSpiral,
}

pub fn build() -> SketchResult<Box<dyn Sketch>> {
    Ok(Box::new(BronzeFlow::new()))
}

fn orbital_config() -> EntityConfig {
    EntityConfig::Orbit(OrbitConfig {
        radius: Span::new(500.0, 900.0),
        height: Span::new(-1000.0, 1000.0),
        speed: Span::new(0.15, 0.25),
        size: Span::new(1.5, 3.0),
    })
}

impl BronzeFlow {
    fn new() -> Self {
        Self {
            arm: PowerSpiral::metallic(3, 350.0, 0.0, 350.0).with_twist(0.1),
        }
    }

    /// World position, size and gradient position of element `i` at clock `t`.
    fn element(&self, i: usize, t: f64) -> (Vec3, f64, f64) {
        let p = i as f64 / ELEMENTS as f64;
        let theta = self.arm.angle(i, t);
        let y = map_range(i as f64, 0.0, ELEMENTS as f64, -800.0, 800.0)
            + 30.0 * (p * PI * 6.0 + t).sin();
        let envelope = (p * PI).sin();
        let r = self.arm.radius(i)
            * envelope
            * (0.8 + 0.4 * (theta * 3.0 - t * 0.5).cos())
            * (1.0 + 0.1 * (t * 0.8).sin());
        let size = 20.0 * envelope * (1.0 + 0.5 * (i as f64 * 0.5 + t * 2.0).sin());
        (
            Vec3::new(r * theta.cos(), y, r * theta.sin()),
            size,
            p + t * 0.05,
        )
    }
}

impl Sketch for BronzeFlow {
    fn name(&self) -> &'static str {
        "bronze-flow"
    }

    fn background(&self) -> Rgba8 {
        Rgba8::rgb(0x28, 0x36, 0x31)
    }

    fn populate(
        &mut self,
        factory: &mut EntityFactory,
        palette: &Palette,
        _canvas: Canvas,
    ) -> SketchResult<Vec<Layer>> {
        let orbitals = factory.create_entities(ORBITALS, &orbital_config(), palette)?;
        Ok(vec![Layer::new("orbitals", orbitals)])
    }

    fn draw(&self, frame: &FrameContext<'_>, list: &mut DrawList) {
        let t = frame.t;
        let camera = Camera::new(frame.canvas)
            .with_distance(1800.0, 1500.0)
            .with_orbit(t * 0.05, 0.2 * (t * 0.1).sin());

        let mut queue = DepthQueue::with_capacity(ELEMENTS + ORBITALS + 2);

        let core = frame.palette.get(3).with_alpha(0.8);
        queue.glow(&camera, Vec3::ZERO, 50.0 + 10.0 * (t * 4.0).sin(), core);

        for i in 0..ELEMENTS {
            let (pos, size, grad) = self.element(i, t);
            let color = frame.palette.gradient(grad);
            if i % GEM_EVERY == 0 {
                queue.glow(&camera, pos, size * 0.8, color.with_alpha(0.9));
                continue;
            }
            // Petals lean along the helix tangent; needles point outward.
            let dir = if i % 2 == 0 {
                Vec3::new(-pos.z, 0.0, pos.x)
            } else {
                Vec3::new(pos.x, 0.0, pos.z)
            };
            let len = dir.length();
            if !(len > 1e-9) {
                continue;
            }
            let reach = if i % 2 == 0 { size } else { size * 3.0 };
            let tip = pos + dir * (reach / len);
            let width = if i % 2 == 0 { size * 0.35 } else { 1.0 };
            queue.segment(&camera, pos, tip, width, color.with_alpha(0.75));
        }

        for (_, p) in frame.placements("orbitals") {
            queue.disc(&camera, p.position, p.size, p.color.with_alpha(0.5));
        }

        queue.flush(list);

        let ring = frame.palette.get(5).with_alpha(0.4);
        if let Some(pr) = camera.project(Vec3::ZERO) {
            list.ring(pr.point, 100.0 * pr.scale, 2.0, ring);
        }
    }
}
