use std::f64::consts::{FRAC_PI_2, TAU};

use crate::curves::harmonics::{fibonacci_sphere, harmonic_surface_point};
use crate::curves::lissajous::Lissajous3;
use crate::curves::spiral::PowerSpiral;
use crate::draw::{Camera, DrawList};
use crate::driver::sketch::{FrameContext, Sketch};
use crate::foundation::core::{Canvas, Rgba8, Vec3};
use crate::foundation::error::SketchResult;
use crate::scene::factory::{EntityConfig, EntityFactory, ShellConfig, Span};
use crate::scene::palette::Palette;
use crate::scene::state::Layer;
use crate::sketches::DepthQueue;

pub const SHELL: usize = 200;
const NET_POINTS: usize = 400;
const SPIRAL_POINTS: usize = 600;
const CURVE_SAMPLES: usize = 240;

/// Shell particles around a breathing spherical-harmonic net, threaded by two Lissajous
/// curves and a golden spiral.
#[derive(Debug)]
pub struct HarmonicBloom {
    curves: [Lissajous3; 2],
    spiral: PowerSpiral,
}

pub fn build() -> SketchResult<Box<dyn Sketch>> {
    let curves = [
        Lissajous3::new(3.0, 2.0, 5.0, 0.0, 300.0),
        Lissajous3::new(5.0, 4.0, 3.0, FRAC_PI_2, 250.0),
    ];
    for c in &curves {
        c.validate()?;
    }
    let spiral = PowerSpiral::golden(12.0, 0.5, 330.0).with_twist(0.2);
    spiral.validate()?;
    Ok(Box::new(HarmonicBloom { curves, spiral }))
}

impl Sketch for HarmonicBloom {
    fn name(&self) -> &'static str {
        "harmonic-bloom"
    }

    fn background(&self) -> Rgba8 {
        Rgba8::rgb(0x0b, 0x0a, 0x1a)
    }

    fn populate(
        &mut self,
        factory: &mut EntityFactory,
        palette: &Palette,
        _canvas: Canvas,
    ) -> SketchResult<Vec<Layer>> {
        let shell = factory.create_entities(
            SHELL,
            &EntityConfig::Shell(ShellConfig {
                radius: Span::new(150.0, 350.0),
                size: Span::new(2.0, 5.0),
            }),
            palette,
        )?;
        Ok(vec![Layer::new("shell", shell)])
    }

    fn draw(&self, frame: &FrameContext<'_>, list: &mut DrawList) {
        let t = frame.t;
        let camera = Camera::new(frame.canvas)
            .with_distance(1000.0, 900.0)
            .with_orbit(t * 0.1, 0.3 * (t * 0.2).sin());
        let mut queue = DepthQueue::with_capacity(SHELL + NET_POINTS + SPIRAL_POINTS);

        let amplitude = 60.0 * (0.5 + 0.5 * t.sin());
        for i in 0..NET_POINTS {
            let (azimuth, polar) = fibonacci_sphere(i, NET_POINTS);
            let p = harmonic_surface_point(polar, azimuth, 3, 2, 90.0, amplitude);
            let color = frame.palette.gradient(azimuth / TAU + t * 0.05);
            queue.disc(&camera, p, 1.6, color.with_alpha(0.7));
        }

        for (i, p) in frame.placements("shell") {
            let color = p.color.with_alpha(0.5 + 0.3 * (t + i as f64 * 0.1).sin());
            queue.glow(&camera, p.position, p.size, color);
        }

        for sp in self.spiral.points(SPIRAL_POINTS, t) {
            let p = Vec3::new(sp.position.x, 0.0, sp.position.y);
            let fade = 1.0 - sp.radius / self.spiral.max_radius;
            let color = frame.palette.get(sp.index % 3 + 4).with_alpha(0.2 + 0.6 * fade);
            queue.disc(&camera, p, 1.2 + 1.8 * fade, color);
        }

        queue.flush(list);

        for (k, curve) in self.curves.iter().enumerate() {
            let points = curve
                .trace(t * 0.5, CURVE_SAMPLES)
                .into_iter()
                .filter_map(|p| camera.project(p).map(|pr| pr.point));
            let color = frame.palette.get(k * 2 + 1).with_alpha(0.45);
            list.polyline(points, true, 1.2, color);
        }
    }
}
