use std::f64::consts::{PI, TAU};

use crate::curves::sacred::{Torus, flower_of_life, metatron_edges, metatron_vertices};
use crate::curves::spiral::PowerSpiral;
use crate::draw::{Camera, DrawList};
use crate::driver::sketch::{FrameContext, Sketch};
use crate::foundation::core::{Canvas, Point, Rgba8, Vec2};
use crate::foundation::error::SketchResult;
use crate::foundation::math::lerp;
use crate::scene::factory::{DriftConfig, EntityConfig, EntityFactory, Span};
use crate::scene::palette::Palette;
use crate::scene::state::Layer;

pub const RINGS: usize = 2;
pub const LAYERS: usize = 3;
pub const RAYS: usize = 72;
pub const STRANDS: usize = 4;
const KNOT_SAMPLES: usize = 300;
const ARM_POINTS: usize = 260;
const STARS: usize = 90;

/// Breathing Flower of Life and Metatron's cube inside a turning torus knot, with cosmic rays
/// and two silver-ratio arms.
#[derive(Debug)]
pub struct SacredBloom {
    torus: Torus,
    arm: PowerSpiral,
}

pub fn build() -> SketchResult<Box<dyn Sketch>> {
    let torus = Torus::new(250.0, 80.0);
    torus.validate()?;
    let arm = PowerSpiral::metallic(2, 9.0, 0.6, 320.0).with_twist(-0.15);
    arm.validate()?;
    Ok(Box::new(SacredBloom { torus, arm }))
}

/// Flower-of-Life circle radius at clock `t`.
pub fn petal_radius(t: f64) -> f64 {
    35.0 + 8.0 * (t * 0.5).sin()
}

fn polar(center: Point, angle: f64, radius: f64) -> Point {
    center + Vec2::from_angle(angle) * radius
}

impl Sketch for SacredBloom {
    fn name(&self) -> &'static str {
        "sacred-bloom"
    }

    fn background(&self) -> Rgba8 {
        Rgba8::rgb(0x1a, 0x15, 0x25)
    }

    fn populate(
        &mut self,
        factory: &mut EntityFactory,
        palette: &Palette,
        canvas: Canvas,
    ) -> SketchResult<Vec<Layer>> {
        let stars = factory.create_entities(
            STARS,
            &EntityConfig::Drift(DriftConfig {
                bounds: canvas.rect(),
                speed: Span::new(-0.04, 0.04),
                depth: Span::new(0.3, 1.0),
                size: Span::new(0.4, 1.4),
            }),
            palette,
        )?;
        Ok(vec![Layer::new("stars", stars)])
    }

    fn draw(&self, frame: &FrameContext<'_>, list: &mut DrawList) {
        let t = frame.t;
        let c = frame.canvas.center();

        for (i, p) in frame.placements("stars") {
            let alpha = 0.2 + 0.5 * (0.5 + 0.5 * (t * 3.0 + i as f64 * 2.3).sin());
            list.circle(
                Point::new(p.position.x, p.position.y),
                p.size,
                p.color.with_alpha(alpha),
            );
        }

        let ray = frame.palette.get(4).with_alpha(0.12);
        for i in 0..RAYS {
            let k = i as f64;
            let angle = k * TAU / RAYS as f64 + t * 0.05;
            let inner = 300.0 + 100.0 * (t * 2.0 + k * 0.1).sin();
            let outer = 600.0 + 150.0 * (t + k * 0.05).sin();
            list.line(polar(c, angle, inner), polar(c, angle, outer), 1.0, ray);
        }

        let camera = Camera::new(frame.canvas).with_distance(1100.0, 900.0);
        let tilt = 0.1 * PI + 0.15 * (t * 0.2).sin();
        for s in 0..STRANDS {
            let phase = s as f64 * TAU / STRANDS as f64;
            let points = self
                .torus
                .knot(2, 3, phase, KNOT_SAMPLES)
                .into_iter()
                .filter_map(|p| camera.project(p.rotate_z(t * 0.12).rotate_x(tilt)))
                .map(|pr| pr.point);
            let color = frame.palette.get(s + 1).with_alpha(0.55);
            list.polyline(points, true, 1.4, color);
        }

        for side in [0.0, PI] {
            for sp in self.arm.points(ARM_POINTS, t) {
                let fade = 1.0 - sp.radius / self.arm.max_radius;
                let color = frame
                    .palette
                    .gradient(sp.radius / self.arm.max_radius + t * 0.05)
                    .with_alpha(0.15 + 0.5 * fade);
                list.circle(polar(c, sp.angle + side, sp.radius), 1.0 + 1.5 * fade, color);
            }
        }

        let radius = petal_radius(t);
        let stroke = Rgba8::rgb(0x84, 0xba, 0xe7);
        for layer in 0..LAYERS {
            let amt = layer as f64 / (LAYERS - 1) as f64;
            let r = radius * lerp(1.0, 2.0, amt);
            let color = stroke.with_alpha(lerp(0.6, 0.2, amt));
            for centre in flower_of_life(RINGS, r) {
                list.ring(c + centre.to_vec2(), r, 1.0, color);
            }
        }

        let vertices = metatron_vertices(radius, t * 0.1);
        let edge = frame.palette.get(2).with_alpha(0.2);
        for (a, b) in metatron_edges() {
            list.line(c + vertices[a].to_vec2(), c + vertices[b].to_vec2(), 0.8, edge);
        }
        let node = frame.palette.get(0).with_alpha(0.8);
        for v in vertices {
            list.circle(c + v.to_vec2(), 3.0, node);
        }
    }
}
