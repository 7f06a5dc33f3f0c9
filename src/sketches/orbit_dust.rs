use crate::draw::{Camera, DrawList};
use crate::driver::sketch::{FrameContext, Sketch};
use crate::foundation::core::{Canvas, Rgba8, Vec3};
use crate::foundation::error::SketchResult;
use crate::scene::factory::{EntityConfig, EntityFactory, OrbitConfig, Span};
use crate::scene::palette::Palette;
use crate::scene::state::Layer;
use crate::sketches::{DepthQueue, Splat};

pub const PARTICLES: usize = 30;
pub const CONNECTION_DISTANCE: f64 = 120.0;
const AURA_RINGS: usize = 5;
const AURA_BASE: f64 = 160.0;
const AURA_GAP: f64 = 35.0;

/// Orbiting dust with proximity links, inside breathing aura rings.
#[derive(Debug, Default)]
pub struct OrbitDust;

pub fn build() -> SketchResult<Box<dyn Sketch>> {
    Ok(Box::new(OrbitDust))
}

pub fn dust_config() -> EntityConfig {
    EntityConfig::Orbit(OrbitConfig {
        radius: Span::new(280.0, 450.0),
        height: Span::new(-400.0, 400.0),
        speed: Span::new(0.3, 0.8),
        size: Span::new(3.0, 6.0),
    })
}

impl Sketch for OrbitDust {
    fn name(&self) -> &'static str {
        "orbit-dust"
    }

    fn background(&self) -> Rgba8 {
        Rgba8::rgb(8, 6, 18)
    }

    fn populate(
        &mut self,
        factory: &mut EntityFactory,
        palette: &Palette,
        _canvas: Canvas,
    ) -> SketchResult<Vec<Layer>> {
        let dust = factory.create_entities(PARTICLES, &dust_config(), palette)?;
        Ok(vec![Layer::new("dust", dust)])
    }

    fn draw(&self, frame: &FrameContext<'_>, list: &mut DrawList) {
        let t = frame.t;
        let camera = Camera::new(frame.canvas)
            .with_distance(950.0, 900.0)
            .with_orbit(t * 0.15, 0.25 * (t * 0.1).sin());

        let center = frame.canvas.center();
        for k in 0..AURA_RINGS {
            let kf = k as f64;
            let r = (AURA_BASE + kf * AURA_GAP) * (1.0 + 0.05 * (t * 1.2 + kf).sin());
            let color = frame
                .palette
                .get(k + 2)
                .with_alpha(0.12 + 0.06 * (t + kf).sin());
            list.ring(center, r, 1.5, color);
        }

        let dust: Vec<_> = frame.placements("dust").map(|(_, p)| p).collect();
        let mut queue = DepthQueue::with_capacity(dust.len() * 4);

        for (i, a) in dust.iter().enumerate() {
            for b in &dust[i + 1..] {
                let d = a.position.distance(b.position);
                if d < CONNECTION_DISTANCE {
                    let color = a
                        .color
                        .lerp(b.color, 0.5)
                        .with_alpha(0.6 * (1.0 - d / CONNECTION_DISTANCE));
                    queue.segment(&camera, a.position, b.position, 1.0, color);
                }
            }
        }

        for (i, p) in dust.iter().enumerate() {
            let Some(pr) = camera.project(p.position) else {
                continue;
            };
            let fog = 0.6 + 0.4 * camera.fog(pr.depth, 500.0, 1400.0);
            let pulse = (120.0 + 80.0 * (t * 2.0 + i as f64).sin()) / 255.0;
            let color = p.color.with_alpha(pulse * fog);
            queue.push(
                pr.depth,
                Splat::Glow {
                    center: pr.point,
                    radius: p.size * 3.5 * pr.scale,
                    color: color.fade(0.4),
                },
            );
            queue.push(
                pr.depth - 1e-6,
                Splat::Disc {
                    center: pr.point,
                    radius: p.size * pr.scale,
                    color: color.with_alpha(fog),
                },
            );
        }
        queue.flush(list);

        // Sparse sparkle at the heart of the aura.
        let core = Vec3::new(0.0, 8.0 * (t * 0.7).sin(), 0.0);
        if let Some(pr) = camera.project(core) {
            list.glow(pr.point, 24.0 * pr.scale, frame.palette.get(4).with_alpha(0.5), 5);
        }
    }
}
