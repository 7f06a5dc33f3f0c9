use crate::curves::attractor::{Aizawa, AttractorBuffer, Integration};
use crate::draw::{Camera, DrawList};
use crate::driver::sketch::{FrameContext, Sketch};
use crate::foundation::core::{Canvas, Point, Rgba8, Vec3};
use crate::foundation::error::SketchResult;
use crate::scene::factory::{DriftConfig, EntityConfig, EntityFactory, Span};
use crate::scene::palette::Palette;
use crate::scene::state::Layer;

pub const WINDOW: usize = 3500;
pub const SEGMENT: usize = 100;
pub const ORB_STRIDE: usize = 175;
/// Buffer samples advanced per unit of clock time.
pub const REPLAY_SPEED: f64 = 180.0;
const STARS: usize = 120;

/// Aizawa attractor replayed as a fading trail through a precomputed buffer.
#[derive(Debug)]
pub struct AizawaTrail {
    buffer: AttractorBuffer,
}

pub fn build() -> SketchResult<Box<dyn Sketch>> {
    let buffer = AttractorBuffer::integrate(&Aizawa::default(), Integration::default())?;
    Ok(Box::new(AizawaTrail { buffer }))
}

impl AizawaTrail {
    /// Lay the attractor on its side, centered on the lobe.
    fn world(p: Vec3) -> Vec3 {
        Vec3::new(p.x, -(p.z - 70.0), p.y)
    }
}

impl Sketch for AizawaTrail {
    fn name(&self) -> &'static str {
        "aizawa-trail"
    }

    fn background(&self) -> Rgba8 {
        Rgba8::rgb(6, 6, 14)
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
                speed: Span::new(-0.05, 0.05),
                depth: Span::new(0.3, 1.0),
                size: Span::new(0.5, 1.6),
            }),
            palette,
        )?;
        Ok(vec![Layer::new("stars", stars)])
    }

    fn draw(&self, frame: &FrameContext<'_>, list: &mut DrawList) {
        let t = frame.t;
        for (i, p) in frame.placements("stars") {
            let twinkle = 0.35 + 0.3 * (t * 2.0 + i as f64).sin();
            list.circle(
                Point::new(p.position.x, p.position.y),
                p.size,
                Rgba8::WHITE.with_alpha(twinkle),
            );
        }

        let camera = Camera::new(frame.canvas)
            .with_distance(900.0, 850.0)
            .with_orbit(t * 0.2, 0.35);
        let start = self.buffer.start_index(t, REPLAY_SPEED);

        // Consecutive segments share an endpoint so the trail stays connected.
        let segments = WINDOW / SEGMENT;
        for s in 0..segments {
            let from = s * SEGMENT;
            let to = (from + SEGMENT + 1).min(WINDOW);
            let points = (from..to).filter_map(|i| {
                camera
                    .project(Self::world(self.buffer.get(start, i)))
                    .map(|pr| pr.point)
            });
            let age = (s + 1) as f64 / segments as f64;
            let color = frame.palette.gradient(age * 0.5 + t * 0.02);
            list.polyline(points, false, 0.6 + 1.4 * age, color.with_alpha(0.1 + 0.7 * age));
        }

        for (k, p) in self.buffer.window(start, WINDOW, ORB_STRIDE).enumerate() {
            if let Some(pr) = camera.project(Self::world(p)) {
                let color = frame.palette.get(k);
                list.glow(pr.point, 4.0 * pr.scale, color.with_alpha(0.6), 4);
            }
        }
    }
}
