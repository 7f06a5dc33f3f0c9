use crate::draw::DrawList;
use crate::driver::sketch::{FrameContext, Sketch};
use crate::foundation::core::{Canvas, Point, Rgba8};
use crate::foundation::error::SketchResult;
use crate::scene::factory::{DriftConfig, EntityConfig, EntityFactory, Span};
use crate::scene::palette::Palette;
use crate::scene::state::Layer;

pub const DUST: usize = 400;
pub const STARS: usize = 80;

/// Flat parallax field: dust drifting at depth-scaled speed over fixed twinkling stars.
#[derive(Debug, Default)]
pub struct DriftField;

pub fn build() -> SketchResult<Box<dyn Sketch>> {
    Ok(Box::new(DriftField))
}

impl Sketch for DriftField {
    fn name(&self) -> &'static str {
        "drift-field"
    }

    fn background(&self) -> Rgba8 {
        Rgba8::rgb(0x0a, 0x0c, 0x14)
    }

    fn populate(
        &mut self,
        factory: &mut EntityFactory,
        palette: &Palette,
        canvas: Canvas,
    ) -> SketchResult<Vec<Layer>> {
        let bounds = canvas.rect();
        let dust = factory.create_entities(
            DUST,
            &EntityConfig::Drift(DriftConfig {
                bounds,
                speed: Span::new(-0.6, 0.6),
                depth: Span::new(0.4, 1.6),
                size: Span::new(0.8, 2.4),
            }),
            palette,
        )?;
        let stars = factory.create_entities(
            STARS,
            &EntityConfig::Drift(DriftConfig {
                bounds,
                speed: Span::fixed(0.0),
                depth: Span::fixed(1.0),
                size: Span::new(0.6, 1.4),
            }),
            palette,
        )?;
        Ok(vec![Layer::new("stars", stars), Layer::new("dust", dust)])
    }

    fn draw(&self, frame: &FrameContext<'_>, list: &mut DrawList) {
        let t = frame.t;
        for (i, p) in frame.placements("stars") {
            let alpha = 0.3 + 0.7 * (0.5 + 0.5 * (t * 4.0 + i as f64 * 1.7).sin());
            list.circle(
                Point::new(p.position.x, p.position.y),
                p.size,
                Rgba8::WHITE.with_alpha(alpha),
            );
        }
        for (_, p) in frame.placements("dust") {
            let center = Point::new(p.position.x, p.position.y);
            list.glow(center, p.size * 2.5, p.color.with_alpha(0.35), 3);
            list.circle(center, p.size, p.color.with_alpha(0.9));
        }
    }
}
