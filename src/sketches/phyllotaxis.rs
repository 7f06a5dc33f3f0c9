use crate::curves::spiral::PowerSpiral;
use crate::draw::DrawList;
use crate::driver::sketch::{FrameContext, Sketch};
use crate::foundation::core::{Canvas, Point, Rgba8};
use crate::foundation::error::SketchResult;
use crate::scene::factory::EntityFactory;
use crate::scene::palette::Palette;
use crate::scene::state::Layer;

pub const POINTS: usize = 2000;

/// Flat golden-angle sunflower that slowly turns.
#[derive(Debug)]
pub struct Phyllotaxis {
    spiral: PowerSpiral,
}

pub fn build() -> SketchResult<Box<dyn Sketch>> {
    let spiral = PowerSpiral::golden(9.0, 0.5, 340.0).with_twist(0.15);
    spiral.validate()?;
    Ok(Box::new(Phyllotaxis { spiral }))
}

impl Sketch for Phyllotaxis {
    fn name(&self) -> &'static str {
        "phyllotaxis"
    }

    fn background(&self) -> Rgba8 {
        Rgba8::rgb(0x10, 0x0e, 0x1c)
    }

    fn populate(
        &mut self,
        _factory: &mut EntityFactory,
        _palette: &Palette,
        _canvas: Canvas,
    ) -> SketchResult<Vec<Layer>> {
        Ok(Vec::new())
    }

    fn draw(&self, frame: &FrameContext<'_>, list: &mut DrawList) {
        let c = frame.canvas.center();
        let points = self.spiral.points(POINTS, frame.t);
        let count = points.len().max(1) as f64;
        for sp in points {
            let size = 2.0 + 3.0 * (1.0 - sp.radius / self.spiral.max_radius);
            let color = frame
                .palette
                .gradient(sp.index as f64 / count + frame.t * 0.1);
            list.circle(
                Point::new(c.x + sp.position.x, c.y + sp.position.y),
                size,
                color,
            );
        }
    }
}
