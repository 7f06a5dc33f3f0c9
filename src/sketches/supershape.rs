use std::f64::consts::PI;

use crate::curves::superformula::{Superformula, Supershape};
use crate::draw::{Camera, DrawList};
use crate::driver::sketch::{FrameContext, Sketch};
use crate::foundation::core::{Canvas, Rgba8};
use crate::foundation::error::SketchResult;
use crate::foundation::math::map_range;
use crate::scene::factory::EntityFactory;
use crate::scene::palette::Palette;
use crate::scene::state::Layer;

pub const TOTAL: usize = 45;
const SCALE: f64 = 200.0;

/// Superformula solid with a morphing symmetry order, drawn as a wire mesh.
#[derive(Debug, Default)]
pub struct SupershapeSketch;

pub fn build() -> SketchResult<Box<dyn Sketch>> {
    Ok(Box::new(SupershapeSketch))
}

/// Shape at `tick`: the symmetry order sweeps `[0, 7]`.
pub fn shape_at(tick: u64) -> Supershape {
    let m = map_range((tick as f64 * 0.02).sin(), -1.0, 1.0, 0.0, 7.0);
    Supershape::uniform(Superformula::new(m, 0.2, 1.7, 1.7), SCALE)
}

impl Sketch for SupershapeSketch {
    fn name(&self) -> &'static str {
        "supershape"
    }

    fn background(&self) -> Rgba8 {
        Rgba8::rgb(0x29, 0x30, 0x39)
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
        let t = frame.t;
        let camera = Camera::new(frame.canvas)
            .with_distance(900.0, 1400.0)
            .with_orbit(t * 0.5, PI / 6.0 + 0.2 * (t * 0.3).sin());
        let grid = shape_at(frame.tick).grid(TOTAL);
        let rows = grid.len().max(1) as f64;

        for (i, row) in grid.iter().enumerate() {
            let color = frame.palette.gradient(i as f64 / rows + t * 0.05);
            let points = row
                .iter()
                .filter_map(|&p| camera.project(p).map(|pr| pr.point));
            list.polyline(points, false, 1.0, color.with_alpha(0.7));
        }

        let cols = grid.first().map_or(0, Vec::len);
        for j in 0..cols {
            let color = frame.palette.gradient(j as f64 / cols as f64 + 0.5);
            let points = grid
                .iter()
                .filter_map(|row| row.get(j))
                .filter_map(|&p| camera.project(p).map(|pr| pr.point));
            list.polyline(points, false, 0.6, color.with_alpha(0.4));
        }
    }
}
