use crate::draw::DrawList;
use crate::foundation::core::{Canvas, Fps, Rgba8};
use crate::foundation::error::SketchResult;
use crate::scene::entity::Placement;
use crate::scene::factory::EntityFactory;
use crate::scene::palette::Palette;
use crate::scene::state::Layer;

/// Placements of one layer for the current frame, in entity order.
///
/// A `None` slot is an entity whose evaluation produced non-finite values; it is skipped for
/// this frame only.
#[derive(Clone, Debug, PartialEq)]
pub struct EvaluatedLayer {
    pub name: String,
    pub placements: Vec<Option<Placement>>,
}

impl EvaluatedLayer {
    /// Valid placements with their entity index.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Placement)> + '_ {
        self.placements
            .iter()
            .enumerate()
            .filter_map(|(i, p)| p.as_ref().map(|p| (i, p)))
    }

    pub fn malformed(&self) -> usize {
        self.placements.iter().filter(|p| p.is_none()).count()
    }
}

/// Read-only view handed to [`Sketch::draw`].
#[derive(Clone, Copy, Debug)]
pub struct FrameContext<'a> {
    pub t: f64,
    pub tick: u64,
    pub canvas: Canvas,
    pub palette: &'a Palette,
    pub layers: &'a [EvaluatedLayer],
}

impl<'a> FrameContext<'a> {
    pub fn layer(&self, name: &str) -> Option<&'a EvaluatedLayer> {
        self.layers.iter().find(|l| l.name == name)
    }

    /// Placements of `name`, or nothing if the layer does not exist.
    pub fn placements(&self, name: &str) -> impl Iterator<Item = (usize, &'a Placement)> + 'a {
        self.layer(name).into_iter().flat_map(|l| l.iter())
    }
}

/// One generative sketch: how to seed its entities and how to draw a frame.
///
/// Entity motion lives in the entities themselves; `draw` only turns already-evaluated
/// placements (and any precomputed, immutable sketch data) into primitives.
pub trait Sketch: Send {
    fn name(&self) -> &'static str;

    fn palette(&self) -> Palette {
        Palette::dusk()
    }

    fn background(&self) -> Rgba8 {
        Rgba8::BLACK
    }

    /// Build every entity layer over `canvas`. Called at setup and on each regeneration.
    fn populate(
        &mut self,
        factory: &mut EntityFactory,
        palette: &Palette,
        canvas: Canvas,
    ) -> SketchResult<Vec<Layer>>;

    fn draw(&self, frame: &FrameContext<'_>, list: &mut DrawList);
}

/// Registry entry: per-sketch defaults plus a constructor.
#[derive(Clone, Copy, Debug)]
pub struct SketchDescriptor {
    pub name: &'static str,
    pub summary: &'static str,
    pub canvas: Canvas,
    pub fps: Fps,
    pub clock_increment: f64,
    /// Default output file name without extension.
    pub file_stem: &'static str,
    pub build: fn() -> SketchResult<Box<dyn Sketch>>,
}

impl SketchDescriptor {
    pub fn create(&self) -> SketchResult<Box<dyn Sketch>> {
        (self.build)()
    }
}
