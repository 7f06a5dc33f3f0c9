use std::path::Path;

use rayon::prelude::*;

use crate::draw::DrawList;
use crate::driver::sketch::{EvaluatedLayer, FrameContext, Sketch, SketchDescriptor};
use crate::foundation::core::{Canvas, Rgba8};
use crate::foundation::error::{SketchError, SketchResult};
use crate::foundation::math::Fnv1a64;
use crate::record::recorder::{CaptureOutcome, Recorder, RecordingOutput, RecordingSettings};
use crate::record::sink::VideoSink;
use crate::render::backend::{BackendKind, FrameRGBA, RenderBackend, RenderSettings, create_backend};
use crate::scene::clock::Clock;
use crate::scene::entity::{EvalCtx, Placement};
use crate::scene::palette::Palette;
use crate::scene::state::{Layer, SceneState};

/// Everything needed to stand up a [`FrameDriver`].
#[derive(Clone, Debug)]
pub struct DriverConfig {
    pub canvas: Canvas,
    pub clock_increment: f64,
    pub seed: u64,
    /// Overrides the sketch palette.
    pub palette: Option<Palette>,
    /// Evaluate entity placements on the rayon pool.
    pub parallel: bool,
    /// Overrides the sketch background.
    pub background: Option<Rgba8>,
    pub recording: RecordingSettings,
    pub backend: BackendKind,
}

impl DriverConfig {
    /// Defaults for `desc` with seed 0.
    pub fn for_sketch(desc: &SketchDescriptor) -> Self {
        Self {
            canvas: desc.canvas,
            clock_increment: desc.clock_increment,
            seed: 0,
            palette: None,
            parallel: false,
            background: None,
            recording: RecordingSettings {
                fps: desc.fps,
                ..RecordingSettings::default()
            },
            backend: BackendKind::Cpu,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Per-frame report from [`FrameDriver::on_frame`].
#[derive(Clone, Debug, PartialEq)]
pub struct FrameStats {
    pub tick: u64,
    pub t: f64,
    /// Primitives in the frame's draw list.
    pub drawn: usize,
    /// Primitives rejected by the draw list for non-finite geometry.
    pub dropped: usize,
    /// Entities skipped this frame because their placement was not finite.
    pub malformed: usize,
    /// FNV-1a over the bit patterns of every placement.
    pub fingerprint: u64,
    pub capture: CaptureOutcome,
    /// Render or encoder fault raised during this frame.
    pub fault: Option<String>,
}

/// The per-frame update and render step.
///
/// Owns the scene, the sketch strategy, the render backend and the recorder. Entity placements
/// are pure functions of the clock and fixed parameters, so evaluation order does not matter
/// and may run in parallel.
pub struct FrameDriver {
    sketch: Box<dyn Sketch>,
    scene: SceneState,
    canvas: Canvas,
    backend: Box<dyn RenderBackend>,
    recorder: Recorder,
    list: DrawList,
    evaluated: Vec<EvaluatedLayer>,
    last_frame: Option<FrameRGBA>,
    parallel: bool,
}

impl FrameDriver {
    #[tracing::instrument(skip(sketch, cfg), fields(name = sketch.name(), seed = cfg.seed))]
    pub fn new(mut sketch: Box<dyn Sketch>, cfg: DriverConfig) -> SketchResult<Self> {
        cfg.canvas.validate()?;
        let clock = Clock::new(cfg.clock_increment)?;
        let recorder = Recorder::new(cfg.recording)?;
        let palette = cfg.palette.unwrap_or_else(|| sketch.palette());
        let backend = create_backend(
            cfg.backend,
            &RenderSettings {
                clear_rgba: Some(cfg.background.unwrap_or_else(|| sketch.background())),
            },
        )?;

        let mut scene = SceneState::new(clock, palette, cfg.seed);
        let layers = sketch.populate(&mut scene.factory(), scene.palette(), cfg.canvas)?;
        scene.install_layers(layers);
        tracing::info!(entities = scene.entity_count(), "sketch ready");

        Ok(Self {
            sketch,
            scene,
            canvas: cfg.canvas,
            backend,
            recorder,
            list: DrawList::new(),
            evaluated: Vec::new(),
            last_frame: None,
            parallel: cfg.parallel,
        })
    }

    /// Replace the render backend chosen by the config.
    pub fn with_backend(mut self, backend: Box<dyn RenderBackend>) -> Self {
        self.backend = backend;
        self
    }

    /// Build the registered sketch `desc` with its defaults.
    pub fn from_descriptor(desc: &SketchDescriptor, seed: u64) -> SketchResult<Self> {
        Self::new(desc.create()?, DriverConfig::for_sketch(desc).with_seed(seed))
    }

    pub fn sketch_name(&self) -> &'static str {
        self.sketch.name()
    }

    pub fn scene(&self) -> &SceneState {
        &self.scene
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn recorder(&self) -> &Recorder {
        &self.recorder
    }

    pub fn draw_list(&self) -> &DrawList {
        &self.list
    }

    pub fn evaluated(&self) -> &[EvaluatedLayer] {
        &self.evaluated
    }

    pub fn last_frame(&self) -> Option<&FrameRGBA> {
        self.last_frame.as_ref()
    }

    /// Jump the clock so the next [`FrameDriver::on_frame`] shows tick `ticks + 1`.
    pub fn seek(&mut self, ticks: u64) {
        self.scene.clock.seek(ticks);
    }

    /// Advance the clock, evaluate every entity, draw, render and hand the frame to the
    /// recorder. Never fails: faults are reported in [`FrameStats`].
    pub fn on_frame(&mut self) -> FrameStats {
        let t = self.scene.clock.advance();
        let tick = self.scene.clock.ticks();
        let ctx = EvalCtx { t, tick };

        let palette = self.scene.palette();
        let parallel = self.parallel;
        self.evaluated = self
            .scene
            .layers()
            .iter()
            .map(|layer| evaluate_layer(layer, ctx, palette, parallel))
            .collect();
        let malformed = self.evaluated.iter().map(EvaluatedLayer::malformed).sum();
        let fingerprint = fingerprint_layers(&self.evaluated);

        self.list.reset();
        let frame_ctx = FrameContext {
            t,
            tick,
            canvas: self.canvas,
            palette,
            layers: &self.evaluated,
        };
        self.sketch.draw(&frame_ctx, &mut self.list);

        let mut stats = FrameStats {
            tick,
            t,
            drawn: self.list.len(),
            dropped: self.list.dropped(),
            malformed,
            fingerprint,
            capture: CaptureOutcome::Skipped,
            fault: None,
        };

        let frame = match self.backend.render(self.canvas, &self.list) {
            Ok(frame) => frame,
            Err(e) => {
                tracing::warn!(error = %e, tick, "frame render failed");
                // A recording cannot skip a tick.
                let e = self.recorder.interrupt(e);
                stats.fault = Some(e.to_string());
                return stats;
            }
        };

        match self.recorder.capture(&frame) {
            Ok(outcome) => stats.capture = outcome,
            Err(e) => stats.fault = Some(e.to_string()),
        }
        self.last_frame = Some(frame);
        stats
    }

    /// Rebuild every entity layer from the seed and the next generation counter.
    #[tracing::instrument(skip(self), fields(name = self.sketch.name()))]
    pub fn regenerate(&mut self) -> SketchResult<()> {
        self.scene.next_generation();
        let layers = self
            .sketch
            .populate(&mut self.scene.factory(), self.scene.palette(), self.canvas)?;
        self.scene.install_layers(layers);
        tracing::info!(generation = self.scene.generation(), "population regenerated");
        Ok(())
    }

    /// Start recording into `sink`. On success the clock restarts at 0 so the first captured
    /// frame is always tick 1.
    pub fn start_recording(&mut self, sink: Box<dyn VideoSink>) -> SketchResult<()> {
        self.recorder.start(self.canvas, sink)?;
        self.scene.clock.reset();
        Ok(())
    }

    pub fn stop_recording(&mut self) -> SketchResult<Option<RecordingOutput>> {
        self.recorder.stop()
    }

    /// Write the most recent frame as a PNG.
    pub fn snapshot(&self, path: &Path) -> SketchResult<()> {
        let frame = self
            .last_frame
            .as_ref()
            .ok_or_else(|| SketchError::state("no frame rendered yet"))?;
        crate::snapshot::write_png(frame, path)
    }
}

fn evaluate_layer(
    layer: &Layer,
    ctx: EvalCtx,
    palette: &Palette,
    parallel: bool,
) -> EvaluatedLayer {
    let place = |(index, entity): (usize, &crate::scene::entity::Entity)| -> Option<Placement> {
        let p = entity.place(ctx, palette);
        if p.is_finite() {
            Some(p)
        } else {
            tracing::debug!(
                error = %SketchError::malformed_entity(&layer.name, index),
                tick = ctx.tick,
                "skipping entity"
            );
            None
        }
    };

    let placements = if parallel {
        layer.entities.par_iter().enumerate().map(place).collect()
    } else {
        layer.entities.iter().enumerate().map(place).collect()
    };
    EvaluatedLayer {
        name: layer.name.clone(),
        placements,
    }
}

fn fingerprint_layers(layers: &[EvaluatedLayer]) -> u64 {
    let mut h = Fnv1a64::new_default();
    for layer in layers {
        h.write_bytes(layer.name.as_bytes());
        h.write_u64(layer.placements.len() as u64);
        for p in &layer.placements {
            match p {
                Some(p) => {
                    h.write_f64(p.position.x);
                    h.write_f64(p.position.y);
                    h.write_f64(p.position.z);
                    h.write_f64(p.size);
                    h.write_bytes(&p.color.to_array());
                }
                None => h.write_u64(u64::MAX),
            }
        }
    }
    h.finish()
}

#[cfg(test)]
#[path = "../../tests/unit/driver/frame.rs"]
mod tests;
