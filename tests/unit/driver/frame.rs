use super::*;
use crate::foundation::core::Point;
use crate::record::recorder::RecorderState;
use crate::record::sink::InMemorySink;
use crate::scene::entity::{Entity, Motion};
use crate::scene::factory::{EntityConfig, EntityFactory, OrbitConfig, Span};

/// Orbit ring with one deliberately broken entity at index 2.
struct BrokenRing;

impl Sketch for BrokenRing {
    fn name(&self) -> &'static str {
        "broken-ring"
    }

    fn populate(
        &mut self,
        factory: &mut EntityFactory,
        palette: &Palette,
        _canvas: Canvas,
    ) -> SketchResult<Vec<Layer>> {
        let mut entities = factory.create_entities(
            5,
            &EntityConfig::Orbit(OrbitConfig {
                radius: Span::new(50.0, 80.0),
                height: Span::new(-10.0, 10.0),
                speed: Span::new(0.5, 1.0),
                size: Span::new(2.0, 4.0),
            }),
            palette,
        )?;
        entities[2] = Entity {
            motion: Motion::Orbit {
                angle: 0.0,
                radius: f64::NAN,
                height: 0.0,
                speed: 1.0,
            },
            color: 0,
            size: 3.0,
            phase: 0.0,
        };
        Ok(vec![Layer::new("ring", entities)])
    }

    fn draw(&self, frame: &FrameContext<'_>, list: &mut DrawList) {
        let c = frame.canvas.center();
        for (_, p) in frame.placements("ring") {
            list.circle(
                Point::new(c.x + p.position.x, c.y + p.position.z),
                p.size,
                p.color,
            );
        }
    }
}

fn driver(seed: u64, parallel: bool) -> FrameDriver {
    FrameDriver::new(
        Box::new(BrokenRing),
        DriverConfig {
            canvas: Canvas {
                width: 64,
                height: 64,
            },
            clock_increment: 0.01,
            seed,
            palette: None,
            parallel,
            background: None,
            recording: RecordingSettings {
                max_frames: 50,
                ..RecordingSettings::default()
            },
            backend: BackendKind::Cpu,
        },
    )
    .unwrap()
}

#[test]
fn malformed_entity_is_skipped_not_fatal() {
    let mut d = driver(1, false);
    let stats = d.on_frame();
    assert_eq!(stats.tick, 1);
    assert_eq!(stats.malformed, 1);
    assert_eq!(stats.drawn, 4);
    assert!(stats.fault.is_none());
    assert_eq!(d.evaluated()[0].placements.len(), 5);
    assert!(d.evaluated()[0].placements[2].is_none());
    assert!(d.last_frame().is_some());
}

#[test]
fn parallel_matches_sequential() {
    let mut a = driver(9, false);
    let mut b = driver(9, true);
    for _ in 0..20 {
        assert_eq!(a.on_frame().fingerprint, b.on_frame().fingerprint);
    }
    assert_eq!(a.evaluated(), b.evaluated());
}

#[test]
fn regenerate_changes_population_reproducibly() {
    let mut a = driver(3, false);
    let mut b = driver(3, false);
    let mut untouched = driver(3, false);
    a.regenerate().unwrap();
    b.regenerate().unwrap();
    assert_eq!(a.scene().generation(), 1);
    assert_eq!(untouched.scene().generation(), 0);

    let (fa, fb, fu) = (
        a.on_frame().fingerprint,
        b.on_frame().fingerprint,
        untouched.on_frame().fingerprint,
    );
    assert_eq!(fa, fb);
    assert_ne!(fa, fu);
}

#[test]
fn start_recording_resets_clock_and_counts_frames() {
    let mut d = driver(4, false);
    for _ in 0..7 {
        d.on_frame();
    }
    let memory = InMemorySink::new();
    d.start_recording(Box::new(memory.clone())).unwrap();
    assert_eq!(d.scene().clock.ticks(), 0);

    let first = d.on_frame();
    assert_eq!(first.tick, 1);
    assert!(matches!(first.capture, CaptureOutcome::Captured { .. }));
    for _ in 0..9 {
        d.on_frame();
    }
    assert_eq!(d.recorder().frame_count(), 10);

    let out = d.stop_recording().unwrap().unwrap();
    assert_eq!(out.frames, 10);
    assert_eq!(memory.captured().frames.len(), 10);
}

#[test]
fn seek_positions_next_frame() {
    let mut d = driver(5, false);
    d.seek(41);
    let stats = d.on_frame();
    assert_eq!(stats.tick, 42);
    assert!((stats.t - 0.42).abs() < 1e-12);
}

#[test]
fn snapshot_without_a_frame_is_a_state_error() {
    let d = driver(6, false);
    let err = d.snapshot(Path::new("target/never.png")).unwrap_err();
    assert!(matches!(err, SketchError::State(_)));
}

/// Backend whose surface is gone.
struct LostSurface;

impl RenderBackend for LostSurface {
    fn render(&mut self, _canvas: Canvas, _list: &DrawList) -> SketchResult<FrameRGBA> {
        Err(SketchError::render("surface lost"))
    }
}

#[test]
fn render_failure_fails_the_recording() {
    let mut d = driver(7, false).with_backend(Box::new(LostSurface));
    let memory = InMemorySink::new();
    d.start_recording(Box::new(memory.clone())).unwrap();

    let stats = d.on_frame();
    assert_eq!(stats.tick, 1);
    assert_eq!(stats.capture, CaptureOutcome::Skipped);
    assert!(stats.fault.as_deref().unwrap().contains("surface lost"));
    assert_eq!(d.recorder().state(), RecorderState::Failed);
    assert!(d.recorder().last_error().unwrap().contains("surface lost"));
    assert!(d.last_frame().is_none());

    let cap = memory.captured();
    assert!(cap.aborted);
    assert!(!cap.ended);
    assert!(cap.frames.is_empty());
}

#[test]
fn render_failure_outside_recording_only_reports() {
    let mut d = driver(7, false).with_backend(Box::new(LostSurface));
    let stats = d.on_frame();
    assert!(stats.fault.is_some());
    assert_eq!(d.recorder().state(), RecorderState::Idle);
    assert!(d.recorder().last_error().is_none());
}
