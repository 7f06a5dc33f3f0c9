//! Sketchreel renders seeded generative-art sketches frame by frame.
//!
//! Every sketch plugs into one [`FrameDriver`]:
//!
//! - A [`SceneState`] owns the clock, the palette and the seeded entity layers
//! - Each frame evaluates entities, builds a [`DrawList`] and rasterizes it on the CPU
//! - A [`Recorder`] optionally streams frames into a [`VideoSink`] such as [`FfmpegSink`]
#![forbid(unsafe_code)]

pub mod config;
pub mod curves;
pub mod draw;
pub mod driver;
pub mod foundation;
pub mod record;
pub mod render;
pub mod scene;
pub mod sketches;
pub mod snapshot;

pub use crate::config::{RecordingConfig, SketchConfig};
pub use crate::draw::{Camera, DrawList, DrawOp};
pub use crate::driver::{
    DriverConfig, EvaluatedLayer, FrameContext, FrameDriver, FrameStats, Sketch,
    SketchDescriptor, find_sketch, sketches,
};
pub use crate::foundation::core::{Canvas, Fps, FrameIndex, Point, Rect, Rgba8, Vec2, Vec3};
pub use crate::foundation::error::{SketchError, SketchResult};
pub use crate::record::{
    CaptureOutcome, Container, FfmpegSink, FfmpegSinkOpts, InMemorySink, Recorder,
    RecorderState, RecordingOutput, RecordingSettings, SinkConfig, VideoSink, is_ffmpeg_on_path,
};
pub use crate::render::{BackendKind, FrameRGBA, RenderBackend, RenderSettings, create_backend};
pub use crate::scene::clock::Clock;
pub use crate::scene::palette::Palette;
pub use crate::scene::state::SceneState;
