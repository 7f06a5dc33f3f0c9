//! Frame-exact video capture: the [`Recorder`] state machine and the sinks it feeds.

pub mod ffmpeg;
pub mod recorder;
pub mod sink;

pub use ffmpeg::{FfmpegSink, FfmpegSinkOpts, is_ffmpeg_on_path};
pub use recorder::{
    CaptureOutcome, Recorder, RecorderState, RecordingOutput, RecordingSession, RecordingSettings,
};
pub use sink::{
    Captured, CapturedFrame, Container, InMemorySink, SinkConfig, SinkOutput, TimedFrame,
    VideoSink,
};
