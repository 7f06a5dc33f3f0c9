use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{SketchError, SketchResult};
use crate::render::backend::FrameRGBA;

/// Video container (and the codec that goes with it).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Container {
    /// H.264 in MP4.
    #[default]
    Mp4,
    /// VP9 in WebM.
    WebM,
}

impl Container {
    pub fn extension(self) -> &'static str {
        match self {
            Container::Mp4 => "mp4",
            Container::WebM => "webm",
        }
    }

    /// Infer from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "mp4" => Some(Container::Mp4),
            "webm" => Some(Container::WebM),
            _ => None,
        }
    }
}

impl std::fmt::Display for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// Configuration handed to a [`VideoSink`] when a recording starts.
#[derive(Clone, Debug, PartialEq)]
pub struct SinkConfig {
    pub width: u32,
    pub height: u32,
    pub fps: Fps,
    /// Target bitrate in bits per second.
    pub bitrate: u32,
    /// Every `keyframe_interval`-th frame is a keyframe.
    pub keyframe_interval: u32,
    pub container: Container,
}

impl SinkConfig {
    pub fn validate(&self) -> SketchResult<()> {
        self.fps.validate()?;
        if self.width == 0 || self.height == 0 {
            return Err(SketchError::validation("sink width/height must be non-zero"));
        }
        if !self.width.is_multiple_of(2) || !self.height.is_multiple_of(2) {
            return Err(SketchError::validation(
                "sink width/height must be even (required for yuv420p output)",
            ));
        }
        if self.bitrate == 0 {
            return Err(SketchError::validation("sink bitrate must be non-zero"));
        }
        if self.keyframe_interval == 0 {
            return Err(SketchError::validation(
                "sink keyframe interval must be non-zero",
            ));
        }
        Ok(())
    }
}

/// One frame on its way into the encoder. The timestamp is derived from `index` alone.
#[derive(Clone, Copy, Debug)]
pub struct TimedFrame<'a> {
    pub index: FrameIndex,
    pub timestamp_micros: u64,
    pub keyframe: bool,
    pub frame: &'a FrameRGBA,
}

/// What a sink produced once finalized.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SinkOutput {
    /// File written, for file-backed sinks.
    pub path: Option<PathBuf>,
    pub frames: u64,
    pub bytes: Option<u64>,
}

/// Encoder/muxer contract.
///
/// Ordering contract: `push_frame` is called with strictly increasing frame indices between one
/// `begin` and the matching `end` or `abort`.
pub trait VideoSink: Send {
    /// Allocate the encoder. Failure here means recording never starts.
    fn begin(&mut self, cfg: &SinkConfig) -> SketchResult<()>;
    fn push_frame(&mut self, frame: TimedFrame<'_>) -> SketchResult<()>;
    /// Flush and finalize the container.
    fn end(&mut self) -> SketchResult<SinkOutput>;
    /// Release encoder resources without finalizing. Must be safe to call in any state.
    fn abort(&mut self) {}
}

/// Metadata of one frame captured by [`InMemorySink`].
#[derive(Clone, Debug, PartialEq)]
pub struct CapturedFrame {
    pub index: FrameIndex,
    pub timestamp_micros: u64,
    pub keyframe: bool,
    /// Pixel data, only kept when the sink was built with [`InMemorySink::with_pixels`].
    pub pixels: Option<FrameRGBA>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Captured {
    pub config: Option<SinkConfig>,
    pub frames: Vec<CapturedFrame>,
    pub begun: u32,
    pub ended: bool,
    pub aborted: bool,
}

impl Captured {
    /// Span between the first frame and the end of the last frame, in microseconds.
    pub fn duration_micros(&self) -> Option<u64> {
        let fps = self.config.as_ref()?.fps;
        let last = self.frames.last()?;
        Some(fps.timestamp_micros(FrameIndex(last.index.0 + 1)))
    }
}

/// Sink that records what it was given. Clones share the same log, so a test can keep one
/// clone while the recorder owns another.
#[derive(Clone, Debug, Default)]
pub struct InMemorySink {
    shared: Arc<Mutex<Captured>>,
    keep_pixels: bool,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pixels() -> Self {
        Self {
            keep_pixels: true,
            ..Self::default()
        }
    }

    /// Copy of everything captured so far.
    pub fn captured(&self) -> Captured {
        self.shared
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn with<R>(&self, f: impl FnOnce(&mut Captured) -> R) -> R {
        let mut guard = self
            .shared
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut guard)
    }
}

impl VideoSink for InMemorySink {
    fn begin(&mut self, cfg: &SinkConfig) -> SketchResult<()> {
        cfg.validate()?;
        self.with(|c| {
            c.config = Some(cfg.clone());
            c.frames.clear();
            c.begun += 1;
            c.ended = false;
            c.aborted = false;
        });
        Ok(())
    }

    fn push_frame(&mut self, frame: TimedFrame<'_>) -> SketchResult<()> {
        let keep = self.keep_pixels;
        self.with(|c| {
            if c.config.is_none() || c.ended {
                return Err(SketchError::encoder_fault("in-memory sink is not open"));
            }
            if let Some(last) = c.frames.last()
                && frame.index <= last.index
            {
                return Err(SketchError::encoder_fault(
                    "in-memory sink received out-of-order frame index",
                ));
            }
            c.frames.push(CapturedFrame {
                index: frame.index,
                timestamp_micros: frame.timestamp_micros,
                keyframe: frame.keyframe,
                pixels: keep.then(|| frame.frame.clone()),
            });
            Ok(())
        })
    }

    fn end(&mut self) -> SketchResult<SinkOutput> {
        self.with(|c| {
            c.ended = true;
            Ok(SinkOutput {
                path: None,
                frames: c.frames.len() as u64,
                bytes: None,
            })
        })
    }

    fn abort(&mut self) {
        self.with(|c| c.aborted = true);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/record/sink.rs"]
mod tests;
