use std::time::{Duration, Instant};

use crate::foundation::core::{Canvas, Fps, FrameIndex};
use crate::foundation::error::{SketchError, SketchResult};
use crate::record::sink::{Container, SinkConfig, SinkOutput, TimedFrame, VideoSink};
use crate::render::backend::FrameRGBA;

/// Recorder lifecycle.
///
/// `Idle → Recording → Finalizing → Idle`, with `Failed` entered on any encoder fault. A failed
/// recorder can be restarted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecorderState {
    Idle,
    Recording,
    Finalizing,
    Failed,
}

impl std::fmt::Display for RecorderState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            RecorderState::Idle => "Idle",
            RecorderState::Recording => "Recording",
            RecorderState::Finalizing => "Finalizing",
            RecorderState::Failed => "Failed",
        })
    }
}

/// Fixed parameters of every session a recorder runs.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RecordingSettings {
    pub fps: Fps,
    /// Hard frame budget; reaching it finalizes automatically.
    pub max_frames: u64,
    /// Bits per second.
    pub bitrate: u32,
    pub keyframe_interval: u32,
    pub container: Container,
}

impl Default for RecordingSettings {
    fn default() -> Self {
        Self {
            fps: Fps::default(),
            max_frames: 900,
            bitrate: 8_000_000,
            keyframe_interval: 60,
            container: Container::Mp4,
        }
    }
}

impl RecordingSettings {
    pub fn validate(&self) -> SketchResult<()> {
        self.fps.validate()?;
        if self.max_frames == 0 {
            return Err(SketchError::validation("max_frames must be > 0"));
        }
        if self.bitrate == 0 {
            return Err(SketchError::validation("bitrate must be > 0"));
        }
        if self.keyframe_interval == 0 {
            return Err(SketchError::validation("keyframe_interval must be > 0"));
        }
        Ok(())
    }

    /// Length of a complete auto-stopped recording.
    pub fn max_duration_micros(&self) -> u64 {
        self.fps.timestamp_micros(FrameIndex(self.max_frames))
    }

    fn sink_config(&self, canvas: Canvas) -> SinkConfig {
        SinkConfig {
            width: canvas.width,
            height: canvas.height,
            fps: self.fps,
            bitrate: self.bitrate,
            keyframe_interval: self.keyframe_interval,
            container: self.container,
        }
    }
}

/// State that exists only while a recording is active.
pub struct RecordingSession {
    frame_count: u64,
    started_at: Instant,
    canvas: Canvas,
    sink: Box<dyn VideoSink>,
}

impl std::fmt::Debug for RecordingSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordingSession")
            .field("frame_count", &self.frame_count)
            .field("started_at", &self.started_at)
            .field("canvas", &self.canvas)
            .finish_non_exhaustive()
    }
}

impl RecordingSession {
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Wall-clock time since start. Informational only; never used for timestamps.
    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }
}

/// Result of a finished recording.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordingOutput {
    pub frames: u64,
    /// Encoded timestamp span, derived from the frame count.
    pub duration_micros: u64,
    pub sink: SinkOutput,
    pub wall_time: Duration,
}

impl RecordingOutput {
    pub fn duration_secs(&self) -> f64 {
        self.duration_micros as f64 / 1_000_000.0
    }
}

/// What [`Recorder::capture`] did with a frame.
#[derive(Clone, Debug, PartialEq)]
pub enum CaptureOutcome {
    /// Not recording; the frame was ignored.
    Skipped,
    Captured {
        index: FrameIndex,
        timestamp_micros: u64,
    },
    /// The frame budget was reached and the recording was finalized.
    Finished(RecordingOutput),
}

/// Frame-exact video recorder.
#[derive(Debug)]
pub struct Recorder {
    settings: RecordingSettings,
    state: RecorderState,
    session: Option<RecordingSession>,
    last_error: Option<String>,
    last_output: Option<RecordingOutput>,
}

impl Recorder {
    pub fn new(settings: RecordingSettings) -> SketchResult<Self> {
        settings.validate()?;
        Ok(Self {
            settings,
            state: RecorderState::Idle,
            session: None,
            last_error: None,
            last_output: None,
        })
    }

    pub fn settings(&self) -> &RecordingSettings {
        &self.settings
    }

    pub fn state(&self) -> RecorderState {
        self.state
    }

    pub fn is_recording(&self) -> bool {
        self.state == RecorderState::Recording
    }

    pub fn session(&self) -> Option<&RecordingSession> {
        self.session.as_ref()
    }

    /// Frames captured in the current session (0 when none is active).
    pub fn frame_count(&self) -> u64 {
        self.session.as_ref().map_or(0, |s| s.frame_count)
    }

    /// Message of the fault that moved the recorder to `Failed`.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn last_output(&self) -> Option<&RecordingOutput> {
        self.last_output.as_ref()
    }

    /// One-line status: state, frame count and elapsed wall seconds.
    pub fn status(&self) -> String {
        match (&self.state, &self.session) {
            (RecorderState::Recording, Some(s)) => format!(
                "{} · {} / {} frames · {:.1}s",
                self.state,
                s.frame_count,
                self.settings.max_frames,
                s.elapsed().as_secs_f64()
            ),
            (RecorderState::Failed, _) => match &self.last_error {
                Some(e) => format!("{} · {e}", self.state),
                None => self.state.to_string(),
            },
            (RecorderState::Idle, _) => match &self.last_output {
                Some(out) => format!(
                    "{} · last: {} frames, {:.2}s",
                    self.state,
                    out.frames,
                    out.duration_secs()
                ),
                None => self.state.to_string(),
            },
            _ => self.state.to_string(),
        }
    }

    /// `Idle → Recording`. Allocates the encoder through `sink.begin`.
    ///
    /// Rejected while `Recording` or `Finalizing` (the sink is never touched). From `Failed` the
    /// recorder first returns to `Idle`. If `begin` fails the state stays `Idle`.
    #[tracing::instrument(skip(self, sink), fields(state = %self.state))]
    pub fn start(&mut self, canvas: Canvas, mut sink: Box<dyn VideoSink>) -> SketchResult<()> {
        match self.state {
            RecorderState::Recording | RecorderState::Finalizing => {
                return Err(SketchError::state(format!(
                    "cannot start while {}",
                    self.state
                )));
            }
            RecorderState::Failed => {
                self.state = RecorderState::Idle;
                self.session = None;
            }
            RecorderState::Idle => {}
        }

        canvas.validate()?;
        let cfg = self.settings.sink_config(canvas);
        if let Err(e) = sink.begin(&cfg) {
            sink.abort();
            tracing::warn!(error = %e, "recording did not start");
            return Err(e);
        }

        self.session = Some(RecordingSession {
            frame_count: 0,
            started_at: Instant::now(),
            canvas,
            sink,
        });
        self.last_error = None;
        self.state = RecorderState::Recording;
        tracing::info!(
            width = canvas.width,
            height = canvas.height,
            fps = self.settings.fps.as_f64(),
            max_frames = self.settings.max_frames,
            "recording started"
        );
        Ok(())
    }

    /// Hand one rendered frame to the encoder.
    ///
    /// The timestamp is `frame_count / fps`, never wall-clock time. A sink error moves the
    /// recorder to `Failed` and is returned; capturing again after that is a no-op.
    pub fn capture(&mut self, frame: &FrameRGBA) -> SketchResult<CaptureOutcome> {
        if self.state != RecorderState::Recording {
            return Ok(CaptureOutcome::Skipped);
        }
        let session = self
            .session
            .as_mut()
            .ok_or_else(|| SketchError::state("recording without a session"))?;

        let index = FrameIndex(session.frame_count);
        let timestamp_micros = self.settings.fps.timestamp_micros(index);
        let keyframe = index.0 % u64::from(self.settings.keyframe_interval) == 0;

        if let Err(e) = session.sink.push_frame(TimedFrame {
            index,
            timestamp_micros,
            keyframe,
            frame,
        }) {
            return Err(self.fail(e));
        }
        session.frame_count += 1;

        if session.frame_count >= self.settings.max_frames {
            tracing::info!(frames = session.frame_count, "frame budget reached");
            return self.finalize().map(CaptureOutcome::Finished);
        }
        Ok(CaptureOutcome::Captured {
            index,
            timestamp_micros,
        })
    }

    /// Manual stop. A no-op returning `Ok(None)` unless recording.
    pub fn stop(&mut self) -> SketchResult<Option<RecordingOutput>> {
        match self.state {
            RecorderState::Recording => self.finalize().map(Some),
            _ => Ok(None),
        }
    }

    #[tracing::instrument(skip(self))]
    fn finalize(&mut self) -> SketchResult<RecordingOutput> {
        self.state = RecorderState::Finalizing;
        let Some(mut session) = self.session.take() else {
            self.state = RecorderState::Idle;
            return Err(SketchError::state("finalize without a session"));
        };

        let frames = session.frame_count;
        let wall_time = session.elapsed();
        match session.sink.end() {
            Ok(sink) => {
                let out = RecordingOutput {
                    frames,
                    duration_micros: self.settings.fps.timestamp_micros(FrameIndex(frames)),
                    sink,
                    wall_time,
                };
                tracing::info!(
                    frames,
                    duration_secs = out.duration_secs(),
                    path = ?out.sink.path,
                    "recording finalized"
                );
                self.last_output = Some(out.clone());
                self.state = RecorderState::Idle;
                Ok(out)
            }
            Err(e) => {
                self.session = Some(session);
                Err(self.fail(e))
            }
        }
    }

    /// Fail an in-progress recording for a frame that never reached the sink. The sink is
    /// aborted and the recorder moves to `Failed`; outside `Recording` nothing changes.
    pub fn interrupt(&mut self, err: SketchError) -> SketchError {
        if self.state == RecorderState::Recording {
            self.abandon(&err);
        }
        err
    }

    fn fail(&mut self, err: SketchError) -> SketchError {
        let err = match err {
            e @ SketchError::EncoderFault(_) => e,
            other => SketchError::encoder_fault(other.to_string()),
        };
        self.abandon(&err);
        err
    }

    fn abandon(&mut self, err: &SketchError) {
        tracing::warn!(error = %err, frames = self.frame_count(), "recording failed");
        if let Some(mut session) = self.session.take() {
            session.sink.abort();
        }
        self.state = RecorderState::Failed;
        self.last_error = Some(err.to_string());
    }
}

#[cfg(test)]
#[path = "../../tests/unit/record/recorder.rs"]
mod tests;
