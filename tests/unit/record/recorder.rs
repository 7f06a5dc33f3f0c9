use super::*;
use crate::record::sink::InMemorySink;

/// Sink that fails on demand.
#[derive(Default)]
struct FlakySink {
    fail_begin: bool,
    fail_at: Option<u64>,
    fail_end: bool,
    pushed: u64,
}

impl VideoSink for FlakySink {
    fn begin(&mut self, _cfg: &SinkConfig) -> SketchResult<()> {
        if self.fail_begin {
            return Err(SketchError::unsupported_encoder("no encoder here"));
        }
        Ok(())
    }

    fn push_frame(&mut self, frame: TimedFrame<'_>) -> SketchResult<()> {
        if self.fail_at == Some(frame.index.0) {
            return Err(SketchError::encoder_fault("pipe closed"));
        }
        self.pushed += 1;
        Ok(())
    }

    fn end(&mut self) -> SketchResult<SinkOutput> {
        if self.fail_end {
            return Err(SketchError::encoder_fault("muxer refused to finalize"));
        }
        Ok(SinkOutput {
            frames: self.pushed,
            ..SinkOutput::default()
        })
    }
}

fn canvas() -> Canvas {
    Canvas {
        width: 4,
        height: 4,
    }
}

fn frame() -> FrameRGBA {
    FrameRGBA {
        width: 4,
        height: 4,
        data: vec![0; 64],
        premultiplied: true,
    }
}

fn recorder(max_frames: u64) -> Recorder {
    Recorder::new(RecordingSettings {
        max_frames,
        ..RecordingSettings::default()
    })
    .unwrap()
}

#[test]
fn stop_while_idle_is_a_no_op() {
    let mut r = recorder(10);
    assert_eq!(r.stop().unwrap(), None);
    assert_eq!(r.state(), RecorderState::Idle);
    assert_eq!(r.status(), "Idle");
}

#[test]
fn capture_while_idle_is_skipped() {
    let mut r = recorder(10);
    assert_eq!(r.capture(&frame()).unwrap(), CaptureOutcome::Skipped);
    assert_eq!(r.frame_count(), 0);
}

#[test]
fn double_start_is_rejected_without_touching_the_second_sink() {
    let mut r = recorder(10);
    r.start(canvas(), Box::new(InMemorySink::new())).unwrap();
    let second = InMemorySink::new();
    let err = r.start(canvas(), Box::new(second.clone())).unwrap_err();
    assert!(matches!(err, SketchError::State(_)));
    assert_eq!(second.captured().begun, 0);
    assert_eq!(r.state(), RecorderState::Recording);
}

#[test]
fn unsupported_encoder_leaves_recorder_idle() {
    let mut r = recorder(10);
    let err = r
        .start(
            canvas(),
            Box::new(FlakySink {
                fail_begin: true,
                ..FlakySink::default()
            }),
        )
        .unwrap_err();
    assert!(matches!(err, SketchError::UnsupportedEncoder(_)));
    assert_eq!(r.state(), RecorderState::Idle);
    assert!(r.session().is_none());
}

#[test]
fn auto_stop_at_frame_budget() {
    let mut r = recorder(3);
    let memory = InMemorySink::new();
    r.start(canvas(), Box::new(memory.clone())).unwrap();
    let f = frame();

    assert!(matches!(
        r.capture(&f).unwrap(),
        CaptureOutcome::Captured {
            index: FrameIndex(0),
            timestamp_micros: 0
        }
    ));
    assert!(matches!(r.capture(&f).unwrap(), CaptureOutcome::Captured { .. }));
    let CaptureOutcome::Finished(out) = r.capture(&f).unwrap() else {
        panic!("third frame should finish the recording");
    };
    assert_eq!(out.frames, 3);
    assert_eq!(out.duration_micros, 50_000);
    assert_eq!(r.state(), RecorderState::Idle);
    assert_eq!(r.capture(&f).unwrap(), CaptureOutcome::Skipped);

    let cap = memory.captured();
    assert!(cap.ended);
    assert_eq!(cap.frames.len(), 3);
    assert!(r.status().starts_with("Idle · last: 3 frames"));
}

#[test]
fn keyframes_follow_the_interval() {
    let mut r = Recorder::new(RecordingSettings {
        keyframe_interval: 4,
        max_frames: 100,
        ..RecordingSettings::default()
    })
    .unwrap();
    let memory = InMemorySink::new();
    r.start(canvas(), Box::new(memory.clone())).unwrap();
    for _ in 0..9 {
        r.capture(&frame()).unwrap();
    }
    let keys: Vec<u64> = memory
        .captured()
        .frames
        .iter()
        .filter(|f| f.keyframe)
        .map(|f| f.index.0)
        .collect();
    assert_eq!(keys, vec![0, 4, 8]);
}

#[test]
fn mid_recording_fault_moves_to_failed_and_restart_works() {
    let mut r = recorder(100);
    r.start(
        canvas(),
        Box::new(FlakySink {
            fail_at: Some(2),
            ..FlakySink::default()
        }),
    )
    .unwrap();
    let f = frame();
    r.capture(&f).unwrap();
    r.capture(&f).unwrap();
    let err = r.capture(&f).unwrap_err();
    assert!(matches!(err, SketchError::EncoderFault(_)));
    assert_eq!(r.state(), RecorderState::Failed);
    assert!(r.last_error().is_some_and(|e| e.contains("pipe closed")));
    assert!(r.status().starts_with("Failed"));

    // Dead pipeline: no more frames are counted.
    assert_eq!(r.capture(&f).unwrap(), CaptureOutcome::Skipped);
    assert_eq!(r.stop().unwrap(), None);

    r.start(canvas(), Box::new(InMemorySink::new())).unwrap();
    assert_eq!(r.state(), RecorderState::Recording);
    assert!(r.last_error().is_none());
    assert_eq!(r.frame_count(), 0);
}

#[test]
fn failed_finalize_is_reported() {
    let mut r = recorder(2);
    r.start(
        canvas(),
        Box::new(FlakySink {
            fail_end: true,
            ..FlakySink::default()
        }),
    )
    .unwrap();
    r.capture(&frame()).unwrap();
    assert!(r.capture(&frame()).is_err());
    assert_eq!(r.state(), RecorderState::Failed);
}

#[test]
fn settings_validation() {
    assert!(recorder(1).settings().validate().is_ok());
    assert!(
        Recorder::new(RecordingSettings {
            max_frames: 0,
            ..RecordingSettings::default()
        })
        .is_err()
    );
    assert_eq!(RecordingSettings::default().max_duration_micros(), 15_000_000);
}

#[test]
fn interrupt_fails_only_an_active_recording() {
    let mut r = recorder(10);
    let idle = r.interrupt(SketchError::render("surface lost"));
    assert!(matches!(idle, SketchError::Render(_)));
    assert_eq!(r.state(), RecorderState::Idle);

    let memory = InMemorySink::new();
    r.start(canvas(), Box::new(memory.clone())).unwrap();
    r.capture(&frame()).unwrap();
    let err = r.interrupt(SketchError::render("surface lost"));
    assert!(matches!(err, SketchError::Render(_)));
    assert_eq!(r.state(), RecorderState::Failed);
    assert!(r.session().is_none());
    assert!(r.last_error().unwrap().contains("surface lost"));
    assert!(memory.captured().aborted);
    assert_eq!(r.capture(&frame()).unwrap(), CaptureOutcome::Skipped);
}
