use super::*;

fn cfg() -> SinkConfig {
    SinkConfig {
        width: 4,
        height: 2,
        fps: Fps::new(30, 1).unwrap(),
        bitrate: 1_000_000,
        keyframe_interval: 10,
        container: Container::WebM,
    }
}

fn frame() -> FrameRGBA {
    FrameRGBA {
        width: 4,
        height: 2,
        data: vec![7; 32],
        premultiplied: true,
    }
}

fn timed(i: u64, f: &FrameRGBA) -> TimedFrame<'_> {
    TimedFrame {
        index: FrameIndex(i),
        timestamp_micros: Fps::new(30, 1).unwrap().timestamp_micros(FrameIndex(i)),
        keyframe: i % 10 == 0,
        frame: f,
    }
}

#[test]
fn clones_share_the_capture_log() {
    let memory = InMemorySink::new();
    let mut sink: Box<dyn VideoSink> = Box::new(memory.clone());
    let f = frame();
    sink.begin(&cfg()).unwrap();
    for i in 0..3 {
        sink.push_frame(timed(i, &f)).unwrap();
    }
    let out = sink.end().unwrap();
    assert_eq!(out.frames, 3);

    let cap = memory.captured();
    assert!(cap.ended);
    assert_eq!(cap.begun, 1);
    assert_eq!(cap.frames.len(), 3);
    assert!(cap.frames[0].keyframe);
    assert!(cap.frames[0].pixels.is_none());
    assert_eq!(cap.duration_micros(), Some(100_000));
}

#[test]
fn pixels_are_kept_on_request() {
    let memory = InMemorySink::with_pixels();
    let mut sink = memory.clone();
    let f = frame();
    sink.begin(&cfg()).unwrap();
    sink.push_frame(timed(0, &f)).unwrap();
    assert_eq!(memory.captured().frames[0].pixels.as_ref(), Some(&f));
}

#[test]
fn out_of_order_and_unopened_pushes_fault() {
    let mut sink = InMemorySink::new();
    let f = frame();
    assert!(sink.push_frame(timed(0, &f)).is_err());
    sink.begin(&cfg()).unwrap();
    sink.push_frame(timed(5, &f)).unwrap();
    let err = sink.push_frame(timed(5, &f)).unwrap_err();
    assert!(matches!(err, SketchError::EncoderFault(_)));
}

#[test]
fn container_from_extension() {
    assert_eq!(Container::from_path(Path::new("a/b.MP4")), Some(Container::Mp4));
    assert_eq!(Container::from_path(Path::new("x.webm")), Some(Container::WebM));
    assert_eq!(Container::from_path(Path::new("x.gif")), None);
    assert_eq!(Container::WebM.to_string(), "webm");
}

#[test]
fn config_validation() {
    assert!(cfg().validate().is_ok());
    let mut c = cfg();
    c.keyframe_interval = 0;
    assert!(c.validate().is_err());
    let mut c = cfg();
    c.height = 3;
    assert!(c.validate().is_err());
}
