use super::*;
use crate::foundation::core::Fps;

fn cfg(container: Container) -> SinkConfig {
    SinkConfig {
        width: 720,
        height: 1280,
        fps: Fps::new(60, 1).unwrap(),
        bitrate: 8_000_000,
        keyframe_interval: 60,
        container,
    }
}

fn pair(args: &[String], flag: &str) -> Option<String> {
    let i = args.iter().position(|a| a == flag)?;
    args.get(i + 1).cloned()
}

#[test]
fn mp4_args_use_h264_with_faststart() {
    let args = ffmpeg_args(&cfg(Container::Mp4), true);
    assert_eq!(args[0], "-y");
    assert_eq!(pair(&args, "-s").as_deref(), Some("720x1280"));
    assert_eq!(pair(&args, "-r").as_deref(), Some("60/1"));
    assert_eq!(pair(&args, "-c:v").as_deref(), Some("libx264"));
    assert_eq!(pair(&args, "-b:v").as_deref(), Some("8000000"));
    assert_eq!(pair(&args, "-g").as_deref(), Some("60"));
    assert_eq!(pair(&args, "-movflags").as_deref(), Some("+faststart"));

    // Input rate must precede the input.
    let r = args.iter().position(|a| a == "-r").unwrap();
    let i = args.iter().position(|a| a == "-i").unwrap();
    assert!(r < i);
}

#[test]
fn webm_args_use_vp9() {
    let args = ffmpeg_args(&cfg(Container::WebM), false);
    assert_eq!(args[0], "-n");
    assert_eq!(pair(&args, "-c:v").as_deref(), Some("libvpx-vp9"));
    assert!(!args.iter().any(|a| a == "-movflags"));
}

#[test]
fn flatten_premul_alpha_0_returns_bg() {
    let src = vec![0u8, 0, 0, 0];
    let mut dst = vec![0u8; 4];
    flatten_premul_over_bg_to_opaque_rgba8(&mut dst, &src, Rgba8::rgb(10, 20, 30)).unwrap();
    assert_eq!(dst, vec![10, 20, 30, 255]);
}

#[test]
fn flatten_premul_alpha_255_is_identity() {
    let src = vec![1u8, 2, 3, 255];
    let mut dst = vec![0u8; 4];
    flatten_premul_over_bg_to_opaque_rgba8(&mut dst, &src, Rgba8::rgb(10, 20, 30)).unwrap();
    assert_eq!(dst, src);
}

#[test]
fn flatten_straight_half_red_over_black() {
    let src = vec![255u8, 0, 0, 128];
    let mut dst = vec![0u8; 4];
    flatten_straight_over_bg_to_opaque_rgba8(&mut dst, &src, Rgba8::BLACK).unwrap();
    assert_eq!(dst, vec![128, 0, 0, 255]);
}

#[test]
fn flatten_rejects_mismatched_buffers() {
    let mut dst = vec![0u8; 8];
    assert!(flatten_premul_over_bg_to_opaque_rgba8(&mut dst, &[0u8; 4], Rgba8::BLACK).is_err());
}

#[test]
fn begin_rejects_bad_config_before_spawning() {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new("target/never_written.mp4"));
    let mut bad = cfg(Container::Mp4);
    bad.width = 721;
    assert!(matches!(
        sink.begin(&bad).unwrap_err(),
        SketchError::Validation(_)
    ));
    bad.width = 720;
    bad.bitrate = 0;
    assert!(sink.begin(&bad).is_err());
}

#[test]
fn push_before_begin_is_a_state_error() {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new("target/never_written.mp4"));
    let frame = crate::render::backend::FrameRGBA {
        width: 2,
        height: 2,
        data: vec![0; 16],
        premultiplied: true,
    };
    let err = sink
        .push_frame(TimedFrame {
            index: FrameIndex(0),
            timestamp_micros: 0,
            keyframe: true,
            frame: &frame,
        })
        .unwrap_err();
    assert!(matches!(err, SketchError::State(_)));
}
