use super::*;

#[test]
fn timestamps_derive_from_frame_index_only() {
    let fps = Fps::new(60, 1).unwrap();
    assert_eq!(fps.timestamp_micros(FrameIndex(0)), 0);
    assert_eq!(fps.timestamp_micros(FrameIndex(1)), 16_666);
    assert_eq!(fps.timestamp_micros(FrameIndex(60)), 1_000_000);
    assert_eq!(fps.timestamp_micros(FrameIndex(900)), 15_000_000);
}

#[test]
fn timestamps_are_strictly_increasing_for_ntsc_rates() {
    let fps = Fps::new(30000, 1001).unwrap();
    let mut prev = fps.timestamp_micros(FrameIndex(0));
    for f in 1..500 {
        let ts = fps.timestamp_micros(FrameIndex(f));
        assert!(ts > prev);
        prev = ts;
    }
    assert_eq!(fps.timestamp_micros(FrameIndex(30000)), 1_001_000_000);
}

#[test]
fn fps_rejects_zero_parts() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(24, 0).is_err());
    assert!((Fps::new(24, 1).unwrap().frames_to_secs(48) - 2.0).abs() < 1e-12);
}

#[test]
fn canvas_validation() {
    assert!(Canvas::PORTRAIT_HD.validate().is_ok());
    assert!(Canvas::PORTRAIT_FHD.validate().is_ok());
    assert!(
        Canvas {
            width: 0,
            height: 10
        }
        .validate()
        .is_err()
    );
    assert!(
        Canvas {
            width: 11,
            height: 10
        }
        .validate()
        .is_err()
    );
    assert!(
        Canvas {
            width: 70_000,
            height: 10
        }
        .validate()
        .is_err()
    );
}

#[test]
fn hex_colors_parse_with_and_without_alpha() {
    assert_eq!(
        Rgba8::from_hex("#362d78").unwrap(),
        Rgba8 {
            r: 0x36,
            g: 0x2d,
            b: 0x78,
            a: 255
        }
    );
    assert_eq!(Rgba8::from_hex("c8c0e940").unwrap().a, 0x40);
    assert!(Rgba8::from_hex("#12345").is_err());
    assert!(Rgba8::from_hex("#zzzzzz").is_err());
}

#[test]
fn color_lerp_and_alpha_clamp() {
    let a = Rgba8::rgb(0, 0, 0);
    let b = Rgba8::rgb(255, 255, 255);
    assert_eq!(a.lerp(b, 0.5), Rgba8::rgb(128, 128, 128));
    assert_eq!(a.lerp(b, 2.0), b);
    assert_eq!(b.with_alpha(-1.0).a, 0);
    assert_eq!(b.with_alpha(f64::NAN).a, 0);
    assert_eq!(b.fade(0.5).a, 128);
}

#[test]
fn vec3_rotations_preserve_length() {
    let v = Vec3::new(3.0, -4.0, 12.0);
    for angle in [0.1, 1.0, 2.5, -3.0] {
        assert!((v.rotate_x(angle).length() - 13.0).abs() < 1e-9);
        assert!((v.rotate_y(angle).length() - 13.0).abs() < 1e-9);
        assert!((v.rotate_z(angle).length() - 13.0).abs() < 1e-9);
    }
    assert!(!Vec3::new(f64::NAN, 0.0, 0.0).is_finite());
}
