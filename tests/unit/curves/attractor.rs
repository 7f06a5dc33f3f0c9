use super::*;

fn small_aizawa() -> AttractorBuffer {
    AttractorBuffer::integrate(
        &Aizawa::default(),
        Integration {
            steps: 1000,
            ..Integration::default()
        },
    )
    .unwrap()
}

#[test]
fn aizawa_buffer_is_finite_and_bounded() {
    let buf = small_aizawa();
    assert_eq!(buf.len(), 1000);
    for p in buf.points() {
        assert!(p.is_finite());
        // The Aizawa attractor stays within a few units of the origin before scaling.
        assert!(p.length() < 95.0 * 5.0);
    }
}

#[test]
fn integration_is_deterministic() {
    assert_eq!(small_aizawa(), small_aizawa());
}

#[test]
fn replay_indices_wrap_and_stay_in_bounds() {
    let buf = small_aizawa();
    let len = buf.len();
    for start in [0, 1, len - 1, len, 3 * len + 7, usize::MAX] {
        for i in [0, 1, len - 1, len, 2 * len + 3, usize::MAX] {
            assert!(buf.replay_index(start, i) < len);
        }
    }
    assert_eq!(buf.replay_index(len - 1, 1), 0);
    assert_eq!(buf.window(len - 2, 4, 1).count(), 4);
    assert_eq!(buf.window(0, 3500, 175).count(), 20);
}

#[test]
fn start_index_follows_clock() {
    let buf = small_aizawa();
    assert_eq!(buf.start_index(0.0, 180.0), 0);
    assert_eq!(buf.start_index(1.0, 180.0), 180);
    assert_eq!(buf.start_index(10.0, 180.0), 1800 % 1000);
    assert_eq!(buf.start_index(-2.0, 180.0), 0);
    assert_eq!(buf.start_index(f64::NAN, 180.0), 0);
    assert_eq!(buf.start_index(f64::INFINITY, 180.0), 0);
}

#[test]
fn rejects_empty_and_divergent_runs() {
    let zero = Integration {
        steps: 0,
        ..Integration::default()
    };
    assert!(AttractorBuffer::integrate(&Aizawa::default(), zero).is_err());
    assert!(AttractorBuffer::from_points(Vec::new()).is_err());

    let blowup = Integration {
        start: Vec3::new(1.0, 1.0, 1.0),
        dt: 10.0,
        steps: 10_000,
        scale: 1.0,
    };
    let err = AttractorBuffer::integrate(&Aizawa::default(), blowup).unwrap_err();
    assert!(matches!(err, SketchError::Validation(_)));
}
