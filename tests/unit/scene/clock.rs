use super::*;

#[test]
fn hundred_ticks_of_0_008_is_0_8() {
    let mut clock = Clock::new(0.008).unwrap();
    let mut last = 0.0;
    for _ in 0..100 {
        let t = clock.advance();
        assert!(t > last);
        last = t;
    }
    assert_eq!(clock.ticks(), 100);
    assert!((clock.t() - 0.8).abs() < 1e-12);
}

#[test]
fn reset_and_seek_are_exact() {
    let mut a = Clock::new(0.015).unwrap();
    for _ in 0..250 {
        a.advance();
    }
    let mut b = Clock::new(0.015).unwrap();
    b.seek(250);
    assert_eq!(a.t().to_bits(), b.t().to_bits());

    a.reset();
    assert_eq!(a.t(), 0.0);
    assert_eq!(a.ticks(), 0);
}

#[test]
fn invalid_increments_are_rejected() {
    for inc in [0.0, -0.01, f64::NAN, f64::INFINITY] {
        assert!(Clock::new(inc).is_err(), "increment {inc} should be rejected");
    }
}
