use super::*;

#[test]
fn metallic_ratios_solve_their_quadratic() {
    for n in 1..=3 {
        let x = metallic_ratio(n);
        let residual = x * x - f64::from(n) * x - 1.0;
        assert!(residual.abs() < 1e-12, "n={n} residual={residual}");
    }
    assert!((metallic_ratio(1) - 1.618_033_988_749_895).abs() < 1e-12);
    assert!((metallic_ratio(3) - (3.0 + 13f64.sqrt()) / 2.0).abs() < 1e-12);
}

#[test]
fn golden_angle_is_about_137_5_degrees() {
    assert!((golden_angle().to_degrees() - 137.507_764).abs() < 1e-5);
}

#[test]
fn map_range_handles_degenerate_input_span() {
    assert_eq!(map_range(5.0, 0.0, 10.0, 0.0, 100.0), 50.0);
    assert_eq!(map_range(5.0, 1.0, 1.0, -3.0, 3.0), -3.0);
    assert_eq!(lerp(2.0, 4.0, 0.25), 2.5);
}

#[test]
fn fnv_hash_distinguishes_bit_patterns() {
    let mut a = Fnv1a64::new_default();
    a.write_f64(0.0);
    let mut b = Fnv1a64::new_default();
    b.write_f64(-0.0);
    assert_ne!(a.finish(), b.finish());

    let mut c = Fnv1a64::new_default();
    c.write_bytes(&0u64.to_le_bytes());
    let mut d = Fnv1a64::new_default();
    d.write_u64(0);
    assert_eq!(c.finish(), d.finish());
}

#[test]
fn mul_div255_rounds() {
    assert_eq!(mul_div255_u16(255, 255), 255);
    assert_eq!(mul_div255_u16(128, 255), 128);
    assert_eq!(mul_div255_u16(0, 200), 0);
}
