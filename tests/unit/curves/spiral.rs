use super::*;

#[test]
fn radii_are_bounded_and_non_decreasing() {
    let spiral = PowerSpiral::golden(15.0, 0.5, 420.0);
    spiral.validate().unwrap();
    let pts = spiral.points(1000, 3.7);
    assert!(!pts.is_empty());
    assert!(pts.len() < 1000, "the bound should cut the arm short");
    for w in pts.windows(2) {
        assert!(w[1].radius >= w[0].radius);
    }
    for p in &pts {
        assert!(p.radius <= 420.0);
        let r = (p.position.x * p.position.x + p.position.y * p.position.y).sqrt();
        assert!((r - p.radius).abs() < 1e-9);
    }
}

#[test]
fn arm_ends_at_first_clamped_index() {
    let spiral = PowerSpiral::golden(15.0, 0.5, 150.0);
    // 15 * sqrt(100) = 150 is the last admissible point.
    let pts = spiral.points(1000, 0.0);
    assert_eq!(pts.len(), 101);
    assert_eq!(pts.last().map(|p| p.index), Some(100));
    assert!(spiral.point(101, 0.0).is_none());
}

#[test]
fn twist_rotates_without_changing_radius() {
    let spiral = PowerSpiral::metallic(3, 4.0, 0.6, 1000.0).with_twist(0.5);
    let a = spiral.point(10, 0.0).unwrap();
    let b = spiral.point(10, 2.0).unwrap();
    assert_eq!(a.radius, b.radius);
    assert!((b.angle - a.angle - 1.0).abs() < 1e-12);
}

#[test]
fn invalid_parameters_are_rejected() {
    assert!(PowerSpiral::golden(-1.0, 0.5, 10.0).validate().is_err());
    assert!(PowerSpiral::golden(1.0, -0.5, 10.0).validate().is_err());
    assert!(PowerSpiral::golden(1.0, 0.5, 0.0).validate().is_err());
    assert!(PowerSpiral::golden(1.0, 0.5, f64::INFINITY).validate().is_err());
}
