use super::*;

fn rotate(p: Point, angle: f64) -> Point {
    let (s, c) = angle.sin_cos();
    Point::new(p.x * c - p.y * s, p.x * s + p.y * c)
}

/// Every point, turned by a sixth of a turn, lands on another point of the set.
fn assert_six_fold(points: &[Point]) {
    for &p in points {
        let turned = rotate(p, TAU / 6.0);
        assert!(
            points.iter().any(|q| q.distance(turned) < 1e-9),
            "{p:?} has no rotated partner"
        );
    }
}

#[test]
fn flower_counts_follow_hex_rings() {
    assert_eq!(flower_of_life(0, 10.0), vec![Point::ORIGIN]);
    for (rings, expected) in [(1, 7), (2, 19), (3, 37)] {
        assert_eq!(flower_count(rings), expected);
        assert_eq!(flower_of_life(rings, 10.0).len(), expected);
    }
}

#[test]
fn flower_centres_are_distinct_lattice_points() {
    let spacing = 35.0;
    let centres = flower_of_life(2, spacing);
    for (i, a) in centres.iter().enumerate() {
        for b in &centres[i + 1..] {
            assert!(a.distance(*b) > spacing - 1e-9);
        }
    }
    for p in &centres[1..7] {
        assert!((p.distance(Point::ORIGIN) - spacing).abs() < 1e-9);
    }
    let outer = centres[7..]
        .iter()
        .map(|p| p.distance(Point::ORIGIN))
        .fold(0.0, f64::max);
    assert!((outer - 2.0 * spacing).abs() < 1e-9);
    assert_six_fold(&centres);
}

#[test]
fn metatron_cube_shape() {
    let radius = 20.0;
    let vertices = metatron_vertices(radius, 0.3);
    assert_eq!(vertices[0], Point::ORIGIN);
    for i in 0..6 {
        assert!((vertices[1 + i].distance(Point::ORIGIN) - 40.0).abs() < 1e-9);
        assert!((vertices[7 + i].distance(Point::ORIGIN) - 80.0).abs() < 1e-9);
    }
    assert!((vertices[1].y.atan2(vertices[1].x) - 0.3).abs() < 1e-12);
    assert_six_fold(&vertices);

    let edges = metatron_edges();
    assert_eq!(edges.len(), 78);
    assert!(edges.iter().all(|&(a, b)| a < b && b < METATRON_VERTICES));
    let mut unique = edges.clone();
    unique.dedup();
    assert_eq!(unique.len(), edges.len());
}

#[test]
fn torus_points_sit_on_the_tube() {
    let torus = Torus::new(260.0, 90.0);
    torus.validate().unwrap();
    for (u, v) in [(0.0, 0.0), (1.0, 2.0), (4.0, -0.5), (TAU, 3.0)] {
        let p = torus.point(u, v);
        let tube = Vec3::new(260.0 * u.cos(), 0.0, 260.0 * u.sin());
        assert!((p.distance(tube) - 90.0).abs() < 1e-9);
    }
}

#[test]
fn torus_knot_winds_and_closes() {
    let torus = Torus::new(3.0, 1.0);
    let knot = torus.knot(2, 3, 0.4, 300);
    assert_eq!(knot.len(), 300);
    assert!(knot[0].distance(torus.point(TAU * 2.0, TAU * 3.0 + 0.4)) < 1e-9);
    assert!(knot.iter().all(|p| p.is_finite()));
    assert!(torus.knot(2, 3, 0.0, 0).is_empty());
}

#[test]
fn degenerate_tori_are_rejected() {
    assert!(Torus::new(1.0, 2.0).validate().is_err());
    assert!(Torus::new(3.0, 0.0).validate().is_err());
    assert!(Torus::new(f64::INFINITY, 1.0).validate().is_err());
}
