use super::*;

const C: Rgba8 = Rgba8::rgb(200, 100, 50);

#[test]
fn push_order_is_paint_order() {
    let mut list = DrawList::new();
    list.background(Rgba8::BLACK);
    list.circle(Point::new(1.0, 2.0), 3.0, C);
    list.line(Point::ZERO, Point::new(5.0, 5.0), 1.0, C);
    assert_eq!(list.len(), 3);
    assert!(matches!(list.ops()[0], DrawOp::Clear(_)));
    assert!(matches!(list.ops()[1], DrawOp::Circle { .. }));
    assert!(matches!(list.ops()[2], DrawOp::Line { .. }));
}

#[test]
fn non_finite_primitives_are_dropped_and_counted() {
    let mut list = DrawList::new();
    assert!(!list.circle(Point::new(f64::NAN, 0.0), 3.0, C));
    assert!(!list.circle(Point::ZERO, f64::INFINITY, C));
    assert!(!list.line(Point::ZERO, Point::new(0.0, f64::NEG_INFINITY), 1.0, C));
    assert!(!list.polyline([Point::ZERO, Point::new(f64::NAN, 1.0)], false, 1.0, C));
    assert!(list.is_empty());
    assert_eq!(list.dropped(), 4);

    list.reset();
    assert_eq!(list.dropped(), 0);
}

#[test]
fn invisible_primitives_are_skipped_silently() {
    let mut list = DrawList::new();
    assert!(list.circle(Point::ZERO, 0.0, C));
    assert!(list.circle(Point::ZERO, 4.0, C.with_alpha(0.0)));
    assert!(list.polyline([Point::ZERO], true, 1.0, C));
    assert!(list.is_empty());
    assert_eq!(list.dropped(), 0);
}

#[test]
fn glow_pushes_one_disc_per_layer() {
    let mut list = DrawList::new();
    list.glow(Point::new(10.0, 10.0), 12.0, C, 4);
    assert_eq!(list.len(), 4);
    let DrawOp::Circle { radius, .. } = list.ops()[0] else {
        panic!("expected a circle");
    };
    assert_eq!(radius, 12.0);
}
