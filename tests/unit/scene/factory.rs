use super::*;
use crate::scene::entity::EvalCtx;

fn orbit_cfg() -> EntityConfig {
    EntityConfig::Orbit(OrbitConfig {
        radius: Span::new(280.0, 450.0),
        height: Span::new(-400.0, 400.0),
        speed: Span::new(0.3, 0.8),
        size: Span::new(3.0, 6.0),
    })
}

#[test]
fn orbit_fields_stay_within_configured_ranges() {
    let palette = Palette::dusk();
    let entities = EntityFactory::new(7)
        .create_entities(500, &orbit_cfg(), &palette)
        .unwrap();
    assert_eq!(entities.len(), 500);
    for e in &entities {
        let Motion::Orbit {
            angle,
            radius,
            height,
            speed,
        } = e.motion
        else {
            panic!("expected orbit motion");
        };
        assert!((0.0..TAU).contains(&angle));
        assert!((280.0..=450.0).contains(&radius));
        assert!((-400.0..=400.0).contains(&height));
        assert!((0.3..=0.8).contains(&speed));
        assert!((3.0..=6.0).contains(&e.size));
        assert!(e.color < palette.len());
    }
}

#[test]
fn same_seed_same_population() {
    let palette = Palette::dusk();
    let a = EntityFactory::new(42)
        .create_entities(64, &orbit_cfg(), &palette)
        .unwrap();
    let b = EntityFactory::new(42)
        .create_entities(64, &orbit_cfg(), &palette)
        .unwrap();
    let c = EntityFactory::new(43)
        .create_entities(64, &orbit_cfg(), &palette)
        .unwrap();
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn zero_count_is_allowed() {
    let entities = EntityFactory::new(1)
        .create_entities(0, &orbit_cfg(), &Palette::dusk())
        .unwrap();
    assert!(entities.is_empty());
}

#[test]
fn negative_radius_and_inverted_ranges_are_rejected() {
    let palette = Palette::dusk();
    let mut factory = EntityFactory::new(1);

    let negative = EntityConfig::Orbit(OrbitConfig {
        radius: Span::new(-5.0, 10.0),
        ..match orbit_cfg() {
            EntityConfig::Orbit(c) => c,
            _ => unreachable!(),
        }
    });
    let err = factory.create_entities(3, &negative, &palette).unwrap_err();
    assert!(matches!(err, SketchError::Validation(_)));

    let inverted = EntityConfig::Shell(ShellConfig {
        radius: Span::new(300.0, 200.0),
        size: Span::fixed(2.0),
    });
    assert!(factory.create_entities(3, &inverted, &palette).is_err());

    let nan = EntityConfig::Shell(ShellConfig {
        radius: Span::new(f64::NAN, 200.0),
        size: Span::fixed(2.0),
    });
    assert!(factory.create_entities(3, &nan, &palette).is_err());
}

#[test]
fn shell_seeding_is_closed_form_and_bounded() {
    let cfg = EntityConfig::Shell(ShellConfig {
        radius: Span::new(150.0, 350.0),
        size: Span::new(3.0, 8.0),
    });
    let palette = Palette::dusk();
    let a = EntityFactory::new(1)
        .create_entities(200, &cfg, &palette)
        .unwrap();
    let b = EntityFactory::new(99)
        .create_entities(200, &cfg, &palette)
        .unwrap();
    for (ea, eb) in a.iter().zip(&b) {
        // Only sizes are random; motion is a pure function of the index.
        assert_eq!(ea.motion, eb.motion);
        let Motion::Shell { radius, .. } = ea.motion else {
            panic!("expected shell motion");
        };
        assert!((150.0..=350.0).contains(&radius));
    }
}

#[test]
fn drift_positions_wrap_inside_bounds() {
    let bounds = Rect::new(0.0, 0.0, 720.0, 1280.0);
    let cfg = EntityConfig::Drift(DriftConfig {
        bounds,
        speed: Span::new(-0.2, 0.2),
        depth: Span::new(0.5, 2.0),
        size: Span::new(1.0, 3.0),
    });
    let palette = Palette::dusk();
    let entities = EntityFactory::new(5)
        .create_entities(100, &cfg, &palette)
        .unwrap();
    for tick in [0u64, 1, 100, 10_000, 1_000_000] {
        let ctx = EvalCtx {
            t: tick as f64 * 0.008,
            tick,
        };
        for e in &entities {
            let p = e.place(ctx, &palette).position;
            assert!((0.0..720.0).contains(&p.x), "x={} at tick {tick}", p.x);
            assert!((0.0..1280.0).contains(&p.y), "y={} at tick {tick}", p.y);
        }
    }
}

#[test]
fn degenerate_drift_bounds_are_rejected() {
    let cfg = EntityConfig::Drift(DriftConfig {
        bounds: Rect::new(0.0, 0.0, 0.0, 10.0),
        speed: Span::fixed(0.1),
        depth: Span::fixed(1.0),
        size: Span::fixed(1.0),
    });
    assert!(
        EntityFactory::new(0)
            .create_entities(1, &cfg, &Palette::dusk())
            .is_err()
    );
}
