use crate::driver::sketch::SketchDescriptor;
use crate::foundation::core::{Canvas, Fps};
use crate::foundation::error::{SketchError, SketchResult};
use crate::sketches::{
    aizawa_trail, bronze_flow, drift_field, harmonic_bloom, orbit_dust, phyllotaxis,
    sacred_bloom, supershape,
};

const FPS_60: Fps = Fps { num: 60, den: 1 };

static SKETCHES: [SketchDescriptor; 8] = [
    SketchDescriptor {
        name: "orbit-dust",
        summary: "30 orbiting particles with proximity links and breathing aura rings",
        canvas: Canvas::PORTRAIT_HD,
        fps: FPS_60,
        clock_increment: 0.008,
        file_stem: "orbit_dust",
        build: orbit_dust::build,
    },
    SketchDescriptor {
        name: "bronze-flow",
        summary: "bronze-angle standing wave of 700 elements with distant orbitals",
        canvas: Canvas::PORTRAIT_FHD,
        fps: FPS_60,
        clock_increment: 0.015,
        file_stem: "bronze_ethereal_flow",
        build: bronze_flow::build,
    },
    SketchDescriptor {
        name: "aizawa-trail",
        summary: "precomputed Aizawa attractor replayed through a sliding window",
        canvas: Canvas::PORTRAIT_HD,
        fps: FPS_60,
        clock_increment: 0.016,
        file_stem: "aizawa_trail",
        build: aizawa_trail::build,
    },
    SketchDescriptor {
        name: "harmonic-bloom",
        summary: "Fibonacci-sphere shell, Lissajous curves and a golden power spiral",
        canvas: Canvas::PORTRAIT_HD,
        fps: FPS_60,
        clock_increment: 0.01,
        file_stem: "harmonic_bloom",
        build: harmonic_bloom::build,
    },
    SketchDescriptor {
        name: "drift-field",
        summary: "wrapping 2D dust field under twinkling stars",
        canvas: Canvas::PORTRAIT_HD,
        fps: FPS_60,
        clock_increment: 0.008,
        file_stem: "drift_field",
        build: drift_field::build,
    },
    SketchDescriptor {
        name: "supershape",
        summary: "morphing 3D supershape net",
        canvas: Canvas::PORTRAIT_FHD,
        fps: FPS_60,
        clock_increment: 0.01,
        file_stem: "supershape_3d",
        build: supershape::build,
    },
    SketchDescriptor {
        name: "phyllotaxis",
        summary: "golden-angle power spiral clamped at a radius bound",
        canvas: Canvas::PORTRAIT_HD,
        fps: FPS_60,
        clock_increment: 0.005,
        file_stem: "phyllotaxis",
        build: phyllotaxis::build,
    },
    SketchDescriptor {
        name: "sacred-bloom",
        summary: "breathing Flower of Life, Metatron's cube and a turning torus knot",
        canvas: Canvas::PORTRAIT_HD,
        fps: FPS_60,
        clock_increment: 0.008,
        file_stem: "sacred_geometry",
        build: sacred_bloom::build,
    },
];

/// Every built-in sketch, in listing order.
pub fn sketches() -> &'static [SketchDescriptor] {
    &SKETCHES
}

pub fn find_sketch(name: &str) -> SketchResult<&'static SketchDescriptor> {
    SKETCHES.iter().find(|d| d.name == name).ok_or_else(|| {
        let known = SKETCHES.iter().map(|d| d.name).collect::<Vec<_>>().join(", ");
        SketchError::validation(format!("unknown sketch '{name}' (known: {known})"))
    })
}
