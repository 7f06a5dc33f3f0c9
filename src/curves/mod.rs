//! Parametric curve families: power spirals, strange attractors, Lissajous figures, spherical
//! harmonics, the superformula and sacred-geometry figures.

pub mod attractor;
pub mod harmonics;
pub mod lissajous;
pub mod sacred;
pub mod spiral;
pub mod superformula;
