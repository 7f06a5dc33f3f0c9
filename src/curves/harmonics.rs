use std::f64::consts::TAU;

use crate::foundation::core::Vec3;
use crate::foundation::math::metallic_ratio;

/// Spherical coordinates `(azimuth, polar)` of point `i` out of `n` on a Fibonacci sphere.
///
/// Points are spread evenly over the sphere: the azimuth advances by `2π/φ` per index and
/// `cos(polar)` steps linearly from near `1` to near `-1`.
pub fn fibonacci_sphere(i: usize, n: usize) -> (f64, f64) {
    if n == 0 {
        return (0.0, 0.0);
    }
    let azimuth = (TAU * i as f64 / metallic_ratio(1)).rem_euclid(TAU);
    let z = 1.0 - 2.0 * (i as f64 + 0.5) / n as f64;
    (azimuth, z.clamp(-1.0, 1.0).acos())
}

/// Real spherical harmonic shape factor of degree `l` and order `m` (up to `l = 3`).
///
/// Normalization constants are dropped; only the angular shape matters for drawing. Degrees
/// above 3 fall back to the constant `l = 0` term.
pub fn spherical_harmonic(polar: f64, azimuth: f64, l: u32, m: u32) -> f64 {
    let (s, c) = polar.sin_cos();
    let ring = (f64::from(m) * azimuth).cos();
    match (l, m) {
        (1, 0) => c,
        (1, _) => s * ring,
        (2, 0) => 3.0 * c * c - 1.0,
        (2, _) => s * s * ring,
        (3, 0) => c * (5.0 * c * c - 3.0),
        (3, _) => s * (5.0 * c * c - 1.0) * ring,
        _ => 1.0,
    }
}

/// Point on the surface `r = base + amplitude · |Y(l, m)|`.
pub fn harmonic_surface_point(
    polar: f64,
    azimuth: f64,
    l: u32,
    m: u32,
    base: f64,
    amplitude: f64,
) -> Vec3 {
    let r = base + amplitude * spherical_harmonic(polar, azimuth, l, m).abs();
    Vec3::from_spherical(r, polar, azimuth)
}
