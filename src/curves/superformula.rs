use std::f64::consts::{FRAC_PI_2, PI};

use crate::foundation::core::Vec3;

/// Gielis superformula with unit `a`/`b`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Superformula {
    pub m: f64,
    pub n1: f64,
    pub n2: f64,
    pub n3: f64,
}

impl Superformula {
    pub const fn new(m: f64, n1: f64, n2: f64, n3: f64) -> Self {
        Self { m, n1, n2, n3 }
    }

    /// Radius at `theta`. May be infinite or NaN for degenerate exponents; callers drop
    /// non-finite output.
    pub fn radius(&self, theta: f64) -> f64 {
        let k = self.m * theta / 4.0;
        let t1 = k.cos().abs().powf(self.n2);
        let t2 = k.sin().abs().powf(self.n3);
        (t1 + t2).powf(-1.0 / self.n1)
    }
}

/// Product of two superformulas evaluated on a latitude/longitude grid.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Supershape {
    pub longitude: Superformula,
    pub latitude: Superformula,
    pub scale: f64,
}

impl Supershape {
    /// Same formula on both axes.
    pub const fn uniform(shape: Superformula, scale: f64) -> Self {
        Self {
            longitude: shape,
            latitude: shape,
            scale,
        }
    }

    /// Point at longitude `lon ∈ [-π, π]` and latitude `lat ∈ [-π/2, π/2]`.
    pub fn point(&self, lon: f64, lat: f64) -> Vec3 {
        let r1 = self.longitude.radius(lon);
        let r2 = self.latitude.radius(lat);
        Vec3::new(
            self.scale * r1 * lon.cos() * r2 * lat.cos(),
            self.scale * r1 * lon.sin() * r2 * lat.cos(),
            self.scale * r2 * lat.sin(),
        )
    }

    /// `(total + 1)²` grid points, row-major by latitude.
    pub fn grid(&self, total: usize) -> Vec<Vec<Vec3>> {
        let total = total.max(1);
        (0..=total)
            .map(|i| {
                let lat = -FRAC_PI_2 + PI * i as f64 / total as f64;
                (0..=total)
                    .map(|j| {
                        let lon = -PI + 2.0 * PI * j as f64 / total as f64;
                        self.point(lon, lat)
                    })
                    .collect()
            })
            .collect()
    }
}
