use crate::foundation::core::Point;
use crate::foundation::error::{SketchError, SketchResult};
use crate::foundation::math::{golden_angle, metallic_angle};

/// Power-law spiral: point `i` sits at radius `scale · i^exponent` and angle
/// `i · angle_step + twist · t`.
///
/// Radius growth is clamped: the arm ends at the first index whose radius exceeds `max_radius`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PowerSpiral {
    pub scale: f64,
    pub exponent: f64,
    pub angle_step: f64,
    pub twist: f64,
    pub max_radius: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpiralPoint {
    pub index: usize,
    pub radius: f64,
    pub angle: f64,
    /// Offset from the spiral center.
    pub position: Point,
}

impl PowerSpiral {
    /// Phyllotaxis arrangement using the golden angle.
    pub fn golden(scale: f64, exponent: f64, max_radius: f64) -> Self {
        Self {
            scale,
            exponent,
            angle_step: golden_angle(),
            twist: 1.0,
            max_radius,
        }
    }

    /// Arrangement using the `2π/δ` step of the metallic ratio of order `n`.
    pub fn metallic(n: u32, scale: f64, exponent: f64, max_radius: f64) -> Self {
        Self {
            angle_step: metallic_angle(n),
            ..Self::golden(scale, exponent, max_radius)
        }
    }

    pub fn with_twist(mut self, twist: f64) -> Self {
        self.twist = twist;
        self
    }

    pub fn validate(&self) -> SketchResult<()> {
        if !self.scale.is_finite() || self.scale < 0.0 {
            return Err(SketchError::validation("spiral scale must be finite and >= 0"));
        }
        if !self.exponent.is_finite() || self.exponent < 0.0 {
            return Err(SketchError::validation(
                "spiral exponent must be finite and >= 0",
            ));
        }
        if !self.angle_step.is_finite() || !self.twist.is_finite() {
            return Err(SketchError::validation("spiral angles must be finite"));
        }
        if !self.max_radius.is_finite() || self.max_radius <= 0.0 {
            return Err(SketchError::validation(
                "spiral max_radius must be finite and > 0",
            ));
        }
        Ok(())
    }

    /// Unclamped radius of point `i`.
    pub fn radius(&self, i: usize) -> f64 {
        self.scale * (i as f64).powf(self.exponent)
    }

    /// Angle of point `i` at clock `t`.
    pub fn angle(&self, i: usize, t: f64) -> f64 {
        i as f64 * self.angle_step + self.twist * t
    }

    /// Point `i` at clock `t`, or `None` once the radius passes the bound.
    pub fn point(&self, i: usize, t: f64) -> Option<SpiralPoint> {
        let radius = self.radius(i);
        if !(radius <= self.max_radius) {
            return None;
        }
        let angle = self.angle(i, t);
        Some(SpiralPoint {
            index: i,
            radius,
            angle,
            position: Point::new(radius * angle.cos(), radius * angle.sin()),
        })
    }

    /// Up to `count` points, stopping at the first clamped index.
    pub fn points(&self, count: usize, t: f64) -> Vec<SpiralPoint> {
        (0..count).map_while(|i| self.point(i, t)).collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/curves/spiral.rs"]
mod tests;
