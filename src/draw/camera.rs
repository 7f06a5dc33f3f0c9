use crate::foundation::core::{Canvas, Point, Vec3};

/// Pinhole camera looking down −Z at the world origin from `distance` units away.
///
/// The world is rotated by `yaw` (around Y) then `pitch` (around X) before projection, which
/// stands in for an orbiting camera.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub center: Point,
    pub distance: f64,
    pub focal: f64,
    pub yaw: f64,
    pub pitch: f64,
}

/// A projected world point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projected {
    pub point: Point,
    /// Screen pixels per world unit at this depth.
    pub scale: f64,
    /// Distance in front of the camera; larger is farther.
    pub depth: f64,
}

impl Camera {
    pub fn new(canvas: Canvas) -> Self {
        Self {
            center: canvas.center(),
            distance: 800.0,
            focal: 800.0,
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    pub fn with_distance(mut self, distance: f64, focal: f64) -> Self {
        self.distance = distance;
        self.focal = focal;
        self
    }

    pub fn with_orbit(mut self, yaw: f64, pitch: f64) -> Self {
        self.yaw = yaw;
        self.pitch = pitch;
        self
    }

    /// `None` for points behind the near plane or with non-finite coordinates.
    pub fn project(&self, p: Vec3) -> Option<Projected> {
        let v = p.rotate_y(self.yaw).rotate_x(self.pitch);
        let depth = self.distance - v.z;
        if !(depth > 1e-3) {
            return None;
        }
        let scale = self.focal / depth;
        let point = Point::new(self.center.x + v.x * scale, self.center.y + v.y * scale);
        (point.x.is_finite() && point.y.is_finite() && scale.is_finite()).then_some(Projected {
            point,
            scale,
            depth,
        })
    }

    /// Depth cue in `[0, 1]`: 1 at `near`, 0 at `far` and beyond.
    pub fn fog(&self, depth: f64, near: f64, far: f64) -> f64 {
        if far <= near {
            return 1.0;
        }
        (1.0 - (depth - near) / (far - near)).clamp(0.0, 1.0)
    }
}
