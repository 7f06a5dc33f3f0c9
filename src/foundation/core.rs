use crate::foundation::error::{SketchError, SketchResult};

pub use kurbo::{Point, Rect, Vec2};

/// Absolute 0-based frame index within a recording session.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32,
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> SketchResult<Self> {
        let fps = Self { num, den };
        fps.validate()?;
        Ok(fps)
    }

    /// Reject zero numerators or denominators (e.g. from a hand-written config file).
    pub fn validate(self) -> SketchResult<()> {
        if self.den == 0 {
            return Err(SketchError::validation("Fps den must be > 0"));
        }
        if self.num == 0 {
            return Err(SketchError::validation("Fps num must be > 0"));
        }
        Ok(())
    }

    /// Convert to floating-point FPS.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Duration of one frame in seconds.
    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    /// Convert frame count to seconds.
    pub fn frames_to_secs(self, frames: u64) -> f64 {
        (frames as f64) * self.frame_duration_secs()
    }

    /// Presentation timestamp of `frame` in microseconds, derived only from the frame index.
    ///
    /// Computed in integer arithmetic as `floor(frame * 1_000_000 * den / num)`, so the value
    /// never depends on how long the frame took to render.
    pub fn timestamp_micros(self, frame: FrameIndex) -> u64 {
        let num = u128::from(self.num.max(1));
        let micros = u128::from(frame.0) * 1_000_000 * u128::from(self.den) / num;
        u64::try_from(micros).unwrap_or(u64::MAX)
    }
}

impl Default for Fps {
    fn default() -> Self {
        Self { num: 60, den: 1 }
    }
}

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Portrait 720x1280 surface used by most sketches.
    pub const PORTRAIT_HD: Canvas = Canvas {
        width: 720,
        height: 1280,
    };
    /// Portrait 1080x1920 surface used by the recording sketches.
    pub const PORTRAIT_FHD: Canvas = Canvas {
        width: 1080,
        height: 1920,
    };

    /// Validate dimensions for rasterization and yuv420p encoding.
    pub fn validate(self) -> SketchResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(SketchError::validation("canvas width/height must be non-zero"));
        }
        if self.width > u32::from(u16::MAX) || self.height > u32::from(u16::MAX) {
            return Err(SketchError::validation(
                "canvas width/height must fit in u16 for the CPU rasterizer",
            ));
        }
        if !self.width.is_multiple_of(2) || !self.height.is_multiple_of(2) {
            return Err(SketchError::validation(
                "canvas width/height must be even (required for yuv420p output)",
            ));
        }
        Ok(())
    }

    /// Canvas center in pixel space.
    pub fn center(self) -> Point {
        Point::new(f64::from(self.width) * 0.5, f64::from(self.height) * 0.5)
    }

    /// Full-canvas rectangle.
    pub fn rect(self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }
}

/// Straight-alpha RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Opaque white.
    pub const WHITE: Rgba8 = Rgba8::rgb(255, 255, 255);
    /// Opaque black.
    pub const BLACK: Rgba8 = Rgba8::rgb(0, 0, 0);

    /// Opaque color from RGB channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse `#rrggbb` or `#rrggbbaa` (leading `#` optional).
    pub fn from_hex(s: &str) -> SketchResult<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if !(hex.len() == 6 || hex.len() == 8) || !hex.is_ascii() {
            return Err(SketchError::validation(format!(
                "color '{s}' must be #rrggbb or #rrggbbaa"
            )));
        }
        let channel = |i: usize| -> SketchResult<u8> {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| SketchError::validation(format!("color '{s}' has invalid hex digits")))
        };
        let a = if hex.len() == 8 { channel(6)? } else { 255 };
        Ok(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
            a,
        })
    }

    /// Same color with alpha replaced by `alpha` in `[0, 1]`.
    pub fn with_alpha(self, alpha: f64) -> Self {
        let a = if alpha.is_finite() {
            (alpha.clamp(0.0, 1.0) * 255.0).round() as u8
        } else {
            0
        };
        Self { a, ..self }
    }

    /// Same color with alpha multiplied by `factor` in `[0, 1]`.
    pub fn fade(self, factor: f64) -> Self {
        self.with_alpha(f64::from(self.a) / 255.0 * factor)
    }

    /// Channel-wise linear interpolation; `amt` is clamped to `[0, 1]`.
    pub fn lerp(self, other: Rgba8, amt: f64) -> Self {
        let amt = if amt.is_finite() { amt.clamp(0.0, 1.0) } else { 0.0 };
        let mix = |a: u8, b: u8| -> u8 {
            (f64::from(a) + (f64::from(b) - f64::from(a)) * amt).round() as u8
        };
        Self {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }

    /// Pack as `[r, g, b, a]`.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Point or offset in sketch world space.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Vec3 {
    /// X (right).
    pub x: f64,
    /// Y (down, matching canvas orientation).
    pub y: f64,
    /// Z (towards the viewer).
    pub z: f64,
}

impl Vec3 {
    /// The origin.
    pub const ZERO: Vec3 = Vec3::new(0.0, 0.0, 0.0);

    /// Construct from components.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Point from spherical coordinates (`theta` polar from +Z, `phi` azimuth).
    pub fn from_spherical(radius: f64, theta: f64, phi: f64) -> Self {
        Self::new(
            radius * theta.sin() * phi.cos(),
            radius * theta.sin() * phi.sin(),
            radius * theta.cos(),
        )
    }

    /// `true` when every component is finite.
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Euclidean length.
    pub fn length(self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Distance to `other`.
    pub fn distance(self, other: Vec3) -> f64 {
        (self - other).length()
    }

    /// Rotate about the Y axis by `angle` radians.
    pub fn rotate_y(self, angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self::new(self.x * c + self.z * s, self.y, -self.x * s + self.z * c)
    }

    /// Rotate about the X axis by `angle` radians.
    pub fn rotate_x(self, angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self::new(self.x, self.y * c - self.z * s, self.y * s + self.z * c)
    }

    /// Rotate about the Z axis by `angle` radians.
    pub fn rotate_z(self, angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self::new(self.x * c - self.y * s, self.x * s + self.y * c, self.z)
    }
}

impl std::ops::Add for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl std::ops::Sub for Vec3 {
    type Output = Vec3;

    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl std::ops::Mul<f64> for Vec3 {
    type Output = Vec3;

    fn mul(self, rhs: f64) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
