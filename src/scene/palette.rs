use std::sync::Arc;

use crate::foundation::core::Rgba8;
use crate::foundation::error::{SketchError, SketchResult};

/// Violet-to-slate palette shared by most of the sketch series.
pub const DUSK: [&str; 10] = [
    "#362d78", "#523fa3", "#916ccc", "#bda1e5", "#c8c0e9", "#84bae7", "#516ad4", "#333f87",
    "#293039", "#283631",
];

/// Immutable ordered color list, cheap to clone and shared read-only by every entity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    colors: Arc<[Rgba8]>,
}

impl Palette {
    pub fn new(colors: Vec<Rgba8>) -> SketchResult<Self> {
        if colors.is_empty() {
            return Err(SketchError::validation("palette must contain at least one color"));
        }
        Ok(Self {
            colors: colors.into(),
        })
    }

    pub fn from_hex(hex: &[&str]) -> SketchResult<Self> {
        let colors = hex
            .iter()
            .map(|h| Rgba8::from_hex(h))
            .collect::<SketchResult<Vec<_>>>()?;
        Self::new(colors)
    }

    pub fn dusk() -> Self {
        let colors = DUSK
            .iter()
            .filter_map(|h| Rgba8::from_hex(h).ok())
            .collect::<Vec<_>>();
        Self {
            colors: colors.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color at `index`, wrapping around the palette length.
    pub fn get(&self, index: usize) -> Rgba8 {
        self.colors[index % self.colors.len()]
    }

    /// Blend from `index` towards `index + 1` by `amt` in `[0, 1]`.
    pub fn blend_next(&self, index: usize, amt: f64) -> Rgba8 {
        self.get(index).lerp(self.get(index + 1), amt)
    }

    /// Treat the palette as a cyclic gradient and sample it at `pos` (period 1.0).
    pub fn gradient(&self, pos: f64) -> Rgba8 {
        let pos = if pos.is_finite() { pos.rem_euclid(1.0) } else { 0.0 };
        let scaled = pos * self.colors.len() as f64;
        let idx = scaled.floor() as usize;
        self.blend_next(idx, scaled.fract())
    }

    pub fn iter(&self) -> impl Iterator<Item = Rgba8> + '_ {
        self.colors.iter().copied()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::dusk()
    }
}
