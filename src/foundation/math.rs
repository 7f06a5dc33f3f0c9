use std::f64::consts::PI;

/// Golden angle `π(3 − √5)` in radians (≈ 137.5°).
pub fn golden_angle() -> f64 {
    PI * (3.0 - 5f64.sqrt())
}

/// Positive root of `x² − n·x − 1 = 0` (golden for 1, silver for 2, bronze for 3).
pub fn metallic_ratio(n: u32) -> f64 {
    let n = f64::from(n);
    (n + (n * n + 4.0).sqrt()) * 0.5
}

/// Angular step `2π / δ` for the metallic ratio `δ` of order `n`.
pub fn metallic_angle(n: u32) -> f64 {
    std::f64::consts::TAU / metallic_ratio(n)
}

/// Re-map `v` from `[in_lo, in_hi]` to `[out_lo, out_hi]` without clamping.
pub fn map_range(v: f64, in_lo: f64, in_hi: f64, out_lo: f64, out_hi: f64) -> f64 {
    let span = in_hi - in_lo;
    if span == 0.0 {
        return out_lo;
    }
    out_lo + (v - in_lo) / span * (out_hi - out_lo)
}

pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct Fnv1a64(u64);

impl Fnv1a64 {
    pub(crate) const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01B3;

    pub(crate) fn new_default() -> Self {
        Self(Self::OFFSET_BASIS)
    }

    pub(crate) fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    pub(crate) fn write_f64(&mut self, v: f64) {
        self.write_u64(v.to_bits());
    }

    pub(crate) fn write_bytes(&mut self, bytes: &[u8]) {
        let mut h = self.0;
        for &b in bytes {
            h ^= u64::from(b);
            h = h.wrapping_mul(Self::PRIME);
        }
        self.0 = h;
    }

    pub(crate) fn finish(self) -> u64 {
        self.0
    }
}

pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
