use crate::foundation::error::{SketchError, SketchResult};

/// Animation clock advanced by a fixed increment once per frame.
///
/// `t` is derived as `ticks * increment` instead of being accumulated, so two clocks with the
/// same increment agree bit-for-bit after the same number of ticks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Clock {
    increment: f64,
    ticks: u64,
}

impl Clock {
    pub fn new(increment: f64) -> SketchResult<Self> {
        if !increment.is_finite() || increment <= 0.0 {
            return Err(SketchError::validation(
                "clock increment must be finite and > 0",
            ));
        }
        Ok(Self {
            increment,
            ticks: 0,
        })
    }

    /// Advance by one increment and return the new `t`.
    pub fn advance(&mut self) -> f64 {
        self.ticks = self.ticks.saturating_add(1);
        self.t()
    }

    /// Rewind to `t = 0` (recording start).
    pub fn reset(&mut self) {
        self.ticks = 0;
    }

    /// Jump to an absolute tick count. Exact, since `t` is never accumulated.
    pub fn seek(&mut self, ticks: u64) {
        self.ticks = ticks;
    }

    pub fn t(&self) -> f64 {
        self.ticks as f64 * self.increment
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn increment(&self) -> f64 {
        self.increment
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/clock.rs"]
mod tests;
