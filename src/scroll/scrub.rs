use std::time::Duration;

const SNAP_EPSILON: f64 = 1e-4;

/// Lagged follower of the scroll target.
///
/// With `scrub` seconds of lag the value covers ~98% of the gap in `scrub` seconds
/// (exponential approach with time constant `scrub / 4`). With zero lag it tracks exactly.
/// State is written in place on each step; no transition objects are created.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrubFollower {
    scrub: Duration,
    target: f64,
    value: f64,
}

impl ScrubFollower {
    /// Follower at progress 0 with `scrub` lag.
    pub fn new(scrub: Duration) -> Self {
        Self {
            scrub,
            target: 0.0,
            value: 0.0,
        }
    }

    /// Configured lag.
    pub fn scrub(&self) -> Duration {
        self.scrub
    }

    /// Change the lag without moving the value.
    pub fn set_scrub(&mut self, scrub: Duration) {
        self.scrub = scrub;
    }

    /// New target progress, clamped to `[0, 1]`. Applied immediately when lag is zero.
    pub fn set_target(&mut self, progress: f64) {
        self.target = if progress.is_finite() {
            progress.clamp(0.0, 1.0)
        } else {
            0.0
        };
        if self.scrub.is_zero() {
            self.value = self.target;
        }
    }

    /// Target progress.
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Current (lagged) progress.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// `true` when the value has caught up with the target.
    pub fn is_settled(&self) -> bool {
        self.value == self.target
    }

    /// Jump straight to the target.
    pub fn snap(&mut self) {
        self.value = self.target;
    }

    /// Advance by `dt` and return the new value.
    pub fn advance(&mut self, dt: Duration) -> f64 {
        if self.scrub.is_zero() {
            self.value = self.target;
            return self.value;
        }
        let tau = self.scrub.as_secs_f64() / 4.0;
        let alpha = 1.0 - (-dt.as_secs_f64() / tau).exp();
        self.value += (self.target - self.value) * alpha;
        if (self.target - self.value).abs() < SNAP_EPSILON {
            self.value = self.target;
        }
        self.value
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/scrub.rs"]
mod tests;
