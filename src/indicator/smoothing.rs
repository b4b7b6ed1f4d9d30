use std::time::Duration;

/// Cadence of the smoothing step.
pub const SMOOTHING_TICK: Duration = Duration::from_millis(20);

/// Eases a displayed percentage toward the raw load percentage.
///
/// Each tick closes 2% of the remaining gap, but at least 0.2 points, and never overshoots or
/// moves backwards.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ProgressSmoother {
    target: f64,
    smoothed: f64,
    carry: Duration,
}

impl ProgressSmoother {
    /// Smoother at 0%.
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw percentage to approach, clamped to `[0, 100]`.
    pub fn set_target(&mut self, percent: f64) {
        self.target = if percent.is_finite() {
            percent.clamp(0.0, 100.0)
        } else {
            0.0
        };
    }

    /// Raw percentage being approached.
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Current smoothed percentage.
    pub fn smoothed(&self) -> f64 {
        self.smoothed
    }

    /// Whole-number percentage for display, capped at 100.
    pub fn display_percent(&self) -> u8 {
        self.smoothed.round().min(100.0) as u8
    }

    /// One smoothing step.
    pub fn tick(&mut self) {
        if self.smoothed < self.target {
            let step = ((self.target - self.smoothed) * 0.02).max(0.2);
            self.smoothed = (self.smoothed + step).min(self.target);
        }
    }

    /// Run as many ticks as fit into `elapsed` plus the leftover from earlier calls.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.carry += elapsed;
        let mut ticks = 0;
        while self.carry >= SMOOTHING_TICK {
            self.carry -= SMOOTHING_TICK;
            if self.smoothed >= self.target {
                // Idle ticks change nothing; drop them.
                self.carry = Duration::from_nanos(
                    (self.carry.as_nanos() % SMOOTHING_TICK.as_nanos()) as u64,
                );
                break;
            }
            self.tick();
            ticks += 1;
        }
        ticks
    }
}

#[cfg(test)]
#[path = "../../tests/unit/indicator/smoothing.rs"]
mod tests;
