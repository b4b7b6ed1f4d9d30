use std::time::Duration;

use crate::indicator::smoothing::ProgressSmoother;

/// Hand-off rules for the loading indicator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IndicatorOpts {
    /// Minimum time the indicator stays up, even if loading is instant.
    pub min_display: Duration,
    /// Delay between "ready" and "done" (the exit transition).
    pub exit_delay: Duration,
    /// Smoothed percentage required before exiting.
    pub ready_percent: f64,
}

impl Default for IndicatorOpts {
    fn default() -> Self {
        Self {
            min_display: Duration::from_millis(3500),
            exit_delay: Duration::from_millis(800),
            ready_percent: 99.0,
        }
    }
}

/// Indicator lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndicatorPhase {
    /// Showing progress.
    Loading,
    /// Ready; waiting out the exit transition.
    Exiting {
        /// Time left before `Done`.
        remaining: Duration,
    },
    /// Hidden; the player may take over.
    Done,
}

/// Loading indicator driven by explicit elapsed time.
///
/// Done is reported exactly once, when loading has finished, the minimum display time has
/// passed, the smoothed percentage reached the ready threshold, and the exit delay ran out.
#[derive(Clone, Debug)]
pub struct LoadingIndicator {
    opts: IndicatorOpts,
    smoother: ProgressSmoother,
    shown_for: Duration,
    loaded: bool,
    phase: IndicatorPhase,
}

impl LoadingIndicator {
    /// Indicator at 0% with `opts`.
    pub fn new(opts: IndicatorOpts) -> Self {
        Self {
            opts,
            smoother: ProgressSmoother::new(),
            shown_for: Duration::ZERO,
            loaded: false,
            phase: IndicatorPhase::Loading,
        }
    }

    /// Feed the raw load percentage.
    pub fn set_progress(&mut self, percent: f64) {
        self.smoother.set_target(percent);
    }

    /// Record that every frame settled.
    pub fn mark_loaded(&mut self) {
        self.loaded = true;
    }

    /// Current phase.
    pub fn phase(&self) -> IndicatorPhase {
        self.phase
    }

    /// `true` once the indicator finished.
    pub fn is_done(&self) -> bool {
        self.phase == IndicatorPhase::Done
    }

    /// Percentage to display.
    pub fn display_percent(&self) -> u8 {
        self.smoother.display_percent()
    }

    /// Smoothed percentage.
    pub fn smoothed(&self) -> f64 {
        self.smoother.smoothed()
    }

    /// Time the indicator has been shown.
    pub fn shown_for(&self) -> Duration {
        self.shown_for
    }

    /// Move time forward. Returns `true` on the call that reaches [`IndicatorPhase::Done`].
    pub fn advance(&mut self, dt: Duration) -> bool {
        match self.phase {
            IndicatorPhase::Done => return false,
            IndicatorPhase::Loading => {
                self.shown_for += dt;
                self.smoother.advance(dt);
                if self.is_ready() {
                    tracing::debug!(shown_ms = self.shown_for.as_millis() as u64, "indicator exiting");
                    self.phase = IndicatorPhase::Exiting {
                        remaining: self.opts.exit_delay,
                    };
                }
            }
            IndicatorPhase::Exiting { remaining } => {
                self.shown_for += dt;
                self.smoother.advance(dt);
                self.phase = IndicatorPhase::Exiting {
                    remaining: remaining.saturating_sub(dt),
                };
            }
        }

        if let IndicatorPhase::Exiting { remaining } = self.phase
            && remaining.is_zero()
        {
            self.phase = IndicatorPhase::Done;
            return true;
        }
        false
    }

    fn is_ready(&self) -> bool {
        self.loaded
            && self.shown_for >= self.opts.min_display
            && self.smoother.smoothed() >= self.opts.ready_percent
    }
}

#[cfg(test)]
#[path = "../../tests/unit/indicator/loading.rs"]
mod tests;
