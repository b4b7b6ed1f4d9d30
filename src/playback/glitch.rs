use std::time::Duration;

use crate::foundation::math::Rng64;
use crate::playback::effect::EffectSink;

/// Timing of the glitch overlay.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlitchOpts {
    /// Shortest wait between bursts.
    pub min_delay: Duration,
    /// Longest wait between bursts.
    pub max_delay: Duration,
    /// How long one burst keeps the overlay visible.
    pub burst_len: Duration,
}

impl Default for GlitchOpts {
    fn default() -> Self {
        Self {
            min_delay: Duration::from_millis(400),
            max_delay: Duration::from_millis(2500),
            burst_len: Duration::from_millis(250),
        }
    }
}

/// Randomly timed glitch bursts, armed while the effect gate is active.
///
/// Arming schedules the first burst; every burst schedules the next one. Disarming cancels the
/// pending burst and hides the overlay at once. Time only moves through [`GlitchBursts::advance`].
#[derive(Clone, Debug)]
pub struct GlitchBursts {
    opts: GlitchOpts,
    rng: Rng64,
    armed: bool,
    until_next: Duration,
    burst_left: Duration,
    bursts: u64,
}

impl GlitchBursts {
    /// Disarmed overlay with default timing.
    pub fn new(seed: u64) -> Self {
        Self::with_opts(seed, GlitchOpts::default())
    }

    /// Disarmed overlay with custom timing. `max_delay` below `min_delay` is treated as equal.
    pub fn with_opts(seed: u64, opts: GlitchOpts) -> Self {
        Self {
            opts,
            rng: Rng64::new(seed),
            armed: false,
            until_next: Duration::ZERO,
            burst_left: Duration::ZERO,
            bursts: 0,
        }
    }

    /// `true` while bursts are scheduled.
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// `true` while a burst is on screen.
    pub fn is_visible(&self) -> bool {
        self.burst_left > Duration::ZERO
    }

    /// Bursts started since construction.
    pub fn burst_count(&self) -> u64 {
        self.bursts
    }

    /// Move time forward by `dt`; returns how many bursts started.
    pub fn advance(&mut self, dt: Duration) -> u32 {
        if !self.armed {
            return 0;
        }
        let mut started = 0;
        let mut remaining = dt;
        while remaining >= self.until_next {
            remaining -= self.until_next;
            self.burst_left = self.opts.burst_len;
            self.bursts += 1;
            started += 1;
            self.until_next = self.next_delay();
        }
        self.until_next -= remaining;
        self.burst_left = self.burst_left.saturating_sub(remaining);
        started
    }

    fn next_delay(&mut self) -> Duration {
        let min = self.opts.min_delay.as_secs_f64();
        let max = self.opts.max_delay.as_secs_f64().max(min);
        // A zero delay would never let `advance` finish.
        Duration::from_secs_f64(self.rng.range_f64(min, max)).max(Duration::from_millis(1))
    }
}

impl EffectSink for GlitchBursts {
    fn set_active(&mut self, active: bool) {
        if active {
            if !self.armed {
                self.armed = true;
                self.until_next = self.next_delay();
            }
        } else {
            self.armed = false;
            self.burst_left = Duration::ZERO;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/glitch.rs"]
mod tests;
