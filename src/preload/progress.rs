use crate::foundation::error::{ScrubError, ScrubResult};

/// Aggregate settle counter for one preload.
///
/// `loaded_count` counts *settled* requests: successes and failures both advance it. Once
/// `loaded_count == total` the value is frozen and `is_complete` stays `true`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadProgress {
    loaded_count: u32,
    total: u32,
    is_complete: bool,
}

/// Notification published by the preloader.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PreloadEvent {
    /// One more request settled.
    Progress {
        /// Settled requests so far.
        loaded: u32,
        /// Requests issued.
        total: u32,
        /// `loaded / total * 100`, in `[0, 100]`.
        percent: f64,
    },
    /// Every request settled. Published exactly once, after the final `Progress`.
    Complete,
}

impl LoadProgress {
    /// Fresh counter for `total` requests (`total >= 1`).
    pub fn new(total: u32) -> ScrubResult<Self> {
        if total == 0 {
            return Err(ScrubError::validation("preload total must be >= 1"));
        }
        Ok(Self {
            loaded_count: 0,
            total,
            is_complete: false,
        })
    }

    /// Settled request count.
    pub fn loaded_count(&self) -> u32 {
        self.loaded_count
    }

    /// Issued request count.
    pub fn total(&self) -> u32 {
        self.total
    }

    /// `true` once every request has settled.
    pub fn is_complete(&self) -> bool {
        self.is_complete
    }

    /// Settled share as a percentage in `[0, 100]`.
    pub fn percent(&self) -> f64 {
        f64::from(self.loaded_count) / f64::from(self.total) * 100.0
    }

    /// Count one settle and append the resulting events to `out`.
    ///
    /// No-op once complete.
    pub(crate) fn settle(&mut self, out: &mut Vec<PreloadEvent>) {
        if self.is_complete {
            return;
        }
        self.loaded_count += 1;
        out.push(PreloadEvent::Progress {
            loaded: self.loaded_count,
            total: self.total,
            percent: self.percent(),
        });
        if self.loaded_count == self.total {
            self.is_complete = true;
            out.push(PreloadEvent::Complete);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/preload/progress.rs"]
mod tests;
