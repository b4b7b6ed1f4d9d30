use crate::assets::decode::PreparedImage;
use crate::assets::naming::FrameSchedule;
use crate::foundation::error::ScrubResult;
use crate::preload::frame_set::FrameSet;
use crate::preload::progress::{LoadProgress, PreloadEvent};

/// Single-threaded settle bookkeeping behind [`crate::Preloader`].
///
/// Completion order never affects the final state: each slot is settled at most once and every
/// first settle advances the counter by exactly one.
#[derive(Clone, Debug)]
pub struct LoadTracker {
    frames: FrameSet,
    progress: LoadProgress,
}

impl LoadTracker {
    /// Tracker for every slot of `schedule`, all pending.
    pub fn new(schedule: FrameSchedule) -> ScrubResult<Self> {
        Ok(Self {
            frames: FrameSet::pending(schedule),
            progress: LoadProgress::new(schedule.total_to_load())?,
        })
    }

    /// Record the outcome for slot `index`, appending published events to `out`.
    ///
    /// Returns `false` for unknown or already-settled slots (no events).
    pub fn settle(
        &mut self,
        index: usize,
        image: Option<PreparedImage>,
        out: &mut Vec<PreloadEvent>,
    ) -> bool {
        if !self.frames.settle(index, image) {
            return false;
        }
        self.progress.settle(out);
        true
    }

    /// Settle every pending slot as failed.
    pub fn fail_pending(&mut self, out: &mut Vec<PreloadEvent>) {
        for index in self.frames.pending_indices() {
            self.settle(index, None, out);
        }
    }

    /// Current counter.
    pub fn progress(&self) -> LoadProgress {
        self.progress
    }

    /// Frames settled so far.
    pub fn frames(&self) -> &FrameSet {
        &self.frames
    }
}

#[cfg(test)]
#[path = "../../tests/unit/preload/tracker.rs"]
mod tests;
