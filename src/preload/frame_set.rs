use crate::assets::decode::PreparedImage;
use crate::assets::naming::FrameSchedule;

/// Settle status of one frame.
#[derive(Clone, Debug)]
pub enum FrameSlot {
    /// Request issued, not settled yet.
    Pending,
    /// Decoded and ready to draw.
    Loaded(PreparedImage),
    /// Fetch or decode failed; drawn as "skip".
    Failed,
}

impl FrameSlot {
    /// `true` unless still pending.
    pub fn is_settled(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// Ordered, subsampled frame sequence addressed `0..len()`.
#[derive(Clone, Debug, Default)]
pub struct FrameSet {
    slots: Vec<FrameSlot>,
    frame_numbers: Vec<u32>,
}

impl FrameSet {
    /// All-pending set laid out by `schedule`.
    pub fn pending(schedule: FrameSchedule) -> Self {
        let frame_numbers: Vec<u32> = schedule.frame_numbers().collect();
        Self {
            slots: vec![FrameSlot::Pending; frame_numbers.len()],
            frame_numbers,
        }
    }

    /// Build an already-settled set; `None` entries become failed slots.
    ///
    /// Frame numbers are assigned `1..=len`.
    pub fn from_images(images: Vec<Option<PreparedImage>>) -> Self {
        let frame_numbers = (1..=images.len() as u32).collect();
        let slots = images
            .into_iter()
            .map(|img| img.map_or(FrameSlot::Failed, FrameSlot::Loaded))
            .collect();
        Self {
            slots,
            frame_numbers,
        }
    }

    /// Number of slots (`N`).
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// `true` when the set has no slots.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Drawable image at `index`, or `None` when out of range, pending, or failed.
    pub fn get(&self, index: usize) -> Option<&PreparedImage> {
        match self.slots.get(index)? {
            FrameSlot::Loaded(img) => Some(img),
            FrameSlot::Pending | FrameSlot::Failed => None,
        }
    }

    /// Raw slot at `index`.
    pub fn slot(&self, index: usize) -> Option<&FrameSlot> {
        self.slots.get(index)
    }

    /// 1-based source frame number backing slot `index`.
    pub fn frame_number(&self, index: usize) -> Option<u32> {
        self.frame_numbers.get(index).copied()
    }

    /// Slots holding a decoded image.
    pub fn loaded_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|s| matches!(s, FrameSlot::Loaded(_)))
            .count()
    }

    /// Slots whose request failed.
    pub fn failed_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|s| matches!(s, FrameSlot::Failed))
            .count()
    }

    /// Settle slot `index`. Returns `false` (and changes nothing) if the slot is unknown or
    /// already settled.
    pub(crate) fn settle(&mut self, index: usize, image: Option<PreparedImage>) -> bool {
        let Some(slot) = self.slots.get_mut(index) else {
            return false;
        };
        if slot.is_settled() {
            return false;
        }
        *slot = image.map_or(FrameSlot::Failed, FrameSlot::Loaded);
        true
    }

    /// Indices still pending.
    pub(crate) fn pending_indices(&self) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| !s.is_settled())
            .map(|(i, _)| i)
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/preload/frame_set.rs"]
mod tests;
