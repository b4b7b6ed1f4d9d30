/// Receiver of edge-triggered effect activation.
pub trait EffectSink {
    /// Called only when the gate value changes.
    fn set_active(&mut self, active: bool);
}

impl<F: FnMut(bool)> EffectSink for F {
    fn set_active(&mut self, active: bool) {
        self(active)
    }
}

/// Edge-triggered gate: active while the frame lies in `[1, last_frame_index]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EffectGate {
    active: bool,
}

impl EffectGate {
    /// Level value for `frame`.
    pub fn level(frame: u32, last_frame_index: u32) -> bool {
        frame >= 1 && frame <= last_frame_index
    }

    /// Last propagated value.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Evaluate for `frame`; returns `Some(new)` only when the value changed.
    pub fn update(&mut self, frame: u32, last_frame_index: u32) -> Option<bool> {
        let next = Self::level(frame, last_frame_index);
        if next == self.active {
            return None;
        }
        self.active = next;
        Some(next)
    }

    /// Forget the propagated value without notifying anyone.
    pub(crate) fn reset(&mut self) {
        self.active = false;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/effect.rs"]
mod tests;
