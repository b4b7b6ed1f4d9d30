/// How a timeline frame addresses the loaded frame set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Addressing {
    /// One slot per timeline frame.
    #[default]
    Full,
    /// One slot per two timeline frames (reduced devices).
    Half,
}

/// Timeline frame for `progress`: `round(progress * last_frame_index)`, clamped to
/// `[0, last_frame_index]`. Non-finite progress maps to frame 0.
pub fn frame_for_progress(progress: f64, last_frame_index: u32) -> u32 {
    if !progress.is_finite() {
        return 0;
    }
    let last = f64::from(last_frame_index);
    (progress * last).round().clamp(0.0, last) as u32
}

/// Slot in a set of `len` frames addressed by timeline `frame`, or `None` for an empty set.
pub fn local_index(frame: u32, addressing: Addressing, len: usize) -> Option<usize> {
    let max = len.checked_sub(1)?;
    let raw = match addressing {
        Addressing::Full => frame as usize,
        Addressing::Half => (frame / 2) as usize,
    };
    Some(raw.min(max))
}

#[cfg(test)]
#[path = "../../tests/unit/playback/mapping.rs"]
mod tests;
