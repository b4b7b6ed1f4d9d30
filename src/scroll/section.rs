use crate::foundation::error::{ScrubError, ScrubResult};

/// Scroll-space extent of the pinned section driving playback.
///
/// Progress runs from 0 when the section top reaches the viewport top to 1 when the section
/// bottom reaches the viewport bottom.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PinnedSection {
    /// Document offset of the section top.
    pub top: f64,
    /// Section height in layout pixels.
    pub height: f64,
}

impl PinnedSection {
    /// Validated section; `height` must be finite and `> 0`, `top` finite.
    pub fn new(top: f64, height: f64) -> ScrubResult<Self> {
        if !top.is_finite() || !height.is_finite() || height <= 0.0 {
            return Err(ScrubError::validation(format!(
                "pinned section must have finite top and height > 0, got top={top} height={height}"
            )));
        }
        Ok(Self { top, height })
    }

    /// Section sized at `px_per_frame` layout pixels per source frame.
    pub fn for_frames(top: f64, frame_count: u32, px_per_frame: f64) -> ScrubResult<Self> {
        Self::new(top, f64::from(frame_count) * px_per_frame)
    }

    /// Scroll distance over which progress goes from 0 to 1.
    pub fn scroll_span(&self, viewport_height: f64) -> f64 {
        self.height - viewport_height
    }

    /// Progress in `[0, 1]` for a document scroll offset.
    pub fn progress(&self, scroll_y: f64, viewport_height: f64) -> f64 {
        if !scroll_y.is_finite() {
            return 0.0;
        }
        let span = self.scroll_span(viewport_height);
        let offset = scroll_y - self.top;
        if span <= 0.0 {
            return if offset < 0.0 { 0.0 } else { 1.0 };
        }
        (offset / span).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/section.rs"]
mod tests;
