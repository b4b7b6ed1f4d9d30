//! Scroll position to playback progress.

/// Lagged progress follower.
pub mod scrub;
/// Pinned section geometry.
pub mod section;
