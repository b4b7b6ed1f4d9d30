//! Loading indicator: smoothed progress and the hand-off to playback.

/// Indicator phases and hand-off rules.
pub mod loading;
/// Fixed-cadence progress smoothing.
pub mod smoothing;
