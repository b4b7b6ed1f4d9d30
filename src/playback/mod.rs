//! Scroll-synchronized frame playback.

/// Edge-triggered effect gate and sink trait.
pub mod effect;
/// Glitch-burst overlay driven by the effect gate.
pub mod glitch;
/// Progress to frame to slot mapping.
pub mod mapping;
/// The player state machine.
pub mod player;
