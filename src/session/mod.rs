//! Mounted scroll sequence: configuration, device profile, and orchestration.

/// JSON configuration.
pub mod config;
/// Viewport-derived quality tier.
pub mod profile;
/// Mount/advance/scroll/resize/unmount orchestration.
pub mod sequence;
