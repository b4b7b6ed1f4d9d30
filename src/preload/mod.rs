//! Concurrent frame preloading with monotonic settle progress.

/// Settled/pending frame storage.
pub mod frame_set;
/// Threaded preloader.
pub mod preloader;
/// Settle counter and published events.
pub mod progress;
/// Order-independent settle bookkeeping.
pub mod tracker;
