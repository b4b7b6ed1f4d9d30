//! Frame assets: naming convention, byte sources, and decoding.

/// Image decoding into premultiplied RGBA8.
pub mod decode;
/// Frame file naming and subsampling schedule.
pub mod naming;
/// Byte sources frames are fetched from.
pub mod source;
