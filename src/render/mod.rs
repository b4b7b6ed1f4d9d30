//! CPU drawing surface and cover-fit placement.

/// `object-fit: cover` placement math.
pub mod fit;
/// Premultiplied RGBA8 surface.
pub mod surface;
