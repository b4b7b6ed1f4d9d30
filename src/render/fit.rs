use crate::foundation::core::{Affine, Rect, Size};

/// Placement of an image scaled to fill a target while preserving aspect ratio
/// (CSS `object-fit: cover`). The overflow is split evenly on both sides.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoverFit {
    /// Uniform scale applied to the image.
    pub scale: f64,
    /// Destination rectangle in target space; contains the whole target.
    pub dest: Rect,
}

impl CoverFit {
    /// Compute the placement of `image` inside `target`.
    ///
    /// Returns `None` if either size has a non-positive or non-finite side.
    pub fn compute(image: Size, target: Size) -> Option<Self> {
        let valid = |s: Size| s.width.is_finite() && s.height.is_finite() && s.width > 0.0 && s.height > 0.0;
        if !valid(image) || !valid(target) {
            return None;
        }

        let scale = (target.width / image.width).max(target.height / image.height);
        let w = image.width * scale;
        let h = image.height * scale;
        let x0 = (target.width - w) / 2.0;
        let y0 = (target.height - h) / 2.0;
        Some(Self {
            scale,
            dest: Rect::new(x0, y0, x0 + w, y0 + h),
        })
    }

    /// Image-space to target-space transform.
    pub fn transform(&self) -> Affine {
        Affine::translate((self.dest.x0, self.dest.y0)) * Affine::scale(self.scale)
    }

    /// Map a target-space point back to continuous image coordinates.
    #[inline]
    pub fn to_image(&self, x: f64, y: f64) -> (f64, f64) {
        (
            (x - self.dest.x0) / self.scale,
            (y - self.dest.y0) / self.scale,
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/fit.rs"]
mod tests;
