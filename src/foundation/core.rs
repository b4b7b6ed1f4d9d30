use crate::foundation::error::{ScrubError, ScrubResult};

pub use kurbo::{Affine, Rect, Size};

/// Layout-space viewport size (CSS pixels, before device pixel ratio).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Width in layout pixels.
    pub width: f64,
    /// Height in layout pixels.
    pub height: f64,
}

impl Viewport {
    /// Create a validated viewport; both sides must be finite and `> 0`.
    pub fn new(width: f64, height: f64) -> ScrubResult<Self> {
        if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
            return Err(ScrubError::validation(format!(
                "viewport must be finite and > 0, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    /// Viewport size as a [`Size`].
    pub fn size(self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Drawing surface dimensions in device pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Backing-store size for `viewport` at `dpr`.
    ///
    /// Fractional device pixels are truncated, matching how a canvas backing store assigns
    /// `innerWidth * devicePixelRatio` to an integer attribute. Each side is at least one pixel.
    pub fn for_viewport(viewport: Viewport, dpr: f64) -> ScrubResult<Self> {
        if !dpr.is_finite() || dpr <= 0.0 {
            return Err(ScrubError::validation(format!(
                "device pixel ratio must be finite and > 0, got {dpr}"
            )));
        }
        let width = ((viewport.width * dpr) as u32).max(1);
        let height = ((viewport.height * dpr) as u32).max(1);
        Ok(Self { width, height })
    }

    /// Number of pixels on the surface.
    pub fn pixel_count(self) -> usize {
        (self.width as usize).saturating_mul(self.height as usize)
    }

    /// Surface size as a [`Size`].
    pub fn size(self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
