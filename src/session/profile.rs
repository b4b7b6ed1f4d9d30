use std::time::Duration;

use crate::foundation::core::Viewport;
use crate::playback::mapping::Addressing;

/// Viewports narrower than this use [`DeviceProfile::Reduced`].
pub const REDUCED_BELOW_WIDTH: f64 = 768.0;

/// Device pixel ratio ceiling on reduced devices.
pub const REDUCED_MAX_DPR: f64 = 1.5;

/// Quality tier picked from the viewport width.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeviceProfile {
    /// Every frame, native pixel density.
    Full,
    /// Half the frames, capped pixel density, shorter scrub lag.
    Reduced,
}

impl DeviceProfile {
    /// Profile for a viewport.
    pub fn for_viewport(viewport: Viewport) -> Self {
        Self::for_width(viewport.width)
    }

    /// Profile for a layout width.
    pub fn for_width(width: f64) -> Self {
        if width < REDUCED_BELOW_WIDTH {
            Self::Reduced
        } else {
            Self::Full
        }
    }

    /// How timeline frames address the loaded set.
    pub fn addressing(self) -> Addressing {
        match self {
            Self::Full => Addressing::Full,
            Self::Reduced => Addressing::Half,
        }
    }

    /// Load stride given the configured (full-device) stride.
    pub fn stride(self, configured: u32) -> u32 {
        match self {
            Self::Full => configured,
            Self::Reduced => configured.saturating_mul(2),
        }
    }

    /// Pixel ratio actually used for the surface.
    pub fn effective_dpr(self, dpr: f64) -> f64 {
        match self {
            Self::Full => dpr,
            Self::Reduced => dpr.min(REDUCED_MAX_DPR),
        }
    }

    /// Scroll-follow lag.
    pub fn scrub(self) -> Duration {
        match self {
            Self::Full => Duration::from_millis(1200),
            Self::Reduced => Duration::from_millis(800),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/profile.rs"]
mod tests;
