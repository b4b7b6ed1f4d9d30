use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use crate::assets::naming::{DEFAULT_EXTENSION, DEFAULT_PREFIX, FrameNaming, FrameSchedule};
use crate::foundation::error::{ScrubError, ScrubResult};
use crate::indicator::loading::IndicatorOpts;
use crate::preload::preloader::{PreloadOpts, PreloadRequest};
use crate::scroll::section::PinnedSection;

/// Everything needed to mount a scroll sequence, as read from JSON.
///
/// Only `base_path` is required:
///
/// ```json
/// { "base_path": "/im", "frame_count": 240 }
/// ```
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SequenceConfig {
    /// Request path of the frame directory.
    pub base_path: String,
    /// Frame file prefix.
    #[serde(default = "default_prefix")]
    pub prefix: String,
    /// Frame file extension, without the dot.
    #[serde(default = "default_extension")]
    pub extension: String,
    /// Source frames on disk.
    #[serde(default = "default_frame_count")]
    pub frame_count: u32,
    /// Load every `stride`-th frame on full devices (doubled on reduced ones).
    #[serde(default = "default_stride")]
    pub stride: u32,
    /// Timeline frame reached at the end of the section.
    #[serde(default = "default_last_frame_index")]
    pub last_frame_index: u32,
    /// Scroll length per source frame, in layout pixels.
    #[serde(default = "default_px_per_frame")]
    pub px_per_frame: f64,
    /// Document offset of the pinned section.
    #[serde(default)]
    pub section_top: f64,
    /// Minimum time the loading indicator stays up.
    #[serde(default = "default_min_display_ms")]
    pub min_display_ms: u64,
    /// Indicator exit transition length.
    #[serde(default = "default_exit_delay_ms")]
    pub exit_delay_ms: u64,
    /// Preload worker threads; rayon's default when absent.
    #[serde(default)]
    pub threads: Option<usize>,
    /// Reduced devices skip the indicator's progress phase (it shows 100% at once).
    #[serde(default)]
    pub reduced_instant_indicator: bool,
}

fn default_prefix() -> String {
    DEFAULT_PREFIX.to_owned()
}

fn default_extension() -> String {
    DEFAULT_EXTENSION.to_owned()
}

fn default_frame_count() -> u32 {
    240
}

fn default_stride() -> u32 {
    1
}

fn default_last_frame_index() -> u32 {
    240
}

fn default_px_per_frame() -> f64 {
    15.0
}

fn default_min_display_ms() -> u64 {
    3500
}

fn default_exit_delay_ms() -> u64 {
    800
}

impl SequenceConfig {
    /// Defaults for everything but the frame directory.
    pub fn new(base_path: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
            prefix: default_prefix(),
            extension: default_extension(),
            frame_count: default_frame_count(),
            stride: default_stride(),
            last_frame_index: default_last_frame_index(),
            px_per_frame: default_px_per_frame(),
            section_top: 0.0,
            min_display_ms: default_min_display_ms(),
            exit_delay_ms: default_exit_delay_ms(),
            threads: None,
            reduced_instant_indicator: false,
        }
    }

    /// Parse a config from JSON.
    pub fn from_reader<R: std::io::Read>(r: R) -> ScrubResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| ScrubError::serde(format!("parse sequence config JSON: {e}")))
    }

    /// Parse a config from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ScrubResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ScrubError::validation(format!("open sequence config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check ranges that serde cannot express.
    pub fn validate(&self) -> ScrubResult<()> {
        FrameSchedule::new(self.frame_count, self.stride)?;
        if self.prefix.is_empty() || self.extension.is_empty() {
            return Err(ScrubError::validation(
                "prefix and extension must not be empty",
            ));
        }
        if !self.px_per_frame.is_finite() || self.px_per_frame <= 0.0 {
            return Err(ScrubError::validation(format!(
                "px_per_frame must be finite and > 0, got {}",
                self.px_per_frame
            )));
        }
        if !self.section_top.is_finite() {
            return Err(ScrubError::validation("section_top must be finite"));
        }
        if self.threads == Some(0) {
            return Err(ScrubError::validation("threads must be >= 1 when set"));
        }
        Ok(())
    }

    /// File naming for the frames.
    pub fn naming(&self) -> FrameNaming {
        FrameNaming {
            prefix: self.prefix.clone(),
            extension: self.extension.clone(),
        }
    }

    /// Preload request at `stride` (which may differ from the configured one per device).
    pub fn preload_request(&self, stride: u32) -> ScrubResult<PreloadRequest> {
        Ok(PreloadRequest {
            base_path: self.base_path.clone(),
            naming: self.naming(),
            schedule: FrameSchedule::new(self.frame_count, stride)?,
        })
    }

    /// Worker pool settings.
    pub fn preload_opts(&self) -> PreloadOpts {
        PreloadOpts {
            threads: self.threads,
        }
    }

    /// Indicator timing.
    pub fn indicator_opts(&self) -> IndicatorOpts {
        IndicatorOpts {
            min_display: Duration::from_millis(self.min_display_ms),
            exit_delay: Duration::from_millis(self.exit_delay_ms),
            ..IndicatorOpts::default()
        }
    }

    /// The pinned section: `frame_count * px_per_frame` tall.
    pub fn section(&self) -> ScrubResult<PinnedSection> {
        PinnedSection::for_frames(self.section_top, self.frame_count, self.px_per_frame)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/config.rs"]
mod tests;
