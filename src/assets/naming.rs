use crate::foundation::error::{ScrubError, ScrubResult};

/// Default frame file prefix, as exported by the sequence tooling (`ezgif-frame-001.jpg`).
pub const DEFAULT_PREFIX: &str = "ezgif-frame";
/// Default frame file extension.
pub const DEFAULT_EXTENSION: &str = "jpg";

/// File naming convention for a frame sequence: `{prefix}-{NNN}.{extension}`.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameNaming {
    /// File name prefix before the dash.
    pub prefix: String,
    /// Extension without the leading dot.
    pub extension: String,
}

impl Default for FrameNaming {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_owned(),
            extension: DEFAULT_EXTENSION.to_owned(),
        }
    }
}

impl FrameNaming {
    /// File name for 1-based `frame_number`, zero-padded to three digits.
    pub fn file_name(&self, frame_number: u32) -> String {
        format!("{}-{:03}.{}", self.prefix, frame_number, self.extension)
    }

    /// Request path for `frame_number` under `base_path`.
    pub fn frame_path(&self, base_path: &str, frame_number: u32) -> String {
        let base = base_path.trim_end_matches(['/', '\\']);
        if base.is_empty() {
            self.file_name(frame_number)
        } else {
            format!("{base}/{}", self.file_name(frame_number))
        }
    }
}

/// Which source frames get loaded: `1..=frame_count` stepping by `stride`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameSchedule {
    frame_count: u32,
    stride: u32,
}

impl FrameSchedule {
    /// Create a schedule. Both `frame_count` and `stride` must be `>= 1`.
    pub fn new(frame_count: u32, stride: u32) -> ScrubResult<Self> {
        if frame_count == 0 {
            return Err(ScrubError::validation("frame_count must be >= 1"));
        }
        if stride == 0 {
            return Err(ScrubError::validation("stride must be >= 1"));
        }
        Ok(Self {
            frame_count,
            stride,
        })
    }

    /// Source frame count before subsampling.
    pub fn frame_count(self) -> u32 {
        self.frame_count
    }

    /// Step between loaded source frames.
    pub fn stride(self) -> u32 {
        self.stride
    }

    /// Number of requests issued: `ceil(frame_count / stride)`.
    pub fn total_to_load(self) -> u32 {
        self.frame_count.div_ceil(self.stride)
    }

    /// 1-based source frame numbers in slot order.
    pub fn frame_numbers(self) -> impl Iterator<Item = u32> {
        (1..=self.frame_count).step_by(self.stride as usize)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/naming.rs"]
mod tests;
