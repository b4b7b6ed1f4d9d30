/// Result alias used throughout the crate.
pub type ScrubResult<T> = Result<T, ScrubError>;

/// Error type shared by every framescrub module.
///
/// Load failures of individual frames are *not* reported through this type: they are absorbed
/// into the frame set as failed slots. Errors here are configuration or programming mistakes.
#[derive(thiserror::Error, Debug)]
pub enum ScrubError {
    /// Invalid input (zero frame count, zero stride, bad viewport, ...).
    #[error("validation error: {0}")]
    Validation(String),

    /// An asset could not be read or decoded.
    #[error("asset error: {0}")]
    Asset(String),

    /// A player operation was requested in a state that does not allow it.
    #[error("playback error: {0}")]
    Playback(String),

    /// Configuration (de)serialization failed.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Anything else, with its source chain preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ScrubError {
    /// Build a [`ScrubError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ScrubError::Asset`].
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`ScrubError::Playback`].
    pub fn playback(msg: impl Into<String>) -> Self {
        Self::Playback(msg.into())
    }

    /// Build a [`ScrubError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
