//! framescrub plays an image sequence in lockstep with scroll position.
//!
//! A subsampled set of frames is preloaded concurrently while a loading indicator smooths the
//! aggregate progress. Once loading finishes and the indicator has exited, a [`Player`] maps scroll
//! progress to a frame and repaints a CPU [`Surface`] only when that frame changes.
//!
//! - Load a [`SequenceConfig`] and [`ScrollSequence::mount`] it over a [`FrameSource`]
//! - Drive time with [`ScrollSequence::advance`]
//! - Feed [`ScrollSequence::on_scroll`] and [`ScrollSequence::on_resize`]
//!
//! The pieces are usable on their own: [`Preloader`] for loading, [`LoadingIndicator`] for the
//! progress hand-off, and [`Player`] for progress-to-frame playback.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Frame naming, byte sources, and decoding.
pub mod assets;
/// Loading indicator.
pub mod indicator;
/// Frame playback.
pub mod playback;
/// Concurrent preloading.
pub mod preload;
/// CPU drawing surface.
pub mod render;
/// Scroll tracking.
pub mod scroll;
/// Mounted sequence orchestration.
pub mod session;

pub use crate::foundation::core::{Affine, Canvas, Rect, Size, Viewport};
pub use crate::foundation::error::{ScrubError, ScrubResult};

pub use crate::assets::decode::{PreparedImage, decode_image};
pub use crate::assets::naming::{FrameNaming, FrameSchedule};
pub use crate::assets::source::{DirSource, FrameSource, MemorySource};
pub use crate::indicator::loading::{IndicatorOpts, IndicatorPhase, LoadingIndicator};
pub use crate::indicator::smoothing::ProgressSmoother;
pub use crate::playback::effect::{EffectGate, EffectSink};
pub use crate::playback::glitch::{GlitchBursts, GlitchOpts};
pub use crate::playback::mapping::{Addressing, frame_for_progress, local_index};
pub use crate::playback::player::{
    NoEffect, PlaybackState, Player, PlayerOpts, PlayerState, TickOutcome,
};
pub use crate::preload::frame_set::{FrameSet, FrameSlot};
pub use crate::preload::preloader::{PreloadOpts, PreloadRequest, Preloader};
pub use crate::preload::progress::{LoadProgress, PreloadEvent};
pub use crate::render::fit::CoverFit;
pub use crate::render::surface::{BLACK, FrameRGBA, Surface};
pub use crate::scroll::scrub::ScrubFollower;
pub use crate::scroll::section::PinnedSection;
pub use crate::session::config::SequenceConfig;
pub use crate::session::profile::DeviceProfile;
pub use crate::session::sequence::{ScrollSequence, SequenceTick};
