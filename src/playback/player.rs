use std::sync::Arc;

use crate::foundation::core::Canvas;
use crate::foundation::error::{ScrubError, ScrubResult};
use crate::playback::effect::{EffectGate, EffectSink};
use crate::playback::mapping::{Addressing, frame_for_progress, local_index};
use crate::preload::frame_set::FrameSet;
use crate::render::surface::Surface;

/// Lifecycle of a [`Player`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerState {
    /// Waiting for frames.
    Inactive,
    /// Frames attached; scroll updates repaint.
    Active,
    /// Torn down; every call is a no-op.
    Disposed,
}

/// Scroll-derived playback values.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PlaybackState {
    /// Last scroll progress received, clamped to `[0, 1]`.
    pub scroll_progress: f64,
    /// Timeline frame mapped from `scroll_progress`.
    pub current_frame: u32,
    /// Last value propagated to the effect sink.
    pub effect_active: bool,
}

/// Static player parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayerOpts {
    /// Timeline frame reached at progress 1.
    pub last_frame_index: u32,
    /// How timeline frames address the frame set.
    pub addressing: Addressing,
}

impl Default for PlayerOpts {
    fn default() -> Self {
        Self {
            last_frame_index: 240,
            addressing: Addressing::Full,
        }
    }
}

/// What a single scroll update did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickOutcome {
    /// Mapped timeline frame.
    pub frame: u32,
    /// Slot addressed by `frame`; `None` when the guard short-circuited or the set is empty.
    pub local_index: Option<usize>,
    /// Whether the surface was repainted.
    pub repainted: bool,
    /// New effect value, when it changed.
    pub effect_changed: Option<bool>,
}

/// Effect sink that ignores every notification.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoEffect;

impl EffectSink for NoEffect {
    fn set_active(&mut self, _active: bool) {}
}

/// Maps scroll progress to frames and repaints the surface only when the frame changes.
///
/// `last_painted` is the repaint guard. It is set only after a successful draw and cleared on
/// [`Player::resize`], [`Player::attach_surface`], [`Player::set_addressing`], and activation.
#[derive(Debug)]
pub struct Player {
    opts: PlayerOpts,
    state: PlayerState,
    frames: Option<Arc<FrameSet>>,
    surface: Option<Surface>,
    playback: PlaybackState,
    gate: EffectGate,
    last_painted: Option<u32>,
    paints: u64,
}

impl Player {
    /// Inactive player without a surface.
    pub fn new(opts: PlayerOpts) -> Self {
        Self {
            opts,
            state: PlayerState::Inactive,
            frames: None,
            surface: None,
            playback: PlaybackState::default(),
            gate: EffectGate::default(),
            last_painted: None,
            paints: 0,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> PlayerState {
        self.state
    }

    /// Playback values as of the last update.
    pub fn playback(&self) -> PlaybackState {
        self.playback
    }

    /// Timeline frame currently on the surface, if any.
    pub fn last_painted(&self) -> Option<u32> {
        self.last_painted
    }

    /// Successful draws since construction.
    pub fn paint_count(&self) -> u64 {
        self.paints
    }

    /// Player parameters.
    pub fn opts(&self) -> PlayerOpts {
        self.opts
    }

    /// Attached surface, if any.
    pub fn surface(&self) -> Option<&Surface> {
        self.surface.as_ref()
    }

    /// Attach the drawing surface. Any previous paint is considered stale.
    pub fn attach_surface(&mut self, surface: Surface) {
        self.surface = Some(surface);
        self.last_painted = None;
    }

    /// Detach and return the surface; draws become no-ops.
    pub fn detach_surface(&mut self) -> Option<Surface> {
        self.surface.take()
    }

    /// Switch between full and half-density addressing.
    pub fn set_addressing(&mut self, addressing: Addressing) {
        if self.opts.addressing != addressing {
            self.opts.addressing = addressing;
            self.last_painted = None;
        }
    }

    /// Attach loaded frames and paint slot 0. Allowed only from [`PlayerState::Inactive`].
    ///
    /// Returns whether the initial frame was painted.
    #[tracing::instrument(skip(self, frames), fields(slots = frames.len()))]
    pub fn activate(&mut self, frames: Arc<FrameSet>) -> ScrubResult<bool> {
        match self.state {
            PlayerState::Inactive => {}
            PlayerState::Active => {
                return Err(ScrubError::playback("player is already active"));
            }
            PlayerState::Disposed => {
                return Err(ScrubError::playback("player has been disposed"));
            }
        }

        self.frames = Some(frames);
        self.state = PlayerState::Active;
        self.playback = PlaybackState::default();
        self.gate.reset();
        self.last_painted = None;

        let painted = self.paint(0);
        if painted {
            self.last_painted = Some(0);
        }
        tracing::debug!(painted, "player activated");
        Ok(painted)
    }

    /// Apply a scroll-progress update. Returns `None` unless active.
    ///
    /// O(1) apart from the pixel copy of an actual repaint; nothing is scheduled or allocated.
    pub fn update(&mut self, progress: f64, effect: &mut dyn EffectSink) -> Option<TickOutcome> {
        if self.state != PlayerState::Active {
            return None;
        }

        let frame = frame_for_progress(progress, self.opts.last_frame_index);
        self.playback.scroll_progress = if progress.is_finite() {
            progress.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.playback.current_frame = frame;

        if self.last_painted == Some(frame) {
            return Some(TickOutcome {
                frame,
                local_index: None,
                repainted: false,
                effect_changed: None,
            });
        }

        let len = self.frames.as_ref().map_or(0, |f| f.len());
        let local = local_index(frame, self.opts.addressing, len);
        let repainted = local.is_some_and(|i| self.paint(i));
        if repainted {
            self.last_painted = Some(frame);
        }

        let effect_changed = self.gate.update(frame, self.opts.last_frame_index);
        if let Some(active) = effect_changed {
            self.playback.effect_active = active;
            effect.set_active(active);
        }

        Some(TickOutcome {
            frame,
            local_index: local,
            repainted,
            effect_changed,
        })
    }

    /// New surface dimensions after a viewport change. Forces the next update to repaint.
    pub fn resize(&mut self, canvas: Canvas) {
        if let Some(surface) = self.surface.as_mut() {
            surface.resize(canvas);
        }
        self.last_painted = None;
    }

    /// Return an active player to [`PlayerState::Inactive`] so it can be activated with a
    /// different frame set. The surface stays attached and keeps its pixels.
    pub fn deactivate(&mut self, effect: &mut dyn EffectSink) {
        if self.state != PlayerState::Active {
            return;
        }
        if self.gate.is_active() {
            effect.set_active(false);
        }
        self.gate.reset();
        self.playback = PlaybackState::default();
        self.frames = None;
        self.last_painted = None;
        self.state = PlayerState::Inactive;
    }

    /// Tear down: frames are released and the effect is switched off if it was on.
    pub fn dispose(&mut self, effect: &mut dyn EffectSink) {
        if self.state == PlayerState::Disposed {
            return;
        }
        if self.gate.is_active() {
            effect.set_active(false);
        }
        self.gate.reset();
        self.playback.effect_active = false;
        self.frames = None;
        self.last_painted = None;
        self.state = PlayerState::Disposed;
    }

    fn paint(&mut self, index: usize) -> bool {
        let Some(surface) = self.surface.as_mut() else {
            return false;
        };
        let Some(image) = self.frames.as_ref().and_then(|f| f.get(index)) else {
            return false;
        };
        match surface.draw_cover(image) {
            Ok(_) => {
                self.paints += 1;
                true
            }
            Err(e) => {
                tracing::debug!(index, error = %e, "skipping frame draw");
                false
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/player.rs"]
mod tests;
