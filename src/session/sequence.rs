use std::sync::Arc;
use std::time::Duration;

use crate::assets::source::FrameSource;
use crate::foundation::core::{Canvas, Viewport};
use crate::foundation::error::{ScrubError, ScrubResult};
use crate::indicator::loading::LoadingIndicator;
use crate::playback::glitch::GlitchBursts;
use crate::playback::player::{Player, PlayerOpts, PlayerState, TickOutcome};
use crate::preload::preloader::Preloader;
use crate::preload::progress::PreloadEvent;
use crate::render::surface::{BLACK, Surface};
use crate::scroll::scrub::ScrubFollower;
use crate::scroll::section::PinnedSection;
use crate::session::config::SequenceConfig;
use crate::session::profile::DeviceProfile;

const GLITCH_SEED: u64 = 0x0F2A_3C4D_5E6F_7081;

/// What one [`ScrollSequence::advance`] call did.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SequenceTick {
    /// Preload notifications drained during this call.
    pub preload_events: Vec<PreloadEvent>,
    /// The loading indicator finished during this call.
    pub indicator_done: bool,
    /// The player was activated during this call.
    pub activated: bool,
    /// Player update driven by the scrub follower, when active.
    pub playback: Option<TickOutcome>,
    /// Glitch bursts started during this call.
    pub bursts_started: u32,
}

/// A mounted scroll-synced frame sequence.
///
/// Owns the whole pipeline: preload, loading indicator, scroll tracking, and playback. Time is
/// driven explicitly through [`ScrollSequence::advance`]; scroll and resize notifications arrive
/// through [`ScrollSequence::on_scroll`] and [`ScrollSequence::on_resize`].
pub struct ScrollSequence {
    config: SequenceConfig,
    source: Arc<dyn FrameSource>,
    profile: DeviceProfile,
    viewport: Viewport,
    dpr: f64,
    section: PinnedSection,
    scroll_y: f64,
    preloader: Option<Preloader>,
    indicator: LoadingIndicator,
    follower: ScrubFollower,
    player: Player,
    glitch: GlitchBursts,
}

impl std::fmt::Debug for ScrollSequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollSequence")
            .field("profile", &self.profile)
            .field("viewport", &self.viewport)
            .field("dpr", &self.dpr)
            .field("preloader", &self.preloader)
            .field("indicator", &self.indicator.phase())
            .field("player", &self.player.state())
            .finish_non_exhaustive()
    }
}

impl ScrollSequence {
    /// Validate `config`, start preloading, and show the loading indicator.
    #[tracing::instrument(skip(config, source), fields(base = %config.base_path))]
    pub fn mount(
        config: SequenceConfig,
        source: Arc<dyn FrameSource>,
        viewport: Viewport,
        dpr: f64,
    ) -> ScrubResult<Self> {
        config.validate()?;
        let profile = DeviceProfile::for_viewport(viewport);
        let canvas = Canvas::for_viewport(viewport, profile.effective_dpr(dpr))?;
        let section = config.section()?;

        let preloader = Preloader::start(
            config.preload_request(profile.stride(config.stride))?,
            Arc::clone(&source),
            config.preload_opts(),
        )?;

        let mut indicator = LoadingIndicator::new(config.indicator_opts());
        if profile == DeviceProfile::Reduced && config.reduced_instant_indicator {
            indicator.set_progress(100.0);
            indicator.mark_loaded();
        }

        let mut player = Player::new(PlayerOpts {
            last_frame_index: config.last_frame_index,
            addressing: profile.addressing(),
        });
        player.attach_surface(Surface::new(canvas, BLACK));

        tracing::info!(?profile, width = canvas.width, height = canvas.height, "sequence mounted");
        Ok(Self {
            config,
            source,
            profile,
            viewport,
            dpr,
            section,
            scroll_y: 0.0,
            preloader: Some(preloader),
            indicator,
            follower: ScrubFollower::new(profile.scrub()),
            player,
            glitch: GlitchBursts::new(GLITCH_SEED),
        })
    }

    /// Move time forward by `elapsed`.
    pub fn advance(&mut self, elapsed: Duration) -> ScrubResult<SequenceTick> {
        let mut tick = SequenceTick::default();
        let Some(preloader) = self.preloader.as_mut() else {
            return Ok(tick);
        };

        tick.preload_events = preloader.poll();
        let instant =
            self.profile == DeviceProfile::Reduced && self.config.reduced_instant_indicator;
        for event in &tick.preload_events {
            match *event {
                PreloadEvent::Progress { percent, .. } if !instant => {
                    self.indicator.set_progress(percent)
                }
                PreloadEvent::Progress { .. } => {}
                PreloadEvent::Complete => self.indicator.mark_loaded(),
            }
        }

        tick.indicator_done = self.indicator.advance(elapsed);

        if self.indicator.is_done()
            && self.player.state() == PlayerState::Inactive
            && let Some(frames) = preloader.frames()
        {
            self.player.activate(frames)?;
            tick.activated = true;
        }

        self.follower.advance(elapsed);
        tick.playback = self.player.update(self.follower.value(), &mut self.glitch);
        tick.bursts_started = self.glitch.advance(elapsed);
        Ok(tick)
    }

    /// New document scroll offset.
    pub fn on_scroll(&mut self, scroll_y: f64) -> Option<TickOutcome> {
        if self.preloader.is_none() {
            return None;
        }
        self.scroll_y = scroll_y;
        self.retarget();
        self.player.update(self.follower.value(), &mut self.glitch)
    }

    /// New viewport size or pixel ratio.
    ///
    /// The surface is resized and repainted. Crossing the device-profile boundary switches the
    /// addressing mode; when the load stride changes too, the frames are reloaded and the
    /// player waits inactive until they arrive.
    pub fn on_resize(&mut self, viewport: Viewport, dpr: f64) -> ScrubResult<Option<TickOutcome>> {
        if self.preloader.is_none() {
            return Err(ScrubError::playback("sequence has been unmounted"));
        }
        let profile = DeviceProfile::for_viewport(viewport);
        let canvas = Canvas::for_viewport(viewport, profile.effective_dpr(dpr))?;
        if profile != self.profile {
            self.switch_profile(profile)?;
        }

        self.viewport = viewport;
        self.dpr = dpr;
        self.player.resize(canvas);
        self.retarget();
        Ok(self.player.update(self.follower.value(), &mut self.glitch))
    }

    /// Tear everything down: the player is disposed, pending loads are cancelled, and the frame
    /// set is released. Later calls are no-ops.
    pub fn unmount(&mut self) {
        let Some(preloader) = self.preloader.take() else {
            return;
        };
        preloader.cancel();
        self.player.dispose(&mut self.glitch);
        drop(preloader);
        tracing::info!("sequence unmounted");
    }

    /// `false` after [`ScrollSequence::unmount`].
    pub fn is_mounted(&self) -> bool {
        self.preloader.is_some()
    }

    /// Active device profile.
    pub fn profile(&self) -> DeviceProfile {
        self.profile
    }

    /// Current viewport.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Pixel ratio as reported (before the reduced-profile cap).
    pub fn dpr(&self) -> f64 {
        self.dpr
    }

    /// Configuration the sequence was mounted with.
    pub fn config(&self) -> &SequenceConfig {
        &self.config
    }

    /// Pinned section geometry.
    pub fn section(&self) -> PinnedSection {
        self.section
    }

    /// Running preloader, if mounted.
    pub fn preloader(&self) -> Option<&Preloader> {
        self.preloader.as_ref()
    }

    /// Loading indicator state.
    pub fn indicator(&self) -> &LoadingIndicator {
        &self.indicator
    }

    /// The player.
    pub fn player(&self) -> &Player {
        &self.player
    }

    /// Glitch overlay driven by the effect gate.
    pub fn glitch(&self) -> &GlitchBursts {
        &self.glitch
    }

    /// Scroll progress the player is following (after scrub lag).
    pub fn scroll_progress(&self) -> f64 {
        self.follower.value()
    }

    /// Scroll progress derived from the latest scroll offset.
    pub fn target_progress(&self) -> f64 {
        self.follower.target()
    }

    fn retarget(&mut self) {
        let progress = self.section.progress(self.scroll_y, self.viewport.height);
        self.follower.set_target(progress);
    }

    fn switch_profile(&mut self, profile: DeviceProfile) -> ScrubResult<()> {
        let stride = profile.stride(self.config.stride);
        let loaded_stride = self
            .preloader
            .as_ref()
            .map(|p| p.request().schedule.stride());
        // State is committed only once the reload has started.
        let reload = if loaded_stride == Some(stride) {
            None
        } else {
            Some(Preloader::start(
                self.config.preload_request(stride)?,
                Arc::clone(&self.source),
                self.config.preload_opts(),
            )?)
        };

        tracing::info!(
            from = ?self.profile,
            to = ?profile,
            reload = reload.is_some(),
            "device profile changed"
        );
        self.profile = profile;
        self.follower.set_scrub(profile.scrub());
        self.player.set_addressing(profile.addressing());
        if let Some(preloader) = reload {
            self.player.deactivate(&mut self.glitch);
            // The previous preloader is cancelled on drop.
            self.preloader = Some(preloader);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/sequence.rs"]
mod tests;
