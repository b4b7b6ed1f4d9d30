use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, mpsc};

use crate::assets::decode::{PreparedImage, decode_image};
use crate::assets::naming::{FrameNaming, FrameSchedule};
use crate::assets::source::FrameSource;
use crate::foundation::error::{ScrubError, ScrubResult};
use crate::preload::frame_set::FrameSet;
use crate::preload::progress::{LoadProgress, PreloadEvent};
use crate::preload::tracker::LoadTracker;

/// What to preload.
#[derive(Clone, Debug)]
pub struct PreloadRequest {
    /// Directory (request path) holding the frames, e.g. `/im`.
    pub base_path: String,
    /// File naming convention.
    pub naming: FrameNaming,
    /// Which frames to fetch.
    pub schedule: FrameSchedule,
}

impl PreloadRequest {
    /// Request with the default naming convention.
    pub fn new(base_path: impl Into<String>, frame_count: u32, stride: u32) -> ScrubResult<Self> {
        Ok(Self {
            base_path: base_path.into(),
            naming: FrameNaming::default(),
            schedule: FrameSchedule::new(frame_count, stride)?,
        })
    }
}

/// Worker pool controls.
#[derive(Clone, Copy, Debug, Default)]
pub struct PreloadOpts {
    /// Explicit worker thread count; `None` uses rayon's default.
    pub threads: Option<usize>,
}

struct Settled {
    index: usize,
    path: String,
    outcome: ScrubResult<PreparedImage>,
}

/// Concurrent frame preloader.
///
/// Every request runs on a worker thread and reports back over a channel. Settle events are
/// applied on the thread that owns the `Preloader`, via [`Preloader::poll`] or
/// [`Preloader::wait`]; there is no shared mutable state besides the cancel flag.
pub struct Preloader {
    request: PreloadRequest,
    tracker: LoadTracker,
    rx: mpsc::Receiver<Settled>,
    cancel: Arc<AtomicBool>,
    frames: Option<Arc<FrameSet>>,
    // Declared last so queued jobs observe `cancel` before the pool is torn down.
    _pool: rayon::ThreadPool,
}

impl std::fmt::Debug for Preloader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Preloader")
            .field("request", &self.request)
            .field("progress", &self.tracker.progress())
            .field("published", &self.frames.is_some())
            .finish()
    }
}

impl Preloader {
    /// Issue one load per scheduled frame and return immediately.
    #[tracing::instrument(skip(source, opts), fields(base = %request.base_path, total = request.schedule.total_to_load()))]
    pub fn start(
        request: PreloadRequest,
        source: Arc<dyn FrameSource>,
        opts: PreloadOpts,
    ) -> ScrubResult<Self> {
        let tracker = LoadTracker::new(request.schedule)?;
        let pool = build_thread_pool(opts.threads)?;
        let cancel = Arc::new(AtomicBool::new(false));
        let (tx, rx) = mpsc::channel();

        for (index, number) in request.schedule.frame_numbers().enumerate() {
            let path = request.naming.frame_path(&request.base_path, number);
            let tx = tx.clone();
            let source = Arc::clone(&source);
            let cancel = Arc::clone(&cancel);
            pool.spawn(move || {
                if cancel.load(Ordering::Relaxed) {
                    return;
                }
                let outcome = load_frame(source.as_ref(), &path);
                // Receiver gone means the preloader was dropped; the result is discarded.
                let _ = tx.send(Settled {
                    index,
                    path,
                    outcome,
                });
            });
        }
        tracing::debug!("preload requests issued");

        Ok(Self {
            request,
            tracker,
            rx,
            cancel,
            frames: None,
            _pool: pool,
        })
    }

    /// Apply every settle that has arrived so far without blocking.
    pub fn poll(&mut self) -> Vec<PreloadEvent> {
        let mut out = Vec::new();
        while let Ok(settled) = self.rx.try_recv() {
            self.apply(settled, &mut out);
        }
        out
    }

    /// Block until every request has settled.
    ///
    /// If the workers disappear early (cancelled), remaining slots are settled as failed so the
    /// preload still completes.
    pub fn wait(&mut self) -> Vec<PreloadEvent> {
        let mut out = Vec::new();
        while !self.tracker.progress().is_complete() {
            match self.rx.recv() {
                Ok(settled) => self.apply(settled, &mut out),
                Err(_) => {
                    tracing::warn!("preload workers exited early; marking pending frames failed");
                    self.tracker.fail_pending(&mut out);
                    self.publish_if_complete();
                }
            }
        }
        out
    }

    /// Stop issuing work for requests that have not started. Already-running loads still settle.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    /// Current settle counter.
    pub fn progress(&self) -> LoadProgress {
        self.tracker.progress()
    }

    /// Settled share in `[0, 100]`.
    pub fn progress_percent(&self) -> f64 {
        self.tracker.progress().percent()
    }

    /// `true` once every request has settled.
    pub fn is_loaded(&self) -> bool {
        self.tracker.progress().is_complete()
    }

    /// The frame set, available once loading completed.
    pub fn frames(&self) -> Option<Arc<FrameSet>> {
        self.frames.clone()
    }

    /// The request this preloader was started with.
    pub fn request(&self) -> &PreloadRequest {
        &self.request
    }

    fn apply(&mut self, settled: Settled, out: &mut Vec<PreloadEvent>) {
        let Settled {
            index,
            path,
            outcome,
        } = settled;
        let image = match outcome {
            Ok(img) => Some(img),
            Err(e) => {
                tracing::debug!(%path, error = %e, "frame failed to load");
                None
            }
        };
        self.tracker.settle(index, image, out);
        self.publish_if_complete();
    }

    fn publish_if_complete(&mut self) {
        if self.frames.is_none() && self.tracker.progress().is_complete() {
            let frames = self.tracker.frames();
            tracing::info!(
                loaded = frames.loaded_count(),
                failed = frames.failed_count(),
                "preload complete"
            );
            self.frames = Some(Arc::new(frames.clone()));
        }
    }
}

impl Drop for Preloader {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Fetch and decode one frame. A panicking source or decoder settles the slot as failed.
fn load_frame(source: &dyn FrameSource, path: &str) -> ScrubResult<PreparedImage> {
    std::panic::catch_unwind(AssertUnwindSafe(|| {
        source.fetch(path).and_then(|bytes| decode_image(&bytes))
    }))
    .unwrap_or_else(|payload| {
        let msg = payload
            .downcast_ref::<&str>()
            .map(|s| (*s).to_owned())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "non-string panic payload".to_owned());
        Err(ScrubError::asset(format!("loading '{path}' panicked: {msg}")))
    })
}

fn build_thread_pool(threads: Option<usize>) -> ScrubResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(ScrubError::validation(
            "preload 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new().thread_name(|i| format!("framescrub-load-{i}"));
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| ScrubError::Other(anyhow::anyhow!("failed to build preload thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/preload/preloader.rs"]
mod tests;
