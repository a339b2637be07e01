//! Frame-batched redraw scheduling.
//!
//! Any number of components may ask for a redraw between two frames. Requests are
//! counted by a [`RedrawScheduler`] handle and collapsed by a [`FramePump`], which runs
//! once per frame and decides whether the render pass fires.
//!
//! # Render rule
//!
//! On each tick with `pending > 0` the pump renders only if `pending == 1`, then
//! decrements `pending` by one. A burst of N requests in one interval therefore
//! produces no render for N-1 ticks and a single render on the tick where the count
//! has decayed to one.
//!
//! # Threading
//!
//! The scheduler is shared through `Rc` and is `!Send`. Producers and the pump must
//! live on the same single-threaded event loop (a tokio `LocalSet` in practice).

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::panic::Location;
use std::rc::Rc;
use tracing::{debug, trace};

pub mod countdown;
pub mod frames;

pub use countdown::RedrawCountdown;
pub use frames::{
    FrameSource, TimerFrames, YieldFrames, FALLBACK_FRAME_INTERVAL, MIN_FRAME_INTERVAL,
};

/// Handle used by view code to request a redraw.
///
/// Cheap to clone; every clone shares the same pending counter.
#[derive(Debug, Clone, Default)]
pub struct RedrawScheduler {
    inner: Rc<SchedulerInner>,
}

#[derive(Debug, Default)]
struct SchedulerInner {
    pending: Cell<usize>,
    /// Caller of the request that raised the count to each value.
    call_sites: Option<RefCell<HashMap<usize, &'static Location<'static>>>>,
}

impl RedrawScheduler {
    /// Create a scheduler with no pending requests.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scheduler that remembers where each pending request came from.
    ///
    /// The pump logs the call site of every request it collapses at `trace` level.
    pub fn with_call_site_tracking(enabled: bool) -> Self {
        Self {
            inner: Rc::new(SchedulerInner {
                pending: Cell::new(0),
                call_sites: enabled.then(|| RefCell::new(HashMap::new())),
            }),
        }
    }

    /// Request a redraw.
    #[track_caller]
    pub fn schedule(&self) {
        let pending = self.inner.pending.get() + 1;
        self.inner.pending.set(pending);

        if let Some(sites) = &self.inner.call_sites {
            sites.borrow_mut().insert(pending, Location::caller());
        }
    }

    /// Number of requests not yet collapsed by the pump.
    pub fn pending(&self) -> usize {
        self.inner.pending.get()
    }

    /// True when no request is outstanding.
    pub fn is_idle(&self) -> bool {
        self.pending() == 0
    }

    /// Whether call sites are being recorded.
    pub fn tracks_call_sites(&self) -> bool {
        self.inner.call_sites.is_some()
    }

    fn take_call_site(&self, index: usize) -> Option<&'static Location<'static>> {
        self.inner
            .call_sites
            .as_ref()
            .and_then(|sites| sites.borrow_mut().remove(&index))
    }

    fn release_one(&self) {
        let pending = self.inner.pending.get().saturating_sub(1);
        self.inner.pending.set(pending);
    }
}

/// The render pass invoked by the pump.
pub trait Renderer {
    /// Re-render the whole view tree now.
    fn render_now(&mut self);
}

impl<F: FnMut()> Renderer for F {
    fn render_now(&mut self) {
        self()
    }
}

/// What a single pump tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PumpOutcome {
    /// Nothing was pending.
    Idle,
    /// Exactly one request was pending; the render pass ran.
    Rendered,
    /// More than one request was pending; no render this tick.
    Deferred {
        /// Pending count observed before this tick released one request.
        pending: usize,
    },
}

/// Counters accumulated by a pump over its lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PumpStats {
    /// Ticks executed.
    pub ticks: u64,
    /// Render passes invoked.
    pub renders: u64,
    /// Ticks that saw a burst and skipped rendering.
    pub deferred: u64,
}

/// Per-frame callback deciding whether to render.
pub struct FramePump<R> {
    scheduler: RedrawScheduler,
    renderer: R,
    stats: PumpStats,
}

impl<R: Renderer> FramePump<R> {
    /// Create a pump draining `scheduler` into `renderer`.
    pub fn new(scheduler: RedrawScheduler, renderer: R) -> Self {
        Self {
            scheduler,
            renderer,
            stats: PumpStats::default(),
        }
    }

    /// Run one frame's worth of scheduling.
    pub fn tick(&mut self) -> PumpOutcome {
        self.stats.ticks += 1;

        let pending = self.scheduler.pending();
        if pending == 0 {
            return PumpOutcome::Idle;
        }

        let site = self.scheduler.take_call_site(pending);

        let outcome = if pending == 1 {
            self.renderer.render_now();
            self.stats.renders += 1;
            debug!(renders = self.stats.renders, "redraw");
            PumpOutcome::Rendered
        } else {
            self.stats.deferred += 1;
            trace!(pending, "redraw burst deferred");
            PumpOutcome::Deferred { pending }
        };

        if let Some(site) = site {
            trace!(
                file = site.file(),
                line = site.line(),
                pending,
                "collapsed redraw request"
            );
        }

        self.scheduler.release_one();
        outcome
    }

    /// Tick now, then once per frame, forever.
    ///
    /// Meant to be spawned as a local task; it ends only when dropped.
    pub async fn run<F: FrameSource>(mut self, mut frames: F) {
        debug!("frame pump started");
        loop {
            self.tick();
            frames.next_frame().await;
        }
    }

    /// Tick `count` times, waiting for a frame after each tick.
    pub async fn run_frames<F: FrameSource>(&mut self, frames: &mut F, count: usize) -> PumpStats {
        for _ in 0..count {
            self.tick();
            frames.next_frame().await;
        }
        self.stats
    }

    /// Lifetime counters.
    pub fn stats(&self) -> PumpStats {
        self.stats
    }

    /// The scheduler this pump drains.
    pub fn scheduler(&self) -> &RedrawScheduler {
        &self.scheduler
    }

    /// Borrow the renderer.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }
}

#[cfg(test)]
#[path = "pump_tests.rs"]
mod tests;
