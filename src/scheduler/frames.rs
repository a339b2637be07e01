//! Frame sources driving the pump.

use std::time::Duration;
use tokio::time::{Interval, MissedTickBehavior};

/// Delay between frames when no display-synchronised frame callback exists.
pub const FALLBACK_FRAME_INTERVAL: Duration = Duration::from_millis(100);

/// Shortest accepted frame period.
pub const MIN_FRAME_INTERVAL: Duration = Duration::from_millis(1);

/// Something that resolves once per frame.
#[allow(async_fn_in_trait)]
pub trait FrameSource {
    /// Wait until the next frame is due.
    async fn next_frame(&mut self);
}

/// Fixed-period frames backed by a tokio interval.
///
/// Late frames are delayed rather than fired back to back, so a stalled event loop
/// never produces a catch-up burst of ticks.
#[derive(Debug)]
pub struct TimerFrames {
    period: Duration,
    interval: Option<Interval>,
}

impl TimerFrames {
    /// Frames every `period`, raised to [`MIN_FRAME_INTERVAL`] if shorter.
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(MIN_FRAME_INTERVAL),
            interval: None,
        }
    }

    /// Frames every [`FALLBACK_FRAME_INTERVAL`].
    pub fn fallback() -> Self {
        Self::new(FALLBACK_FRAME_INTERVAL)
    }

    /// Configured frame period.
    pub fn period(&self) -> Duration {
        self.period
    }
}

impl FrameSource for TimerFrames {
    async fn next_frame(&mut self) {
        // Created lazily: tokio timers need a running runtime.
        let period = self.period;
        let interval = self.interval.get_or_insert_with(|| {
            let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            interval
        });
        interval.tick().await;
    }
}

/// One frame per event-loop turn.
///
/// Lets every other ready task run before the next tick. Used by tests and by
/// hosts that pace frames themselves.
#[derive(Debug, Clone, Copy, Default)]
pub struct YieldFrames;

impl FrameSource for YieldFrames {
    async fn next_frame(&mut self) {
        tokio::task::yield_now().await;
    }
}
