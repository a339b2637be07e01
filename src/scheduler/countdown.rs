//! Redraw after a known number of completions.

use std::cell::Cell;

use super::RedrawScheduler;

/// Schedules a redraw once `countdown` requests have been made.
///
/// Useful when a view fires several independent loads and should repaint only when
/// the last of them lands. Every request after the countdown expires schedules again.
#[derive(Debug, Clone)]
pub struct RedrawCountdown {
    remaining: Cell<usize>,
    scheduler: RedrawScheduler,
}

impl RedrawCountdown {
    /// Expect `countdown` requests before redrawing.
    pub fn new(scheduler: RedrawScheduler, countdown: usize) -> Self {
        Self {
            remaining: Cell::new(countdown),
            scheduler,
        }
    }

    /// Record one completion. Returns true if a redraw was scheduled.
    #[track_caller]
    pub fn request(&self) -> bool {
        let remaining = self.remaining.get().saturating_sub(1);
        self.remaining.set(remaining);

        if remaining == 0 {
            self.scheduler.schedule();
            true
        } else {
            false
        }
    }

    /// Requests still expected before the next redraw.
    pub fn remaining(&self) -> usize {
        self.remaining.get()
    }
}
