//! Cancelable tick scheduling.
//!
//! At most one tick is pending at any time. A tick scheduled right after
//! another one fired is placed relative to the fired deadline rather than
//! to the current instant, so a slow event loop does not stretch the
//! countdown.

use std::time::Duration;

use tokio::time::{sleep_until, Instant};

/// Handle to the single pending tick of the countdown.
#[derive(Debug, Default)]
pub struct TickScheduler {
    /// Deadline of the pending tick
    deadline: Option<Instant>,
    /// Deadline of the tick that fired last, if nothing was scheduled since
    last_fired: Option<Instant>,
}

impl TickScheduler {
    /// Creates a scheduler with nothing pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules the next tick, replacing any pending one.
    ///
    /// A zero delay fires as soon as the event loop polls again.
    pub fn schedule(&mut self, delay: Duration) {
        let fired = self.last_fired.take();
        let base = if delay.is_zero() {
            Instant::now()
        } else {
            fired.unwrap_or_else(Instant::now)
        };
        self.deadline = Some(base + delay);
    }

    /// Drops the pending tick, if any.
    pub fn cancel(&mut self) {
        self.deadline = None;
        self.last_fired = None;
    }

    /// Returns the deadline of the pending tick.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Returns true if a tick is pending.
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Records that the pending tick fired.
    ///
    /// Returns false if nothing was pending, which means the tick was
    /// canceled after its deadline was read and must be dropped.
    pub fn mark_fired(&mut self) -> bool {
        match self.deadline.take() {
            Some(deadline) => {
                self.last_fired = Some(deadline);
                true
            }
            None => false,
        }
    }
}

/// Sleeps until `deadline`, or forever if there is none.
pub async fn wait_for_tick(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending::<()>().await,
    }
}
