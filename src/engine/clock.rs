/*!
 * Interval Clock
 * Busy-wait timer with drift-free deadline accumulation
 */

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// A repeating deadline at a fixed period.
///
/// Each wait blocks until the pending deadline passes, then advances it by
/// exactly one period from the original anchor. Time spent working between
/// waits therefore never shifts later ticks.
#[derive(Debug)]
pub struct IntervalClock {
    period: Duration,
    next: Instant,
}

impl IntervalClock {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next: Instant::now() + period,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// The pending deadline.
    pub fn deadline(&self) -> Instant {
        self.next
    }

    /// Re-anchor the pending deadline to one period from now.
    pub fn reset(&mut self) {
        self.next = Instant::now() + self.period;
    }

    /// Spin until the pending deadline passes, then advance it by one
    /// period. A raised cancel flag ends the wait early; the deadline still
    /// advances so cancellation never stalls the schedule.
    pub fn wait(&mut self, cancel: Option<&AtomicBool>) {
        while Instant::now() < self.next {
            if let Some(flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    break;
                }
            }
            std::hint::spin_loop();
        }
        self.next += self.period;
    }
}
