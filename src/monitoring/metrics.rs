/*!
 * Run Counters
 * Lightweight counters for operator inspection
 */

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Counters accumulated over a run. Updates are relaxed and the snapshot is
/// advisory; nothing synchronizes on these values.
#[derive(Debug, Default)]
pub struct StressMetrics {
    steps: AtomicU64,
    evictions: AtomicU64,
    collections: AtomicU64,
    nudges: AtomicU64,
    clears: AtomicU64,
}

impl StressMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_step(&self, evicted: bool) {
        self.steps.fetch_add(1, Ordering::Relaxed);
        if evicted {
            self.evictions.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_collection(&self) {
        self.collections.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_nudge(&self) {
        self.nudges.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_clear(&self) {
        self.clears.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            steps: self.steps.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
            collections: self.collections.load(Ordering::Relaxed),
            nudges: self.nudges.load(Ordering::Relaxed),
            clears: self.clears.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time view of the run counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub steps: u64,
    pub evictions: u64,
    pub collections: u64,
    pub nudges: u64,
    pub clears: u64,
}
