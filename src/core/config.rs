/*!
 * Run Configuration
 * Immutable per-run allocation settings
 */

use std::time::Duration;

use crate::core::limits::{DEFAULT_STEP_MB, TICK_MILLIS_PER_STEP_MB};
use crate::core::types::{mb_to_bytes, Mb, Size};

/// Allocation configuration, fixed at startup and never mutated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StressConfig {
    /// Enable the tracked allocation channel
    pub tracked: bool,
    /// Enable the untracked (raw) allocation channel
    pub untracked: bool,
    /// Retained-size ceiling for eviction, in MB (`f64::INFINITY` = unbounded)
    pub max_retained_mb: Mb,
    /// Bytes allocated per channel per step, in MB
    pub step_mb: Mb,
}

impl StressConfig {
    /// Allocation size per channel per step, in bytes.
    pub fn step_bytes(&self) -> Size {
        mb_to_bytes(self.step_mb)
    }

    /// Clock period derived from the step size: `step_mb` x 5 ms, so larger
    /// steps pace proportionally slower.
    pub fn tick_period(&self) -> Duration {
        Duration::from_secs_f64(self.step_mb * TICK_MILLIS_PER_STEP_MB / 1000.0)
    }

    /// True when at least one channel is enabled.
    pub fn any_channel(&self) -> bool {
        self.tracked || self.untracked
    }
}

impl Default for StressConfig {
    fn default() -> Self {
        Self {
            tracked: true,
            untracked: false,
            max_retained_mb: f64::INFINITY,
            step_mb: DEFAULT_STEP_MB,
        }
    }
}
