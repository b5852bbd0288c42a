/*!
 * Limits and Constants
 *
 * Centralized location for the tool's tunable constants and thresholds.
 */

use std::time::Duration;

use crate::core::types::Mb;

// =============================================================================
// ALLOCATION
// =============================================================================

/// Default allocation step size (16 MB)
pub const DEFAULT_STEP_MB: Mb = 16.0;

/// One 64 KB nudge allocation, outside the ledger
/// Large enough to register with the allocator, small enough not to skew
/// retained accounting
pub const NUDGE_ALLOCATION_BYTES: usize = 64 * 1024;

// =============================================================================
// PACING
// =============================================================================

/// Tick period per MB of step size (milliseconds)
/// A 16 MB step paces at one allocation per 80 ms
pub const TICK_MILLIS_PER_STEP_MB: f64 = 5.0;

/// Poll interval while paused
/// Coarse on purpose: resume latency up to one interval is acceptable
pub const PAUSE_POLL_INTERVAL: Duration = Duration::from_millis(100);

// =============================================================================
// REPORTING
// =============================================================================

/// Emit a status report every Nth allocation step
pub const STATUS_REPORT_INTERVAL: u64 = 8;

/// High-load threshold as a fraction of total system memory
pub const HIGH_LOAD_THRESHOLD_RATIO: f64 = 0.90;
