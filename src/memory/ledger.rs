/*!
 * Allocation Ledger
 * Lock-protected allocation sequences and retained-size accounting
 */

use std::collections::VecDeque;

use log::{debug, info};
use parking_lot::Mutex;

use crate::core::config::StressConfig;
use crate::core::types::{bytes_to_mb, Mb, Size};
use crate::memory::gc::HeapCollector;
use crate::memory::raw::RawBlock;
use crate::memory::types::{Channel, StressError, StressResult};

/// A tracked byte buffer, committed in full at allocation time.
struct TrackedBuf {
    bytes: Vec<u8>,
}

impl TrackedBuf {
    fn allocate(size: Size) -> StressResult<Self> {
        let mut bytes = Vec::new();
        bytes
            .try_reserve_exact(size)
            .map_err(|e| StressError::AllocationFailed {
                channel: Channel::Tracked,
                requested: size,
                reason: e.to_string(),
            })?;
        bytes.resize(size, 0);
        Ok(Self { bytes })
    }

    fn size(&self) -> Size {
        self.bytes.len()
    }

    fn size_mb(&self) -> Mb {
        bytes_to_mb(self.bytes.len() as u64)
    }
}

/// Outcome of one allocation step.
#[derive(Debug, Clone, Copy)]
pub struct StepOutcome {
    /// Bytes appended this step across enabled channels
    pub allocated: Size,
    /// Size of the tracked buffer evicted this step, if the ceiling was hit
    pub evicted_mb: Option<Mb>,
    /// Retained estimate after the step
    pub retained_mb: Mb,
}

struct LedgerInner {
    /// Oldest first; eviction pops from the front
    tracked: VecDeque<TrackedBuf>,
    untracked: Vec<RawBlock>,
    retained_mb: Mb,
}

/// The shared allocation ledger.
///
/// All sequence and counter access happens under one mutex, so a clear can
/// never race an in-flight step. `retained_mb` equals the sum of tracked
/// buffer sizes whenever the untracked channel is disabled; with untracked
/// enabled the counter includes raw blocks too, though eviction never
/// touches them.
pub struct AllocationLedger {
    inner: Mutex<LedgerInner>,
}

impl AllocationLedger {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(LedgerInner {
                tracked: VecDeque::new(),
                untracked: Vec::new(),
                retained_mb: 0.0,
            }),
        }
    }

    /// Perform one allocation step: one allocation per enabled channel, a
    /// combined retained bump, then at most one FIFO eviction once the
    /// ceiling is crossed. The ceiling is a trailing bound; the step that
    /// crosses it still lands.
    pub fn step(&self, config: &StressConfig) -> StressResult<StepOutcome> {
        let step_bytes = config.step_bytes();
        let mut inner = self.inner.lock();

        let mut allocated = 0;
        let mut increment = 0.0;

        if config.tracked {
            let buf = TrackedBuf::allocate(step_bytes)?;
            allocated += buf.size();
            increment += buf.size_mb();
            inner.tracked.push_back(buf);
        }

        if config.untracked {
            let block = RawBlock::allocate(step_bytes)?;
            allocated += block.size();
            increment += block.size_mb();
            inner.untracked.push(block);
        }

        inner.retained_mb += increment;

        let mut evicted_mb = None;
        if config.tracked && inner.retained_mb > config.max_retained_mb {
            if let Some(oldest) = inner.tracked.pop_front() {
                let size_mb = oldest.size_mb();
                inner.retained_mb -= size_mb;
                evicted_mb = Some(size_mb);
                debug!(
                    "Evicted oldest tracked buffer ({:.1} MB), retained now {:.1} MB",
                    size_mb, inner.retained_mb
                );
            }
        }

        Ok(StepOutcome {
            allocated,
            evicted_mb,
            retained_mb: inner.retained_mb,
        })
    }

    /// Release every allocation in both sequences, reset the retained
    /// counter, and force a full collection, all before the lock is
    /// released, so no step can interleave between the release and the
    /// collection.
    pub fn clear(&self, collector: &HeapCollector) -> (usize, usize) {
        let mut inner = self.inner.lock();
        let released = (inner.tracked.len(), inner.untracked.len());

        inner.tracked.clear();
        // Dropping each RawBlock returns it to the system allocator
        inner.untracked.clear();
        inner.retained_mb = 0.0;

        collector.force_collect();

        info!(
            "Ledger cleared: released {} tracked and {} untracked allocations",
            released.0, released.1
        );
        released
    }

    pub fn retained_mb(&self) -> Mb {
        self.inner.lock().retained_mb
    }

    pub fn tracked_len(&self) -> usize {
        self.inner.lock().tracked.len()
    }

    pub fn untracked_len(&self) -> usize {
        self.inner.lock().untracked.len()
    }
}

impl Default for AllocationLedger {
    fn default() -> Self {
        Self::new()
    }
}
