/*!
 * Allocation Engine
 * Background loop performing one allocation step per clock tick
 */

pub mod clock;
pub mod control;

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use log::{error, info};

use crate::core::config::StressConfig;
use crate::core::limits::{PAUSE_POLL_INTERVAL, STATUS_REPORT_INTERVAL};
use crate::core::types::bytes_to_mb;
use crate::memory::ledger::AllocationLedger;
use crate::memory::types::StressResult;
use crate::monitoring::metrics::StressMetrics;
use crate::monitoring::report::Reporter;
use crate::monitoring::stats::{sample_heap_stats, sample_process_stats, StatusReport};

pub use clock::IntervalClock;
pub use control::ControlState;

/// The background allocation loop.
///
/// Runs until aborted or until an allocation fails. A failed allocation is
/// fatal to the engine only: the stress target has been reached and there is
/// nothing to retry, but the control loop keeps running so the operator can
/// still inspect or clear the ledger.
pub struct AllocationEngine {
    config: StressConfig,
    ledger: Arc<AllocationLedger>,
    control: Arc<ControlState>,
    metrics: Arc<StressMetrics>,
    reporter: Arc<dyn Reporter>,
}

impl AllocationEngine {
    pub fn new(
        config: StressConfig,
        ledger: Arc<AllocationLedger>,
        control: Arc<ControlState>,
        metrics: Arc<StressMetrics>,
        reporter: Arc<dyn Reporter>,
    ) -> Self {
        Self {
            config,
            ledger,
            control,
            metrics,
            reporter,
        }
    }

    /// Spawn the engine on a named background thread.
    pub fn spawn(self) -> std::io::Result<JoinHandle<()>> {
        thread::Builder::new()
            .name("alloc-engine".into())
            .spawn(move || self.run())
    }

    /// Run the loop to completion on the current thread.
    pub fn run(self) {
        info!(
            "Allocation engine started: tracked={} untracked={} step={} MB tick={:?}",
            self.config.tracked,
            self.config.untracked,
            self.config.step_mb,
            self.config.tick_period()
        );

        if let Err(err) = self.drive() {
            // Diagnostic context first, then the terminal state report
            error!("Allocation step failed: {err}");
            self.reporter.status(&self.status());
            self.reporter.heap(&sample_heap_stats());
        }

        info!("Allocation engine stopped");
    }

    fn drive(&self) -> StressResult<()> {
        let mut clock = IntervalClock::new(self.config.tick_period());
        let mut step: u64 = 0;

        loop {
            if self.control.is_aborted() {
                return Ok(());
            }

            if self.control.is_paused() {
                thread::sleep(PAUSE_POLL_INTERVAL);
                continue;
            }

            let outcome = self.ledger.step(&self.config)?;
            self.metrics.record_step(outcome.evicted_mb.is_some());

            if step % STATUS_REPORT_INTERVAL == 0 {
                self.reporter.status(&self.status());
            }

            step += 1;
            clock.wait(Some(self.control.abort_flag()));
        }
    }

    fn status(&self) -> StatusReport {
        let process = sample_process_stats();
        StatusReport {
            retained_mb: self.ledger.retained_mb(),
            heap_total_mb: bytes_to_mb(process.heap_bytes),
            working_set_mb: bytes_to_mb(process.working_set_bytes),
        }
    }
}
