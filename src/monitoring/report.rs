/*!
 * Reporting Sink
 * Rendering of status, heap, and collection reports
 */

use log::warn;
use serde::Serialize;

use crate::core::types::bytes_to_gb;
use crate::monitoring::metrics::MetricsSnapshot;
use crate::monitoring::stats::{CollectionEvent, HeapStats, StatusReport};

/// Sink for operator-facing report lines.
///
/// Implementations must be cheap and non-blocking: reports are emitted from
/// the engine thread and from collection handlers.
pub trait Reporter: Send + Sync {
    fn status(&self, report: &StatusReport);
    fn collection(&self, event: &CollectionEvent);
    fn heap(&self, stats: &HeapStats);
    fn counters(&self, snapshot: &MetricsSnapshot);
}

/// Console sink: plain text lines, or one JSON object per line.
pub struct ConsoleReporter {
    json: bool,
}

impl ConsoleReporter {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    fn emit<T: Serialize>(&self, value: &T, text: impl FnOnce() -> String) {
        if self.json {
            match serde_json::to_string(value) {
                Ok(line) => println!("{line}"),
                Err(err) => warn!("Failed to serialize report: {err}"),
            }
        } else {
            println!("{}", text());
        }
    }
}

impl Reporter for ConsoleReporter {
    fn status(&self, report: &StatusReport) {
        self.emit(report, || {
            format!(
                "Retained: {:.1} MB, Heap Total: {:.1} MB, Working Set: {:.1} MB",
                report.retained_mb, report.heap_total_mb, report.working_set_mb
            )
        });
    }

    fn collection(&self, event: &CollectionEvent) {
        if self.json {
            self.emit(event, String::new);
            return;
        }
        println!(
            "------ full collection after {:.3} sec ------",
            event.since_last_secs
        );
        self.heap(&event.stats);
        println!("---------------------------------------------");
    }

    fn heap(&self, stats: &HeapStats) {
        self.emit(stats, || {
            format!(
                "HeapSize: {:.1}GB, TotalAvailable: {:.1}GB, HighLoadThreshold: {:.1}GB, MemoryLoad: {:.1}GB ({})",
                bytes_to_gb(stats.heap_bytes),
                bytes_to_gb(stats.total_available_bytes),
                bytes_to_gb(stats.high_load_threshold_bytes),
                bytes_to_gb(stats.memory_load_bytes),
                stats.load_level()
            )
        });
    }

    fn counters(&self, snapshot: &MetricsSnapshot) {
        self.emit(snapshot, || {
            format!(
                "Steps: {}, Evictions: {}, Collections: {}, Nudges: {}, Clears: {}",
                snapshot.steps,
                snapshot.evictions,
                snapshot.collections,
                snapshot.nudges,
                snapshot.clears
            )
        });
    }
}
