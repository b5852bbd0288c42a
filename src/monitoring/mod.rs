/*!
 * Monitoring
 * Statistics sampling, run counters, and collection reporting
 */

pub mod metrics;
pub mod monitor;
pub mod report;
pub mod stats;
pub mod tracer;

// Re-export for convenience
pub use metrics::{MetricsSnapshot, StressMetrics};
pub use monitor::CollectionMonitor;
pub use report::{ConsoleReporter, Reporter};
pub use stats::{
    sample_heap_stats, sample_process_stats, CollectionEvent, HeapStats, MemoryLoadLevel,
    ProcessStats, StatusReport,
};
pub use tracer::init_tracing;
