/*!
 * heap-stress Library
 * Interactive heap-pressure generation: a paced allocation engine, a
 * lock-protected allocation ledger with FIFO retention, forced-collection
 * reporting, and an operator command surface
 */

pub mod control;
pub mod core;
pub mod engine;
pub mod memory;
pub mod monitoring;

// Re-exports
pub use crate::core::config::StressConfig;
pub use control::{Command, ControlLoop};
pub use engine::{AllocationEngine, ControlState, IntervalClock};
pub use memory::{AllocationLedger, Channel, HeapCollector, RawBlock, StepOutcome, StressError, StressResult};
pub use monitoring::{
    init_tracing, sample_heap_stats, sample_process_stats, CollectionEvent, CollectionMonitor,
    ConsoleReporter, HeapStats, MemoryLoadLevel, MetricsSnapshot, Reporter, StatusReport,
    StressMetrics,
};
