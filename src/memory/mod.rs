/*!
 * Memory Module
 * Allocation ledger, raw blocks, and forced collection
 */

pub mod gc;
pub mod ledger;
pub mod raw;
pub mod types;

// Re-export for convenience
pub use gc::HeapCollector;
pub use ledger::{AllocationLedger, StepOutcome};
pub use raw::RawBlock;
pub use types::{Channel, StressError, StressResult};
