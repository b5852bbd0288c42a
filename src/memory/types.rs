/*!
 * Memory Types
 * Error taxonomy and channel identifiers
 */

use serde::Serialize;
use thiserror::Error;

use crate::core::types::Size;

/// Result type for allocation operations
pub type StressResult<T> = Result<T, StressError>;

/// Errors surfaced by the allocation engine and control loop
#[derive(Error, Debug)]
pub enum StressError {
    #[error("{channel} allocation of {requested} bytes failed: {reason}")]
    AllocationFailed {
        channel: Channel,
        requested: Size,
        reason: String,
    },

    #[error("console input failed: {0}")]
    Console(#[from] rustyline::error::ReadlineError),
}

/// The two independent allocation channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    /// Ordinary heap buffers, visible to the allocator's accounting
    Tracked,
    /// Raw blocks straight from the system allocator, released manually
    Untracked,
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Channel::Tracked => write!(f, "tracked"),
            Channel::Untracked => write!(f, "untracked"),
        }
    }
}
