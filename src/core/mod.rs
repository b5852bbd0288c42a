/*!
 * Core Module
 * Shared types, constants, and run configuration
 */

pub mod config;
pub mod limits;
pub mod types;

// Re-export for convenience
pub use config::StressConfig;
pub use types::{bytes_to_gb, bytes_to_mb, mb_to_bytes, Mb, Size};
