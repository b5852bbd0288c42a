/*!
 * Core Types
 * Common types and unit conversions used across the tool
 */

/// Size type for byte counts
pub type Size = usize;

/// Size in megabytes, the operator-facing unit
pub type Mb = f64;

/// Bytes per megabyte
pub const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Convert a byte count to megabytes
#[inline]
pub fn bytes_to_mb(bytes: u64) -> Mb {
    bytes as f64 / BYTES_PER_MB
}

/// Convert megabytes to a byte count, rounding down
#[inline]
pub fn mb_to_bytes(mb: Mb) -> Size {
    (mb * BYTES_PER_MB) as Size
}

/// Convert a byte count to gigabytes
#[inline]
pub fn bytes_to_gb(bytes: u64) -> f64 {
    bytes as f64 / (BYTES_PER_MB * 1024.0)
}
