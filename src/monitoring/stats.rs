/*!
 * Heap Statistics
 * Point-in-time samples of process and system memory accounting
 */

use serde::Serialize;

#[cfg(target_os = "linux")]
use crate::core::limits::HIGH_LOAD_THRESHOLD_RATIO;
use crate::core::types::Mb;

/// Heap statistics sampled at one instant.
#[derive(Debug, Clone, Copy, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct HeapStats {
    /// Process heap (data segment) size
    pub heap_bytes: u64,
    /// Total memory available to the system
    pub total_available_bytes: u64,
    /// Load level above which the system counts as under high memory load
    pub high_load_threshold_bytes: u64,
    /// System-wide memory currently in use
    pub memory_load_bytes: u64,
}

impl HeapStats {
    /// Coarse load level derived from system-wide usage.
    pub fn load_level(&self) -> MemoryLoadLevel {
        if self.total_available_bytes == 0 {
            return MemoryLoadLevel::Low;
        }
        let ratio = self.memory_load_bytes as f64 / self.total_available_bytes as f64;
        if ratio >= 0.95 {
            MemoryLoadLevel::Critical
        } else if ratio >= 0.80 {
            MemoryLoadLevel::High
        } else if ratio >= 0.60 {
            MemoryLoadLevel::Medium
        } else {
            MemoryLoadLevel::Low
        }
    }
}

/// Memory load levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MemoryLoadLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl std::fmt::Display for MemoryLoadLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            MemoryLoadLevel::Low => write!(f, "LOW"),
            MemoryLoadLevel::Medium => write!(f, "MEDIUM"),
            MemoryLoadLevel::High => write!(f, "HIGH"),
            MemoryLoadLevel::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Process-level accounting for status reports.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct ProcessStats {
    /// Data segment size
    pub heap_bytes: u64,
    /// Resident set size
    pub working_set_bytes: u64,
}

/// Periodic status emitted from the allocation loop.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct StatusReport {
    pub retained_mb: Mb,
    pub heap_total_mb: Mb,
    pub working_set_mb: Mb,
}

/// One completed full collection.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CollectionEvent {
    /// Seconds since the previous collection event (0 for the first)
    pub since_last_secs: f64,
    pub stats: HeapStats,
}

/// Sample system-wide and process heap statistics. Sampling never fails;
/// values the platform cannot provide read as zero.
#[cfg(target_os = "linux")]
pub fn sample_heap_stats() -> HeapStats {
    let mut total = 0u64;
    let mut available = 0u64;

    if let Ok(contents) = std::fs::read_to_string("/proc/meminfo") {
        for line in contents.lines() {
            if let Some(kb) = parse_meminfo_kb(line, "MemTotal:") {
                total = kb * 1024;
            } else if let Some(kb) = parse_meminfo_kb(line, "MemAvailable:") {
                available = kb * 1024;
            }
        }
    }

    let process = sample_process_stats();
    HeapStats {
        heap_bytes: process.heap_bytes,
        total_available_bytes: total,
        high_load_threshold_bytes: (total as f64 * HIGH_LOAD_THRESHOLD_RATIO) as u64,
        memory_load_bytes: total.saturating_sub(available),
    }
}

#[cfg(not(target_os = "linux"))]
pub fn sample_heap_stats() -> HeapStats {
    HeapStats {
        heap_bytes: sample_process_stats().heap_bytes,
        ..HeapStats::default()
    }
}

/// Sample this process's heap and working-set sizes from /proc/self/statm.
#[cfg(target_os = "linux")]
pub fn sample_process_stats() -> ProcessStats {
    let Ok(statm) = std::fs::read_to_string("/proc/self/statm") else {
        return ProcessStats::default();
    };

    // statm fields: size resident shared text lib data dt (in pages)
    let mut fields = statm.split_whitespace();
    let _size = fields.next();
    let resident: u64 = fields.next().and_then(|f| f.parse().ok()).unwrap_or(0);
    let data: u64 = fields.nth(3).and_then(|f| f.parse().ok()).unwrap_or(0);

    let page = page_size();
    ProcessStats {
        heap_bytes: data * page,
        working_set_bytes: resident * page,
    }
}

#[cfg(not(target_os = "linux"))]
pub fn sample_process_stats() -> ProcessStats {
    ProcessStats::default()
}

#[cfg(target_os = "linux")]
fn page_size() -> u64 {
    // SAFETY: sysconf is always safe to call
    unsafe { libc::sysconf(libc::_SC_PAGESIZE) as u64 }
}

#[cfg(target_os = "linux")]
fn parse_meminfo_kb(line: &str, key: &str) -> Option<u64> {
    line.strip_prefix(key)?.split_whitespace().next()?.parse().ok()
}
