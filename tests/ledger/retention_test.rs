/*!
 * Retention Ceiling Tests
 * Trailing-bound behavior and FIFO eviction order
 */

use heap_stress::{AllocationLedger, StressConfig};
use pretty_assertions::assert_eq;
use serial_test::serial;

fn config(max_retained_mb: f64, step_mb: f64) -> StressConfig {
    StressConfig {
        tracked: true,
        untracked: false,
        max_retained_mb,
        step_mb,
    }
}

#[test]
fn test_ceiling_is_a_trailing_bound() {
    let ledger = AllocationLedger::new();
    let config = config(3.0, 1.0);

    for _ in 0..20 {
        let outcome = ledger.step(&config).unwrap();
        // One step may overshoot before the eviction that follows it
        assert!(outcome.retained_mb <= config.max_retained_mb + config.step_mb);
        assert!(outcome.retained_mb >= 0.0);
    }

    assert_eq!(ledger.retained_mb(), 3.0);
    assert_eq!(ledger.tracked_len(), 3);
}

#[test]
fn test_eviction_is_strictly_fifo() {
    let ledger = AllocationLedger::new();

    // Distinguishable sizes, inserted in order: 1 MB, 2 MB, 3 MB
    for step_mb in [1.0, 2.0, 3.0] {
        ledger.step(&config(f64::INFINITY, step_mb)).unwrap();
    }

    // Each following step lands over the ceiling and evicts exactly one
    // buffer: the sizes must come back out in insertion order
    let squeeze = config(0.5, 0.25);
    assert_eq!(ledger.step(&squeeze).unwrap().evicted_mb, Some(1.0));
    assert_eq!(ledger.step(&squeeze).unwrap().evicted_mb, Some(2.0));
    assert_eq!(ledger.step(&squeeze).unwrap().evicted_mb, Some(3.0));

    // Only the three 0.25 MB squeeze buffers remain
    assert_eq!(ledger.tracked_len(), 3);
    assert_eq!(ledger.retained_mb(), 0.75);
}

#[test]
fn test_at_most_one_eviction_per_step() {
    let ledger = AllocationLedger::new();

    // Far over the ceiling in one go
    ledger.step(&config(f64::INFINITY, 8.0)).unwrap();

    // A tight ceiling only claws back one buffer per step
    let outcome = ledger.step(&config(1.0, 0.25)).unwrap();
    assert_eq!(outcome.evicted_mb, Some(8.0));
    assert_eq!(ledger.tracked_len(), 1);
}

#[test]
#[serial]
fn test_scenario_five_16mb_steps_32mb_ceiling() {
    let ledger = AllocationLedger::new();
    let config = config(32.0, 16.0);

    let mut evictions = 0;
    for _ in 0..5 {
        if ledger.step(&config).unwrap().evicted_mb.is_some() {
            evictions += 1;
        }
    }

    // Steps 3, 4, and 5 each cross the ceiling and evict the oldest buffer
    assert_eq!(evictions, 3);
    assert_eq!(ledger.tracked_len(), 2);
    assert_eq!(ledger.retained_mb(), 32.0);
}
