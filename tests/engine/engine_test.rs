/*!
 * Allocation Engine Tests
 * Pause, abort, and failure semantics of the background loop
 */

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use heap_stress::{
    AllocationEngine, AllocationLedger, CollectionEvent, ControlState, HeapStats,
    MetricsSnapshot, Reporter, StatusReport, StressConfig, StressMetrics,
};
use pretty_assertions::assert_eq;
use serial_test::serial;

struct NullReporter;

impl Reporter for NullReporter {
    fn status(&self, _report: &StatusReport) {}
    fn collection(&self, _event: &CollectionEvent) {}
    fn heap(&self, _stats: &HeapStats) {}
    fn counters(&self, _snapshot: &MetricsSnapshot) {}
}

struct Harness {
    ledger: Arc<AllocationLedger>,
    control: Arc<ControlState>,
    metrics: Arc<StressMetrics>,
    handle: thread::JoinHandle<()>,
}

fn spawn_engine(config: StressConfig) -> Harness {
    let ledger = Arc::new(AllocationLedger::new());
    let control = Arc::new(ControlState::new());
    let metrics = Arc::new(StressMetrics::new());

    let engine = AllocationEngine::new(
        config,
        Arc::clone(&ledger),
        Arc::clone(&control),
        Arc::clone(&metrics),
        Arc::new(NullReporter),
    );
    let handle = engine.spawn().unwrap();

    Harness {
        ledger,
        control,
        metrics,
        handle,
    }
}

fn small_config() -> StressConfig {
    // 1 MB steps pace at 5 ms per tick; the ceiling keeps the live set tiny
    StressConfig {
        tracked: true,
        untracked: false,
        max_retained_mb: 4.0,
        step_mb: 1.0,
    }
}

#[test]
#[serial]
fn test_engine_steps_until_aborted() {
    let harness = spawn_engine(small_config());

    thread::sleep(Duration::from_millis(100));
    harness.control.abort();
    harness.handle.join().unwrap();

    let stopped_at = harness.metrics.snapshot().steps;
    assert!(stopped_at > 0);
    assert!(harness.ledger.retained_mb() > 0.0);

    // Aborted is terminal: nothing moves afterwards
    thread::sleep(Duration::from_millis(50));
    assert_eq!(harness.metrics.snapshot().steps, stopped_at);
}

#[test]
#[serial]
fn test_paused_engine_does_not_step() {
    let harness = spawn_engine(small_config());
    harness.control.set_paused(true);

    // Give the engine time to observe the flag, then watch it idle
    thread::sleep(Duration::from_millis(50));
    let paused_at = harness.metrics.snapshot().steps;
    let retained_at = harness.ledger.retained_mb();

    thread::sleep(Duration::from_millis(250));
    assert_eq!(harness.metrics.snapshot().steps, paused_at);
    assert_eq!(harness.ledger.retained_mb(), retained_at);

    // Unpausing resumes stepping from where it left off
    harness.control.set_paused(false);
    thread::sleep(Duration::from_millis(300));
    assert!(harness.metrics.snapshot().steps > paused_at);

    harness.control.abort();
    harness.handle.join().unwrap();
}

#[test]
#[serial]
fn test_abort_wins_even_when_unpaused() {
    let harness = spawn_engine(small_config());
    harness.control.abort();
    harness.handle.join().unwrap();

    // Nothing moves once the engine has observed the flag and exited
    let stopped_at = harness.metrics.snapshot().steps;
    thread::sleep(Duration::from_millis(50));
    assert_eq!(harness.metrics.snapshot().steps, stopped_at);
    assert!(!harness.control.is_paused());
}

#[test]
#[serial]
fn test_failed_allocation_ends_the_engine_quietly() {
    // An absurd step size fails the reservation before any memory moves
    let config = StressConfig {
        tracked: true,
        untracked: false,
        max_retained_mb: f64::INFINITY,
        step_mb: 1e12,
    };
    let harness = spawn_engine(config);

    // The engine ends on its own, without abort and without panicking
    harness.handle.join().unwrap();
    assert_eq!(harness.metrics.snapshot().steps, 0);
    assert_eq!(harness.ledger.tracked_len(), 0);
    assert!(!harness.control.is_aborted());
}
