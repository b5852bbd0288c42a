/*!
 * Interval Clock Tests
 * Drift-free accumulation and cancellation
 */

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use heap_stress::IntervalClock;
use pretty_assertions::assert_eq;

#[test]
fn test_accumulated_deadline_is_work_independent() {
    let period = Duration::from_millis(10);
    let mut clock = IntervalClock::new(period);
    let anchor = clock.deadline();

    for _ in 0..5 {
        clock.wait(None);
        // Work longer than the period: the clock must catch up, not drift
        thread::sleep(Duration::from_millis(25));
    }

    assert_eq!(clock.deadline(), anchor + 5 * period);
}

#[test]
fn test_wait_blocks_until_the_deadline() {
    let period = Duration::from_millis(30);
    let mut clock = IntervalClock::new(period);

    let start = Instant::now();
    clock.wait(None);
    assert!(start.elapsed() >= period);
}

#[test]
fn test_raised_cancel_flag_ends_the_wait_early() {
    let mut clock = IntervalClock::new(Duration::from_secs(10));
    let cancel = Arc::new(AtomicBool::new(false));

    let raiser = {
        let cancel = Arc::clone(&cancel);
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(50));
            cancel.store(true, Ordering::Relaxed);
        })
    };

    let start = Instant::now();
    clock.wait(Some(&cancel));
    assert!(start.elapsed() < Duration::from_secs(5));

    raiser.join().unwrap();
}
