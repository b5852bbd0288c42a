/*!
 * Collection Monitor
 * Reports each completed full collection with inter-collection timing
 */

use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;

use crate::memory::gc::HeapCollector;
use crate::monitoring::report::Reporter;
use crate::monitoring::stats::{sample_heap_stats, CollectionEvent};

/// Observes completed full collections and writes one event per cycle to the
/// reporting sink.
///
/// The handler runs on whichever thread forced the collection and stays
/// registered for the process lifetime. It must stay cheap: one instant
/// swap, one stats sample, one sink write.
pub struct CollectionMonitor {
    last_event: Arc<Mutex<Option<Instant>>>,
}

impl CollectionMonitor {
    /// Register with the collector. The handler always answers "keep
    /// monitoring".
    pub fn register(collector: &HeapCollector, reporter: Arc<dyn Reporter>) -> Self {
        let last_event = Arc::new(Mutex::new(None));
        let state = Arc::clone(&last_event);

        collector.on_major_collection(move || {
            let now = Instant::now();
            let since_last_secs = {
                let mut last = state.lock();
                let dt = (*last)
                    .map(|prev| now.duration_since(prev).as_secs_f64())
                    .unwrap_or(0.0);
                *last = Some(now);
                dt
            };

            reporter.collection(&CollectionEvent {
                since_last_secs,
                stats: sample_heap_stats(),
            });
            true
        });

        Self { last_event }
    }

    /// Instant of the most recent observed collection, if any.
    pub fn last_event(&self) -> Option<Instant> {
        *self.last_event.lock()
    }
}
