/*!
 * Heap Collector
 * Forced full collections and major-collection notification
 */

use std::time::{Duration, Instant};

use log::{debug, info};
use parking_lot::Mutex;

/// Handler invoked after each completed full collection. The registration
/// persists for as long as the handler returns `true`.
pub type CollectionHandler = Box<dyn FnMut() -> bool + Send>;

/// Collector facade for the process heap.
///
/// A "full collection" here returns freed heap memory to the OS where the
/// allocator supports it, then notifies subscribers. Notifications are
/// serialized: handlers run one at a time on the forcing thread and must not
/// block or do long-running work.
pub struct HeapCollector {
    handlers: Mutex<Vec<CollectionHandler>>,
    last_collection: Mutex<Option<Instant>>,
}

impl HeapCollector {
    pub fn new() -> Self {
        Self {
            handlers: Mutex::new(Vec::new()),
            last_collection: Mutex::new(None),
        }
    }

    /// Subscribe to completed full collections.
    pub fn on_major_collection<F>(&self, handler: F)
    where
        F: FnMut() -> bool + Send + 'static,
    {
        self.handlers.lock().push(Box::new(handler));
    }

    /// Force an immediate full collection and notify subscribers.
    pub fn force_collect(&self) {
        release_to_os();
        *self.last_collection.lock() = Some(Instant::now());

        let mut handlers = self.handlers.lock();
        let before = handlers.len();
        handlers.retain_mut(|handler| handler());
        let dropped = before - handlers.len();
        if dropped > 0 {
            debug!("{dropped} collection handlers unsubscribed");
        }
    }

    /// Time since the last forced collection, if any.
    pub fn time_since_last_collection(&self) -> Option<Duration> {
        self.last_collection.lock().map(|at| at.elapsed())
    }
}

impl Default for HeapCollector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(all(target_os = "linux", target_env = "gnu"))]
fn release_to_os() {
    // SAFETY: malloc_trim takes no pointers and has no preconditions
    let trimmed = unsafe { libc::malloc_trim(0) };
    info!("Full collection: malloc_trim released memory: {}", trimmed == 1);
}

#[cfg(not(all(target_os = "linux", target_env = "gnu")))]
fn release_to_os() {
    info!("Full collection: no allocator trim available on this platform");
}
