//! Keyed debouncing for document scans.
//!
//! Each key (a document URI in the server) owns at most one pending task.
//! Scheduling again for the same key aborts the pending task and starts a
//! fresh quiet window. Keys never affect each other.

use std::future::Future;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tokio::task::AbortHandle;
use tracing::trace;

#[derive(Debug)]
struct Pending {
    generation: u64,
    handle: AbortHandle,
}

/// A registry of cancellable delayed tasks, one per key.
#[derive(Debug)]
pub struct Debouncer<K: Eq + Hash> {
    delay: Duration,
    pending: Arc<DashMap<K, Pending>>,
    generation: AtomicU64,
}

impl<K> Debouncer<K>
where
    K: Eq + Hash + Clone + Send + Sync + std::fmt::Debug + 'static,
{
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Arc::new(DashMap::new()),
            generation: AtomicU64::new(0),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Run `task` once `key` has been quiet for the debounce delay.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule<F, Fut>(&self, key: K, task: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let generation = self.generation.fetch_add(1, Ordering::Relaxed);
        let pending = Arc::clone(&self.pending);
        let delay = self.delay;
        let task_key = key.clone();

        // Holding the entry keeps the task's own removal behind our insert
        let slot = self.pending.entry(key);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Once the window elapsed the task is no longer cancellable
            pending.remove_if(&task_key, |_, p| p.generation == generation);
            task().await;
        });
        let entry = Pending {
            generation,
            handle: handle.abort_handle(),
        };

        match slot {
            Entry::Occupied(mut occupied) => {
                let previous = occupied.insert(entry);
                trace!(generation = previous.generation, "superseding pending task");
                previous.handle.abort();
            }
            Entry::Vacant(vacant) => {
                vacant.insert(entry);
            }
        }
    }

    /// Drop the pending task for `key`, if any. Returns whether one was pending.
    pub fn cancel(&self, key: &K) -> bool {
        match self.pending.remove(key) {
            Some((_, p)) => {
                p.handle.abort();
                true
            }
            None => false,
        }
    }

    pub fn is_pending(&self, key: &K) -> bool {
        self.pending.contains_key(key)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}
