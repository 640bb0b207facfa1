//! Coarse-locked shared handle over an [`Observable`].
//!
//! The registry's handler table, slot arrays, and counters form one logical
//! unit of mutable state, so the shared adaptation guards the whole
//! [`Observable`] with a single `parking_lot::Mutex`. Every call holds the
//! lock for its duration. Dispatch runs callbacks under the lock: a callback
//! must not call back into the same handle, or it will deadlock.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::Result;
use crate::observable::{Observable, ObservableStats};
use crate::registry::HandlerId;

/// Cloneable, thread-safe handle to one [`Observable`]. Clones share the
/// same underlying registry.
pub struct SharedObservable<T> {
    inner: Arc<Mutex<Observable<T>>>,
}

impl<T> Clone for SharedObservable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> SharedObservable<T> {
    pub fn new() -> Self {
        Self::from_observable(Observable::new())
    }

    /// Wrap an already-configured observable.
    pub fn from_observable(observable: Observable<T>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(observable)),
        }
    }

    pub fn append_action_type(&self, action: &str) -> Result<&Self> {
        self.inner.lock().append_action_type(action)?;
        Ok(self)
    }

    pub fn subscriber_count(&self, action: &str) -> usize {
        self.inner.lock().subscriber_count(action)
    }

    pub fn subscribe<F>(&self, callback: F) -> HandlerId
    where
        F: FnMut(&T) + Send + 'static,
    {
        self.inner.lock().subscribe(callback)
    }

    pub fn on<F>(&self, action: &str, callback: F) -> Result<HandlerId>
    where
        F: FnMut(&T) + Send + 'static,
    {
        self.inner.lock().on(action, callback)
    }

    pub fn unsubscribe(&self, id: HandlerId) {
        self.inner.lock().unsubscribe(id);
    }

    pub fn push_update(&self, payload: &T) {
        self.inner.lock().push_update(payload);
    }

    pub fn push_action_update(&self, action: &str, payload: &T) -> Result<()> {
        self.inner.lock().push_action_update(action, payload)
    }

    pub fn stats(&self) -> ObservableStats {
        self.inner.lock().stats()
    }
}

impl<T> Default for SharedObservable<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_clones_share_one_registry() {
        let shared: SharedObservable<u8> = SharedObservable::new();
        let other = shared.clone();

        shared.subscribe(|_| {});
        assert_eq!(other.subscriber_count("*"), 1);
    }

    #[test]
    fn test_concurrent_subscribe_and_dispatch() {
        let shared: SharedObservable<u64> = SharedObservable::new();
        shared.append_action_type("change").unwrap();

        let hits = Arc::new(AtomicU64::new(0));
        let mut workers = Vec::new();
        for _ in 0..4 {
            let handle = shared.clone();
            let hits = Arc::clone(&hits);
            workers.push(thread::spawn(move || {
                for i in 0..50 {
                    let hits = Arc::clone(&hits);
                    let id = handle
                        .on("change", move |_| {
                            hits.fetch_add(1, Ordering::Relaxed);
                        })
                        .unwrap();
                    handle.push_action_update("change", &i).unwrap();
                    handle.unsubscribe(id);
                }
            }));
        }
        for worker in workers {
            worker.join().unwrap();
        }

        // Every dispatch saw at least its own handler.
        assert!(hits.load(Ordering::Relaxed) >= 200);
        assert_eq!(shared.subscriber_count("change"), 0);
    }
}
