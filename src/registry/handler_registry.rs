//! Registry for handler storage and dispatch.
//!
//! ## Overview
//!
//! The `HandlerRegistry` owns every registered handler, keyed by a globally
//! unique handler ID, and one slot array per action referencing those IDs.
//! Subscribing stores the handler and appends its ID into the owning action's
//! slot array; dispatch walks a slot array in order and invokes each live
//! handler's callback; unsubscribing zeroes the slot and retires the ID.
//!
//! Handler IDs start at 1 and are never reused, even after removal, so a
//! stale ID can never collide with a later registration. 0 is reserved as the
//! vacant-slot sentinel.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, trace};

use crate::catalog::ActionId;
use crate::registry::slots::SlotArray;

/// Registry-unique handler identifier. Always non-zero.
pub type HandlerId = u64;

/// Callback signature for subscribed handlers.
pub type Callback<T> = Box<dyn FnMut(&T) + Send>;

/// One stored registration: the owning action plus its callback. The
/// registry is the only place the callback lives.
struct Handler<T> {
    action: ActionId,
    callback: Callback<T>,
    subscribed_at: DateTime<Utc>,
    invocations: u64,
}

/// Point-in-time view of one live registration.
#[derive(Debug, Clone, Serialize)]
pub struct HandlerDetail {
    pub handler_id: HandlerId,
    pub action_id: ActionId,
    pub subscribed_at: DateTime<Utc>,
    pub invocations: u64,
}

/// Owns all handlers and the per-action slot arrays referencing them.
pub struct HandlerRegistry<T> {
    /// Handler storage keyed by ID.
    handlers: HashMap<HandlerId, Handler<T>>,
    /// Per-action slot arrays, lazily created on first subscription and
    /// never destroyed while the registry lives.
    slots: HashMap<ActionId, SlotArray>,
    /// Next handler ID to issue. Starts at 1; 0 is the vacant sentinel.
    next_id: HandlerId,
    /// Initial length for newly created slot arrays.
    initial_slot_len: usize,
    /// Total callback invocations across all dispatches.
    total_invocations: u64,
}

impl<T> HandlerRegistry<T> {
    pub fn new(initial_slot_len: usize) -> Self {
        Self {
            handlers: HashMap::new(),
            slots: HashMap::new(),
            next_id: 1,
            initial_slot_len,
            total_invocations: 0,
        }
    }

    /// Store a handler against `action` and return its never-reused ID.
    pub fn subscribe<F>(&mut self, action: ActionId, callback: F) -> HandlerId
    where
        F: FnMut(&T) + Send + 'static,
    {
        let initial_len = self.initial_slot_len;
        let array = self
            .slots
            .entry(action)
            .or_insert_with(|| SlotArray::new(initial_len));

        let id = self.next_id;
        self.next_id += 1;
        array.push(id);

        self.handlers.insert(
            id,
            Handler {
                action,
                callback: Box::new(callback),
                subscribed_at: Utc::now(),
                invocations: 0,
            },
        );

        debug!("Subscribed handler {} to action {}", id, action);
        id
    }

    /// Remove one registration. The 0 sentinel and unknown or already
    /// retired IDs are no-ops, so repeated calls are harmless.
    pub fn unsubscribe(&mut self, id: HandlerId) {
        let Some(handler) = self.handlers.remove(&id) else {
            trace!("Unsubscribe for unknown handler {} ignored", id);
            return;
        };

        if let Some(array) = self.slots.get_mut(&handler.action) {
            array.remove(id);
        }

        debug!("Unsubscribed handler {} from action {}", id, handler.action);
    }

    /// Invoke every live handler of `action` in slot order. A panicking
    /// callback propagates to the caller, aborting the remaining
    /// invocations; the registry provides no isolation between handlers.
    pub fn dispatch(&mut self, action: ActionId, payload: &T) {
        let Some(array) = self.slots.get(&action) else {
            return;
        };

        trace!("Dispatching to {} handler(s) of action {}", array.live(), action);
        for id in array.iter_live() {
            if let Some(handler) = self.handlers.get_mut(&id) {
                (handler.callback)(payload);
                handler.invocations += 1;
                self.total_invocations += 1;
            }
        }
    }

    /// Count of live handlers for `action`; 0 when no slot array exists yet.
    pub fn live_count(&self, action: ActionId) -> usize {
        self.slots.get(&action).map_or(0, SlotArray::live)
    }

    /// Total live handlers across all actions.
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    pub fn total_invocations(&self) -> u64 {
        self.total_invocations
    }

    /// Slot array length for `action`; 0 when no array exists yet.
    pub(crate) fn slot_capacity(&self, action: ActionId) -> usize {
        self.slots.get(&action).map_or(0, SlotArray::capacity)
    }

    /// Live registrations ordered by handler ID.
    pub(crate) fn handler_details(&self) -> Vec<HandlerDetail> {
        let mut details: Vec<_> = self
            .handlers
            .iter()
            .map(|(&handler_id, h)| HandlerDetail {
                handler_id,
                action_id: h.action,
                subscribed_at: h.subscribed_at,
                invocations: h.invocations,
            })
            .collect();
        details.sort_by_key(|d| d.handler_id);
        details
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    fn counting_handler(counter: &Arc<AtomicU64>) -> impl FnMut(&u8) + Send + 'static {
        let counter = Arc::clone(counter);
        move |_| {
            counter.fetch_add(1, Ordering::Relaxed);
        }
    }

    #[test]
    fn test_ids_start_at_one_and_increase() {
        let mut registry: HandlerRegistry<u8> = HandlerRegistry::new(32);
        let first = registry.subscribe(0, |_| {});
        let second = registry.subscribe(1, |_| {});
        assert_eq!(first, 1);
        assert_eq!(second, 2);
    }

    #[test]
    fn test_ids_not_reused_after_unsubscribe() {
        let mut registry: HandlerRegistry<u8> = HandlerRegistry::new(32);
        let first = registry.subscribe(0, |_| {});
        registry.unsubscribe(first);
        let second = registry.subscribe(0, |_| {});
        assert_ne!(first, second);
    }

    #[test]
    fn test_dispatch_only_hits_the_target_action() {
        let mut registry: HandlerRegistry<u8> = HandlerRegistry::new(32);
        let hits_a = Arc::new(AtomicU64::new(0));
        let hits_b = Arc::new(AtomicU64::new(0));
        registry.subscribe(1, counting_handler(&hits_a));
        registry.subscribe(2, counting_handler(&hits_b));

        registry.dispatch(1, &0);
        assert_eq!(hits_a.load(Ordering::Relaxed), 1);
        assert_eq!(hits_b.load(Ordering::Relaxed), 0);
        assert_eq!(registry.total_invocations(), 1);
    }

    #[test]
    fn test_dispatch_to_action_without_array_is_noop() {
        let mut registry: HandlerRegistry<u8> = HandlerRegistry::new(32);
        registry.dispatch(7, &0);
        assert_eq!(registry.total_invocations(), 0);
    }

    #[test]
    fn test_unsubscribe_sentinel_and_unknown_are_noops() {
        let mut registry: HandlerRegistry<u8> = HandlerRegistry::new(32);
        let hits = Arc::new(AtomicU64::new(0));
        registry.subscribe(0, counting_handler(&hits));

        registry.unsubscribe(0);
        registry.unsubscribe(99);
        registry.dispatch(0, &0);
        assert_eq!(hits.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_handler_details_track_invocations() {
        let mut registry: HandlerRegistry<u8> = HandlerRegistry::new(32);
        let id = registry.subscribe(0, |_| {});
        registry.dispatch(0, &0);
        registry.dispatch(0, &0);

        let details = registry.handler_details();
        assert_eq!(details.len(), 1);
        assert_eq!(details[0].handler_id, id);
        assert_eq!(details[0].invocations, 2);
    }
}
