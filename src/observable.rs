//! # Observable
//!
//! Public facade over one [`ActionCatalog`] and one [`HandlerRegistry`].
//!
//! ## Overview
//!
//! An `Observable<T>` broadcasts payloads of type `T` to subscribed callback
//! handlers. Action names must be declared with
//! [`append_action_type`](Observable::append_action_type) before they can be
//! used with [`on`](Observable::on) or
//! [`push_action_update`](Observable::push_action_update); the `"*"` wildcard
//! channel always exists and receives every dispatch.
//!
//! Each instance owns its whole state; there is no ambient or static sharing
//! between instances. All calls are synchronous and complete before
//! returning.
//!
//! ## Usage
//!
//! ```rust
//! use observable_core::Observable;
//!
//! # fn example() -> Result<(), observable_core::ObservableError> {
//! let mut observable: Observable<u32> = Observable::new();
//! observable.append_action_type("change")?.append_action_type("delete")?;
//!
//! let all = observable.subscribe(|n| println!("any action: {n}"));
//! let changes = observable.on("change", |n| println!("change: {n}"))?;
//!
//! observable.push_action_update("change", &7)?; // fires both handlers
//! observable.push_update(&7); // fires only the wildcard handler
//!
//! observable.unsubscribe(changes);
//! observable.unsubscribe(all);
//! # Ok(())
//! # }
//! ```

use std::fmt;

use serde::Serialize;

use crate::catalog::{ActionCatalog, ActionId, WILDCARD_ACTION};
use crate::config::ObservableConfig;
use crate::error::{ObservableError, Result};
use crate::registry::{HandlerDetail, HandlerId, HandlerRegistry};

/// In-process publish/subscribe registry for payloads of type `T`.
pub struct Observable<T> {
    catalog: ActionCatalog,
    registry: HandlerRegistry<T>,
}

impl<T> Observable<T> {
    /// Create an observable with the default capacities: 32 action types
    /// and 32 initial handler slots per action.
    pub fn new() -> Self {
        Self::with_config(ObservableConfig::default())
    }

    pub fn with_config(config: ObservableConfig) -> Self {
        Self {
            catalog: ActionCatalog::new(config.action_capacity),
            registry: HandlerRegistry::new(config.initial_slot_capacity),
        }
    }

    /// Declare an action name. Chainable; declaring a known name again is a
    /// benign no-op that keeps the original ID. Fails with
    /// `CapacityExceeded` once the catalog is full.
    pub fn append_action_type(&mut self, action: &str) -> Result<&mut Self> {
        self.catalog.register(action)?;
        Ok(self)
    }

    /// Live handler count for `action`. 0 for names never declared or never
    /// subscribed to. Use `"*"` for the wildcard channel.
    pub fn subscriber_count(&self, action: &str) -> usize {
        match self.catalog.resolve(action) {
            Some(id) => self.registry.live_count(id),
            None => 0,
        }
    }

    /// Subscribe to every action. The returned ID is the only token that can
    /// later remove this registration.
    pub fn subscribe<F>(&mut self, callback: F) -> HandlerId
    where
        F: FnMut(&T) + Send + 'static,
    {
        self.registry.subscribe(self.catalog.wildcard(), callback)
    }

    /// Subscribe to one named action. `on("*", ..)` is equivalent to
    /// [`subscribe`](Self::subscribe). Fails with `UnknownAction` for names
    /// never declared.
    pub fn on<F>(&mut self, action: &str, callback: F) -> Result<HandlerId>
    where
        F: FnMut(&T) + Send + 'static,
    {
        if action == WILDCARD_ACTION {
            return Ok(self.subscribe(callback));
        }

        let id = self
            .catalog
            .resolve(action)
            .ok_or_else(|| ObservableError::UnknownAction {
                name: action.to_string(),
            })?;
        Ok(self.registry.subscribe(id, callback))
    }

    /// Remove one registration. The 0 sentinel and unknown or already
    /// retired IDs are no-ops, so repeated calls are harmless.
    pub fn unsubscribe(&mut self, id: HandlerId) {
        self.registry.unsubscribe(id);
    }

    /// Dispatch to wildcard subscribers only, in registration order.
    pub fn push_update(&mut self, payload: &T) {
        self.registry.dispatch(self.catalog.wildcard(), payload);
    }

    /// Dispatch to `action`'s subscribers in registration order, then to all
    /// wildcard subscribers. Fails with `UnknownAction` before any handler
    /// runs when `action` was never declared. Passing `"*"` walks the
    /// wildcard channel twice: once as the named action, once as the
    /// trailing wildcard pass.
    pub fn push_action_update(&mut self, action: &str, payload: &T) -> Result<()> {
        let id = self
            .catalog
            .resolve(action)
            .ok_or_else(|| ObservableError::UnknownAction {
                name: action.to_string(),
            })?;

        self.registry.dispatch(id, payload);
        self.push_update(payload);
        Ok(())
    }

    /// Snapshot of catalog and registry counters.
    pub fn stats(&self) -> ObservableStats {
        let actions = self
            .catalog
            .iter()
            .map(|(id, name)| ActionStats {
                action_id: id,
                name: name.to_string(),
                live_handlers: self.registry.live_count(id),
                slot_capacity: self.registry.slot_capacity(id),
            })
            .collect();

        ObservableStats {
            total_actions: self.catalog.len(),
            total_handlers: self.registry.handler_count(),
            total_invocations: self.registry.total_invocations(),
            actions,
            handlers: self.registry.handler_details(),
        }
    }
}

impl<T> Default for Observable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("actions", &self.catalog.len())
            .field("handlers", &self.registry.handler_count())
            .finish()
    }
}

/// Point-in-time counters for a whole observable instance.
#[derive(Debug, Clone, Serialize)]
pub struct ObservableStats {
    pub total_actions: usize,
    pub total_handlers: usize,
    pub total_invocations: u64,
    pub actions: Vec<ActionStats>,
    pub handlers: Vec<HandlerDetail>,
}

/// Counters for one registered action.
#[derive(Debug, Clone, Serialize)]
pub struct ActionStats {
    pub action_id: ActionId,
    pub name: String,
    /// Occupied slots (live handlers).
    pub live_handlers: usize,
    /// Slot array length; 0 until the first subscription.
    pub slot_capacity: usize,
}
