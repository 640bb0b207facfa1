//! # Action Catalog
//!
//! Fixed-capacity, append-only table of known action names.
//!
//! ## Overview
//!
//! Action types must be declared before they can be subscribed to or
//! dispatched by name. The catalog maps each name to a dense integer ID
//! assigned in first-registration order; IDs are never reused or reassigned.
//! ID 0 is the reserved `"*"` wildcard, pre-registered at construction, which
//! matches every dispatch.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::error::{ObservableError, Result};

/// Dense identifier for a registered action. 0 is always the wildcard.
pub type ActionId = usize;

/// Reserved name matching every action.
pub const WILDCARD_ACTION: &str = "*";

/// Outcome of declaring an action name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterOutcome {
    /// The name was new; a fresh sequential ID was assigned.
    Registered(ActionId),
    /// The name was already known; the existing ID is returned unchanged.
    AlreadyRegistered(ActionId),
}

impl RegisterOutcome {
    /// The ID the name maps to, new or pre-existing.
    pub fn action_id(self) -> ActionId {
        match self {
            Self::Registered(id) | Self::AlreadyRegistered(id) => id,
        }
    }
}

/// Fixed-capacity name/ID table for action types.
pub struct ActionCatalog {
    /// Names in ID order; index is the ActionId.
    names: Vec<String>,
    /// Reverse mapping from name to ID.
    ids: HashMap<String, ActionId>,
    /// Fixed table size, set at construction.
    capacity: usize,
}

impl ActionCatalog {
    /// Create a catalog with the wildcard pre-registered as ID 0. A capacity
    /// below 1 is raised to 1 so the wildcard always fits.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let mut catalog = Self {
            names: Vec::with_capacity(capacity),
            ids: HashMap::with_capacity(capacity),
            capacity,
        };
        catalog
            .register(WILDCARD_ACTION)
            .expect("wildcard always fits in a fresh catalog");
        catalog
    }

    /// Declare an action name. Duplicate names are a benign no-op that keeps
    /// the original ID; a full table fails with `CapacityExceeded`.
    pub fn register(&mut self, name: &str) -> Result<RegisterOutcome> {
        if let Some(&id) = self.ids.get(name) {
            debug!("Action '{}' already registered with id {}", name, id);
            return Ok(RegisterOutcome::AlreadyRegistered(id));
        }

        if self.names.len() >= self.capacity {
            return Err(ObservableError::CapacityExceeded {
                capacity: self.capacity,
            });
        }

        let id = self.names.len();
        self.names.push(name.to_string());
        self.ids.insert(name.to_string(), id);

        info!("Registered action '{}' with id {}", name, id);
        Ok(RegisterOutcome::Registered(id))
    }

    /// Look up the ID for a name. Pure lookup, no side effects.
    pub fn resolve(&self, name: &str) -> Option<ActionId> {
        self.ids.get(name).copied()
    }

    /// The reserved match-all action ID.
    pub fn wildcard(&self) -> ActionId {
        0
    }

    /// The display name for an ID, if assigned.
    pub fn name(&self, id: ActionId) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    /// Number of registered actions, wildcard included.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Always false: the wildcard exists from construction on.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Registered (ID, name) pairs in ID order.
    pub fn iter(&self) -> impl Iterator<Item = (ActionId, &str)> {
        self.names.iter().enumerate().map(|(id, n)| (id, n.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wildcard_preregistered_as_zero() {
        let catalog = ActionCatalog::new(32);
        assert_eq!(catalog.resolve(WILDCARD_ACTION), Some(0));
        assert_eq!(catalog.wildcard(), 0);
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_zero_capacity_still_holds_the_wildcard() {
        let catalog = ActionCatalog::new(0);
        assert_eq!(catalog.resolve(WILDCARD_ACTION), Some(0));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_sequential_id_assignment() {
        let mut catalog = ActionCatalog::new(32);
        let change = catalog.register("change").unwrap();
        let create = catalog.register("create").unwrap();

        assert_eq!(change, RegisterOutcome::Registered(1));
        assert_eq!(create, RegisterOutcome::Registered(2));
        assert_eq!(catalog.name(1), Some("change"));
        assert_eq!(catalog.resolve("create"), Some(2));
    }

    #[test]
    fn test_duplicate_registration_keeps_id() {
        let mut catalog = ActionCatalog::new(32);
        catalog.register("change").unwrap();
        catalog.register("create").unwrap();

        let again = catalog.register("change").unwrap();
        assert_eq!(again, RegisterOutcome::AlreadyRegistered(1));
        assert_eq!(again.action_id(), 1);
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_capacity_exceeded() {
        let mut catalog = ActionCatalog::new(2);
        catalog.register("change").unwrap();

        let err = catalog.register("create").unwrap_err();
        assert_eq!(err, ObservableError::CapacityExceeded { capacity: 2 });
        // A duplicate is still benign when the table is full.
        assert_eq!(
            catalog.register("change").unwrap(),
            RegisterOutcome::AlreadyRegistered(1)
        );
    }

    #[test]
    fn test_unknown_name_resolves_to_none() {
        let catalog = ActionCatalog::new(32);
        assert_eq!(catalog.resolve("missing"), None);
    }
}
