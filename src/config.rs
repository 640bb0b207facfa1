//! Configuration for observable instances.

use serde::{Deserialize, Serialize};

/// Capacity tuning for an [`Observable`](crate::Observable) instance.
///
/// Defaults to 32 action types (wildcard included) and 32 initial handler
/// slots per action.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservableConfig {
    /// Number of entries in the fixed action catalog, wildcard included.
    pub action_capacity: usize,
    /// Starting length of each per-action slot array. Rounded up to the
    /// next power of two; slot arrays never shrink below this length.
    pub initial_slot_capacity: usize,
}

impl Default for ObservableConfig {
    fn default() -> Self {
        Self {
            action_capacity: 32,
            initial_slot_capacity: 32,
        }
    }
}

impl ObservableConfig {
    /// Load a configuration from a JSON document, falling back to defaults
    /// for absent fields.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
