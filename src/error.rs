//! Structured error handling for the observable registry.
//!
//! Every error carries a human-readable message via [`std::fmt::Display`] and
//! a numeric classification via [`ObservableError::code`] so callers can
//! branch without string matching. Failing operations return before mutating
//! any registry state.

use thiserror::Error;

/// Errors surfaced by the observable registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ObservableError {
    /// A name was used with `on` or `push_action_update` without being
    /// declared through `append_action_type` first.
    #[error("Action [{name}] is not registered for this Observable; call append_action_type(\"{name}\") first")]
    UnknownAction { name: String },

    /// The fixed action table is full; no further names can be declared.
    #[error("Action catalog is full: all {capacity} action slots are taken")]
    CapacityExceeded { capacity: usize },
}

impl ObservableError {
    /// Machine-checkable classification code for this error kind.
    pub fn code(&self) -> u16 {
        match self {
            Self::UnknownAction { .. } => 400,
            Self::CapacityExceeded { .. } => 507,
        }
    }
}

pub type Result<T> = std::result::Result<T, ObservableError>;
