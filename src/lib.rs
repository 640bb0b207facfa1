#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Observable Core
//!
//! In-process publish/subscribe registry built around a fixed vocabulary of
//! named actions.
//!
//! ## Overview
//!
//! Callers declare action names up front, subscribe callback handlers against
//! one action or against the `"*"` wildcard channel, and later dispatch a
//! payload either to one action's handlers (plus every wildcard handler) or
//! to the wildcard channel alone. The registry is designed for frequent
//! handler churn: each action keeps its handlers in a dense power-of-two slot
//! array that doubles when full and halves (with compaction) when occupancy
//! drops, so memory stays proportioned to live subscriptions.
//!
//! ## Module Organization
//!
//! - [`catalog`] - Fixed-capacity action name/ID table with the reserved wildcard
//! - [`registry`] - Handler storage, slot arrays, and the dispatch paths
//! - [`observable`] - The public facade owning one catalog and one registry
//! - [`shared`] - Coarse-locked cloneable handle for multi-owner use
//! - [`config`] - Capacity tuning
//! - [`error`] - Structured error handling
//! - [`logging`] - Console tracing initialization for binaries
//!
//! ## Quick Start
//!
//! ```rust
//! use observable_core::Observable;
//!
//! let mut observable: Observable<String> = Observable::new();
//! observable.append_action_type("change")?;
//!
//! let id = observable.on("change", |payload| println!("changed: {payload}"))?;
//! observable.push_action_update("change", &"config.toml".to_string())?;
//! observable.unsubscribe(id);
//! # Ok::<(), observable_core::ObservableError>(())
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod logging;
pub mod observable;
pub mod registry;
pub mod shared;

pub use catalog::{ActionCatalog, ActionId, RegisterOutcome, WILDCARD_ACTION};
pub use config::ObservableConfig;
pub use error::{ObservableError, Result};
pub use observable::{ActionStats, Observable, ObservableStats};
pub use registry::{Callback, HandlerDetail, HandlerId, HandlerRegistry};
pub use shared::SharedObservable;
