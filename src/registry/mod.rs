//! # Handler Registry
//!
//! Handler storage, per-action slot arrays, and the dispatch paths.

pub mod handler_registry;
pub(crate) mod slots;

pub use handler_registry::{Callback, HandlerDetail, HandlerId, HandlerRegistry};
