//! Application layer - Controllers, Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! The list controller owns read state; save and detail handlers go through
//! it so the cached list stays consistent with mutations.

pub mod handlers;

pub use handlers::{
    GetEntityHandler, GetEntityQuery, ListController, ListSettings, ListView, LoadOutcome,
    MountOutcome, SaveEntityCommand, SaveEntityHandler,
};
