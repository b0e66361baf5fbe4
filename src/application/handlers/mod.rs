//! Application handlers.
//!
//! Controllers and command/query handlers that orchestrate list operations.

pub mod listing;

pub use listing::{
    // List state
    ListController,
    ListSettings,
    ListView,
    LoadOutcome,
    MountOutcome,
    // Detail and save
    GetEntityHandler,
    GetEntityQuery,
    SaveEntityCommand,
    SaveEntityHandler,
};
