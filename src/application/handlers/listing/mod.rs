//! Listing handlers - list controller plus detail and save handlers.

mod get_entity;
mod list_controller;
mod save_entity;

pub use get_entity::{GetEntityHandler, GetEntityQuery};
pub use list_controller::{ListController, ListSettings, ListView, LoadOutcome, MountOutcome};
pub use save_entity::{SaveEntityCommand, SaveEntityHandler};
