//! Domain layer containing list-state rules and feature types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (ids, timestamps, errors)
//! - `listing` - Paged queries, signatures, pager reconciliation, snapshots
//! - `catalog` - The CRUD features of the admin dashboard

pub mod catalog;
pub mod foundation;
pub mod listing;
