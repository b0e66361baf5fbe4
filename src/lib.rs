//! Servfarma Admin - list-state core of the administrative dashboard
//!
//! Keeps server-side pagination, sorting and filters of the CRUD lists
//! (product groups, pharmaceutical forms, users, permissions) in step with
//! the pager widget, caches the last page so returning from a detail view
//! needs no request, and drops redundant or superseded requests.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
