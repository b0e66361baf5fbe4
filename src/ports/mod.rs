//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the list core and the outside world. Adapters implement these ports.
//!
//! - `ListResource` - REST collection of a feature (list, get, create, update)
//! - `PagerView` - Table/pager widget that renders applied pages
//! - `ErrorNotifier` - User-facing failure reporting
//! - `PermissionChecker` - Capability predicate over the loaded permission set

mod error_notifier;
mod list_resource;
mod pager_view;
mod permission_checker;

pub use error_notifier::ErrorNotifier;
pub use list_resource::ListResource;
pub use pager_view::PagerView;
pub use permission_checker::PermissionChecker;
