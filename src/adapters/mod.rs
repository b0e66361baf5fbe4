//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the list core to external systems:
//! - `rest` - `ListResource` over the Servfarma HTTP API (reqwest)
//! - `cache` - In-memory paged result cache
//! - `notify` - `ErrorNotifier` backed by tracing
//! - `permissions` - In-memory `PermissionChecker`
//! - `mock` - Scripted `ListResource` for tests

pub mod cache;
pub mod mock;
pub mod notify;
pub mod permissions;
pub mod rest;

pub use cache::PagedResultCache;
pub use mock::MockListResource;
pub use notify::TracingNotifier;
pub use permissions::InMemoryPermissionSet;
pub use rest::{FieldCodec, RestClient, RestConfig, RestFeature, RestResource};
