//! Permission adapters.

mod in_memory;

pub use in_memory::InMemoryPermissionSet;
