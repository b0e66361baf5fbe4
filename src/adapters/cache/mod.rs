//! Cache adapters.

mod paged_result_cache;

pub use paged_result_cache::PagedResultCache;
