//! Listing module - paged list state shared by every CRUD feature.
//!
//! - `query` - paged queries, filters and sortable columns
//! - `signature` - canonical request keys for de-duplication
//! - `pager` - pager widget reconciliation
//! - `snapshot` - cached list view for restore-on-return
//! - `status` - load status state machine
//! - `feature` - per-feature type bundle

mod errors;
mod feature;
mod pager;
mod query;
mod signature;
mod snapshot;
mod status;

pub use errors::ListError;
pub use feature::{Draft, Identifiable, ListFeature, Mutation};
pub use pager::{
    total_pages, PageChange, PagerBridge, PagerEvent, PagerKey, PagerUpdate, FALLBACK_PAGE_SIZE,
};
pub use query::{FilterState, FilterValue, Filters, Page, PagedQuery, SortField, DEFAULT_PAGE_SIZE};
pub use signature::{compute_signature, QuerySignature};
pub use snapshot::ListViewSnapshot;
pub use status::{ListStatus, StateMachine};
