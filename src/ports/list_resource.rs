//! List resource port - the REST collection behind a feature list.
//!
//! The controller and handlers only ever talk to a feature's backend through
//! this trait. Transport concerns (timeouts, auth headers, key casing) belong
//! to the adapter.

use async_trait::async_trait;

use crate::domain::foundation::EntityId;
use crate::domain::listing::{ListError, ListFeature, Page, PagedQuery};

/// CRUD collection of one feature.
#[async_trait]
pub trait ListResource<L: ListFeature>: Send + Sync {
    /// Fetches one page. Items come back in server order.
    async fn list(&self, query: &PagedQuery<L::Sort>) -> Result<Page<L::Item>, ListError>;

    /// Fetches a single record.
    ///
    /// Returns `ListError::NotFound` when the id is unknown.
    async fn get_by_id(&self, id: &EntityId) -> Result<L::Item, ListError>;

    /// Creates a record and returns it as stored by the server.
    async fn create(&self, draft: &L::Draft) -> Result<L::Item, ListError>;

    /// Replaces the editable fields of a record.
    async fn update(&self, id: &EntityId, draft: &L::Draft) -> Result<L::Item, ListError>;
}
