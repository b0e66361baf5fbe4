//! GetEntityHandler - Query handler hydrating detail and edit views.

use std::sync::Arc;

use tracing::debug;

use crate::adapters::PagedResultCache;
use crate::domain::foundation::EntityId;
use crate::domain::listing::{ListError, ListFeature};
use crate::ports::{ListResource, PermissionChecker};

/// Query for one record of a feature.
#[derive(Debug, Clone)]
pub struct GetEntityQuery {
    pub id: EntityId,
    /// Skip the entity cache and always ask the server.
    pub refresh: bool,
}

impl GetEntityQuery {
    pub fn cached(id: EntityId) -> Self {
        Self { id, refresh: false }
    }

    pub fn fresh(id: EntityId) -> Self {
        Self { id, refresh: true }
    }
}

/// Handler for loading a single record, cache first.
pub struct GetEntityHandler<L: ListFeature> {
    resource: Arc<dyn ListResource<L>>,
    cache: Arc<PagedResultCache<L>>,
    permissions: Arc<dyn PermissionChecker>,
}

impl<L: ListFeature> GetEntityHandler<L> {
    pub fn new(
        resource: Arc<dyn ListResource<L>>,
        cache: Arc<PagedResultCache<L>>,
        permissions: Arc<dyn PermissionChecker>,
    ) -> Self {
        Self {
            resource,
            cache,
            permissions,
        }
    }

    pub async fn handle(&self, query: GetEntityQuery) -> Result<L::Item, ListError> {
        if !self.permissions.has(L::READ_PERMISSION) {
            return Err(ListError::Forbidden(L::READ_PERMISSION.to_string()));
        }

        if !query.refresh {
            if let Some(item) = self.cache.get_by_id(&query.id).await {
                debug!(feature = L::NAME, id = %query.id, "Record served from cache");
                return Ok(item);
            }
        }

        let item = self.resource.get_by_id(&query.id).await?;
        self.cache.upsert_entity(&item).await;
        Ok(item)
    }
}
