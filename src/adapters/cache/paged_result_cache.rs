//! In-Memory Paged Result Cache
//!
//! Holds, for one feature, the last-known copy of every record seen in a
//! list or detail fetch plus the single list snapshot used to restore the
//! table when the user navigates back to it.
//!
//! Every read returns a clone, so callers can freely mutate what they get
//! back. Entity entries outlive snapshot clears: a detail view can hydrate
//! from the entity map even after a create invalidated the list.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::EntityId;
use crate::domain::listing::{Identifiable, ListFeature, ListViewSnapshot};

/// Id-keyed record cache plus list snapshot for one feature.
#[derive(Debug)]
pub struct PagedResultCache<L: ListFeature> {
    entities: Arc<RwLock<HashMap<EntityId, L::Item>>>,
    snapshot: Arc<RwLock<Option<ListViewSnapshot<L>>>>,
}

impl<L: ListFeature> Clone for PagedResultCache<L> {
    fn clone(&self) -> Self {
        Self {
            entities: Arc::clone(&self.entities),
            snapshot: Arc::clone(&self.snapshot),
        }
    }
}

impl<L: ListFeature> PagedResultCache<L> {
    /// Create an empty cache
    pub fn new() -> Self {
        Self {
            entities: Arc::new(RwLock::new(HashMap::new())),
            snapshot: Arc::new(RwLock::new(None)),
        }
    }

    /// Store or replace a record by id.
    pub async fn upsert_entity(&self, item: &L::Item) {
        self.entities
            .write()
            .await
            .insert(item.entity_id(), item.clone());
    }

    /// Store or replace several records under a single lock.
    pub async fn upsert_entities(&self, items: &[L::Item]) {
        let mut entities = self.entities.write().await;
        for item in items {
            entities.insert(item.entity_id(), item.clone());
        }
    }

    /// Copy of the cached record, if any.
    pub async fn get_by_id(&self, id: &EntityId) -> Option<L::Item> {
        self.entities.read().await.get(id).cloned()
    }

    /// Replace the stored snapshot wholesale.
    pub async fn set_list_snapshot(&self, snapshot: &ListViewSnapshot<L>) {
        *self.snapshot.write().await = Some(snapshot.clone());
    }

    /// Copy of the stored snapshot, if any.
    pub async fn get_list_snapshot(&self) -> Option<ListViewSnapshot<L>> {
        self.snapshot.read().await.clone()
    }

    /// Upsert a record and patch it in place inside the snapshot.
    ///
    /// Returns true when the snapshot contained the record. Row order is
    /// preserved; a record absent from the snapshot leaves it untouched.
    pub async fn update_list_item(&self, updated: &L::Item) -> bool {
        let mut entities = self.entities.write().await;
        let mut snapshot = self.snapshot.write().await;

        entities.insert(updated.entity_id(), updated.clone());
        snapshot
            .as_mut()
            .is_some_and(|snapshot| snapshot.replace_item(updated))
    }

    /// Drop the snapshot, keeping cached records.
    pub async fn clear_list_snapshot(&self) {
        *self.snapshot.write().await = None;
    }

    /// Drop records and snapshot.
    pub async fn clear_all(&self) {
        let mut entities = self.entities.write().await;
        let mut snapshot = self.snapshot.write().await;
        entities.clear();
        *snapshot = None;
    }

    /// Number of cached records
    pub async fn entity_count(&self) -> usize {
        self.entities.read().await.len()
    }

    pub async fn has_snapshot(&self) -> bool {
        self.snapshot.read().await.is_some()
    }
}

impl<L: ListFeature> Default for PagedResultCache<L> {
    fn default() -> Self {
        Self::new()
    }
}
