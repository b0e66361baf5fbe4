//! Mock List Resource for testing.
//!
//! Serves pages out of an in-memory row set so controllers and handlers can
//! be exercised without an API server.
//!
//! # Features
//!
//! - Pages sliced from a configurable row set
//! - Queued failures for error-path testing
//! - Per-call delays for out-of-order response testing
//! - Query and call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let resource = MockListResource::<ProductGroups>::new()
//!     .with_rows(groups)
//!     .with_list_delay(Duration::from_millis(50));
//!
//! let page = resource.list(&query).await?;
//! assert_eq!(resource.list_calls(), 1);
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::foundation::EntityId;
use crate::domain::listing::{Identifiable, ListError, ListFeature, Page, PagedQuery};
use crate::ports::ListResource;

/// In-memory `ListResource` with scripted behavior.
#[derive(Debug)]
pub struct MockListResource<L: ListFeature> {
    /// Server-side data set, in server order.
    rows: Arc<Mutex<Vec<L::Item>>>,
    /// Errors returned by the next list calls, consumed in order.
    list_failures: Arc<Mutex<VecDeque<ListError>>>,
    /// Delays applied to the next list calls, consumed in order.
    list_delays: Arc<Mutex<VecDeque<Duration>>>,
    /// Results of create/update calls, consumed in order.
    mutation_results: Arc<Mutex<VecDeque<Result<L::Item, ListError>>>>,
    /// Every list query received.
    queries: Arc<Mutex<Vec<PagedQuery<L::Sort>>>>,
    /// Every draft received by create/update.
    drafts: Arc<Mutex<Vec<L::Draft>>>,
    detail_calls: Arc<Mutex<usize>>,
}

impl<L: ListFeature> Clone for MockListResource<L> {
    fn clone(&self) -> Self {
        Self {
            rows: Arc::clone(&self.rows),
            list_failures: Arc::clone(&self.list_failures),
            list_delays: Arc::clone(&self.list_delays),
            mutation_results: Arc::clone(&self.mutation_results),
            queries: Arc::clone(&self.queries),
            drafts: Arc::clone(&self.drafts),
            detail_calls: Arc::clone(&self.detail_calls),
        }
    }
}

impl<L: ListFeature> Default for MockListResource<L> {
    fn default() -> Self {
        Self::new()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<L: ListFeature> MockListResource<L> {
    pub fn new() -> Self {
        Self {
            rows: Arc::new(Mutex::new(Vec::new())),
            list_failures: Arc::new(Mutex::new(VecDeque::new())),
            list_delays: Arc::new(Mutex::new(VecDeque::new())),
            mutation_results: Arc::new(Mutex::new(VecDeque::new())),
            queries: Arc::new(Mutex::new(Vec::new())),
            drafts: Arc::new(Mutex::new(Vec::new())),
            detail_calls: Arc::new(Mutex::new(0)),
        }
    }

    /// Replaces the server-side data set.
    pub fn with_rows(self, rows: Vec<L::Item>) -> Self {
        self.set_rows(rows);
        self
    }

    /// Delays the next list call.
    pub fn with_list_delay(self, delay: Duration) -> Self {
        self.delay_next(delay);
        self
    }

    /// Queues the result of the next create/update call.
    pub fn with_mutation_result(self, result: Result<L::Item, ListError>) -> Self {
        lock(&self.mutation_results).push_back(result);
        self
    }

    pub fn set_rows(&self, rows: Vec<L::Item>) {
        *lock(&self.rows) = rows;
    }

    /// Queues a delay for the next undelayed list call.
    pub fn delay_next(&self, delay: Duration) {
        lock(&self.list_delays).push_back(delay);
    }

    /// Makes the next list call fail with `error`.
    pub fn fail_next(&self, error: ListError) {
        lock(&self.list_failures).push_back(error);
    }

    /// Number of list calls received so far.
    pub fn list_calls(&self) -> usize {
        lock(&self.queries).len()
    }

    pub fn detail_calls(&self) -> usize {
        *lock(&self.detail_calls)
    }

    pub fn mutation_calls(&self) -> usize {
        lock(&self.drafts).len()
    }

    /// The most recent list query.
    pub fn last_query(&self) -> Option<PagedQuery<L::Sort>> {
        lock(&self.queries).last().cloned()
    }

    fn next_mutation(&self, draft: &L::Draft) -> Result<L::Item, ListError> {
        lock(&self.drafts).push(draft.clone());
        lock(&self.mutation_results)
            .pop_front()
            .unwrap_or_else(|| Err(ListError::network("No mock mutation result configured")))
    }
}

#[async_trait]
impl<L: ListFeature> ListResource<L> for MockListResource<L> {
    async fn list(&self, query: &PagedQuery<L::Sort>) -> Result<Page<L::Item>, ListError> {
        lock(&self.queries).push(query.clone());

        let delay = lock(&self.list_delays).pop_front();
        if let Some(delay) = delay {
            sleep(delay).await;
        }

        let failure = lock(&self.list_failures).pop_front();
        if let Some(error) = failure {
            return Err(error);
        }

        let rows = lock(&self.rows);
        let start = usize::try_from(query.offset()).unwrap_or(usize::MAX);
        let items = rows
            .iter()
            .skip(start)
            .take(query.page_size as usize)
            .cloned()
            .collect();
        Ok(Page::new(items, rows.len() as u64))
    }

    async fn get_by_id(&self, id: &EntityId) -> Result<L::Item, ListError> {
        *lock(&self.detail_calls) += 1;
        lock(&self.rows)
            .iter()
            .find(|row| &row.entity_id() == id)
            .cloned()
            .ok_or_else(|| ListError::NotFound(id.clone()))
    }

    async fn create(&self, draft: &L::Draft) -> Result<L::Item, ListError> {
        let created = self.next_mutation(draft)?;
        lock(&self.rows).push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: &EntityId, draft: &L::Draft) -> Result<L::Item, ListError> {
        let updated = self.next_mutation(draft)?;
        if let Some(slot) = lock(&self.rows).iter_mut().find(|row| &row.entity_id() == id) {
            *slot = updated.clone();
        }
        Ok(updated)
    }
}
