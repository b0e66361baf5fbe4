//! ListController - paged list state of one feature view.
//!
//! Owns page, size, ordering, filters and the visible rows, and keeps them in
//! step with the pager widget, the REST resource and the paged result cache.
//!
//! # Request flow
//!
//! 1. Build a [`PagedQuery`] from the current state and sign it.
//! 2. Skip when the signature equals the last one requested.
//! 3. Record the signature and a fresh generation, release the state lock.
//! 4. Await the resource.
//! 5. Apply the result only when its generation is still the latest.
//!
//! State lives behind a `tokio::sync::Mutex` that is never held while a
//! request is in flight, so several requests may overlap; the generation
//! token keeps the last one issued as the one that wins.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Mutex;
use tracing::debug;

use crate::adapters::PagedResultCache;
use crate::domain::foundation::Timestamp;
use crate::domain::listing::{
    total_pages, FilterState, Filters, Identifiable, ListError, ListFeature, ListStatus,
    ListViewSnapshot, Mutation, Page, PagedQuery, PagerBridge, PagerEvent, PagerUpdate,
    QuerySignature, SortField, StateMachine, DEFAULT_PAGE_SIZE,
};
use crate::ports::{ErrorNotifier, ListResource, PagerView};

/// Tunables of a list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListSettings {
    /// Page size of a freshly mounted list.
    pub page_size: u32,
    /// Upper bound for sizes requested through the pager.
    pub max_page_size: u32,
    /// Snapshots older than this are refetched instead of restored.
    pub snapshot_max_age_secs: Option<u64>,
}

impl Default for ListSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            max_page_size: 100,
            snapshot_max_age_secs: None,
        }
    }
}

impl ListSettings {
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn with_max_page_size(mut self, max_page_size: u32) -> Self {
        self.max_page_size = max_page_size.max(1);
        self
    }

    pub fn with_snapshot_max_age(mut self, secs: u64) -> Self {
        self.snapshot_max_age_secs = Some(secs);
        self
    }
}

/// How a mount obtained its rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountOutcome {
    /// Rows came from the cached snapshot; no request was made.
    Restored,
    /// Rows were fetched from the resource.
    Fetched,
}

/// What a load request ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The response was applied to the view.
    Applied,
    /// Nothing was requested: same request as last time, or an ignored
    /// pager event.
    Skipped,
    /// A newer request was issued meanwhile; the response was dropped.
    Stale,
}

/// Read-only copy of the visible list state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListView<T> {
    pub items: Vec<T>,
    pub total_items: u64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
    /// Wire name of the sort column.
    pub order_by: &'static str,
    pub ascending: bool,
    pub filters: Filters,
    pub status: ListStatus,
    /// User-facing message of the last failure, cleared on success.
    pub error: Option<String>,
    pub context: Option<String>,
}

struct ListState<L: ListFeature> {
    page: u32,
    page_size: u32,
    order_by: L::Sort,
    ascending: bool,
    filters: L::Filters,
    items: Vec<L::Item>,
    total_items: u64,
    status: ListStatus,
    last_request_signature: QuerySignature,
    /// Generation of the latest request issued.
    generation: u64,
    bridge: PagerBridge,
    context: Option<String>,
    last_error: Option<ListError>,
}

impl<L: ListFeature> ListState<L> {
    fn fresh(settings: &ListSettings, generation: u64, context: Option<String>) -> Self {
        Self {
            page: 1,
            page_size: settings.page_size,
            order_by: L::DEFAULT_SORT,
            ascending: true,
            filters: L::Filters::default(),
            items: Vec::new(),
            total_items: 0,
            status: ListStatus::Idle,
            last_request_signature: QuerySignature::empty(),
            generation,
            bridge: PagerBridge::new().with_max_page_size(settings.max_page_size),
            context,
            last_error: None,
        }
    }

    fn query(&self) -> PagedQuery<L::Sort> {
        PagedQuery::new(self.order_by)
            .with_page(self.page)
            .with_page_size(self.page_size)
            .with_ascending(self.ascending)
            .with_filters(self.filters.to_filters())
    }

    fn restore(&mut self, snapshot: ListViewSnapshot<L>) -> Result<(), ListError> {
        self.status = self.status.transition_to(ListStatus::Loaded)?;
        self.page = snapshot.page;
        self.page_size = snapshot.page_size;
        self.order_by = snapshot.order_by;
        self.ascending = snapshot.ascending;
        self.filters = snapshot.filters;
        self.items = snapshot.items;
        self.total_items = snapshot.total_items;
        self.last_request_signature = snapshot.last_request_signature;

        let key = snapshot.last_pager_key;
        let (page, page_size) =
            key.map_or((self.page, self.page_size), |k| (k.page, k.page_size));
        self.bridge.prime(page, page_size);
        self.bridge.arm();
        Ok(())
    }

    fn snapshot(&self, fetched_at: Timestamp) -> ListViewSnapshot<L> {
        ListViewSnapshot {
            items: self.items.clone(),
            total_items: self.total_items,
            page: self.page,
            page_size: self.page_size,
            order_by: self.order_by,
            ascending: self.ascending,
            filters: self.filters.clone(),
            last_request_signature: self.last_request_signature.clone(),
            last_pager_key: self.bridge.last_key(),
            context: self.context.clone(),
            fetched_at,
        }
    }

    fn pager_update(&self) -> PagerUpdate<L::Item> {
        PagerUpdate::new(self.items.clone(), self.total_items, self.page, self.page_size)
    }

    /// Marks the current request state as unsent so the next load goes out.
    fn invalidate(&mut self) {
        self.last_request_signature = QuerySignature::empty();
    }
}

/// Generic list controller, one per mounted feature view.
pub struct ListController<L: ListFeature> {
    resource: Arc<dyn ListResource<L>>,
    cache: Arc<PagedResultCache<L>>,
    pager: Arc<dyn PagerView<L::Item>>,
    notifier: Arc<dyn ErrorNotifier>,
    settings: ListSettings,
    state: Mutex<ListState<L>>,
}

impl<L: ListFeature> ListController<L> {
    pub fn new(
        resource: Arc<dyn ListResource<L>>,
        cache: Arc<PagedResultCache<L>>,
        pager: Arc<dyn PagerView<L::Item>>,
        notifier: Arc<dyn ErrorNotifier>,
        settings: ListSettings,
    ) -> Self {
        let state = ListState::fresh(&settings, 0, None);
        Self {
            resource,
            cache,
            pager,
            notifier,
            settings,
            state: Mutex::new(state),
        }
    }

    /// Opens the view, restoring the cached snapshot when it belongs to the
    /// same `context` and is fresh enough, fetching page 1 otherwise.
    pub async fn mount(&self, context: Option<&str>) -> Result<MountOutcome, ListError> {
        let now = Timestamp::now();
        let restorable = self.cache.get_list_snapshot().await.filter(|snapshot| {
            snapshot.matches_context(context)
                && !snapshot.is_expired(self.settings.snapshot_max_age_secs, &now)
        });

        let mut state = self.state.lock().await;
        let generation = state.generation + 1;
        *state = ListState::fresh(&self.settings, generation, context.map(str::to_string));

        if let Some(snapshot) = restorable {
            state.restore(snapshot)?;
            debug!(
                feature = L::NAME,
                page = state.page,
                rows = state.items.len(),
                "Restored list from cache"
            );
            self.pager.render(state.pager_update());
            return Ok(MountOutcome::Restored);
        }

        state.bridge.arm();
        drop(state);

        self.load_page().await?;
        Ok(MountOutcome::Fetched)
    }

    /// Stops reacting to the pager and drops any response still in flight.
    pub async fn unmount(&self) {
        let mut state = self.state.lock().await;
        state.bridge.disarm();
        state.generation += 1;
        if state.status.is_loading() {
            state.invalidate();
        }
    }

    /// Fetches the page described by the current state.
    pub async fn load_page(&self) -> Result<LoadOutcome, ListError> {
        let (query, generation) = {
            let mut state = self.state.lock().await;
            let query = state.query();
            let signature = query.signature();

            if signature == state.last_request_signature {
                debug!(feature = L::NAME, %signature, "Skipping duplicate list request");
                return Ok(LoadOutcome::Skipped);
            }

            state.status = state.status.transition_to(ListStatus::Loading)?;
            state.last_request_signature = signature;
            state.generation += 1;
            (query, state.generation)
        };

        match self.resource.list(&query).await {
            Ok(page) => self.apply_page(generation, page).await,
            Err(error) => self.apply_failure(generation, error).await,
        }
    }

    async fn apply_page(
        &self,
        generation: u64,
        page: Page<L::Item>,
    ) -> Result<LoadOutcome, ListError> {
        let mut state = self.state.lock().await;
        if state.generation != generation {
            debug!(feature = L::NAME, generation, "Discarding stale list response");
            return Ok(LoadOutcome::Stale);
        }

        state.status = state.status.transition_to(ListStatus::Loaded)?;
        state.items = page.items;
        state.total_items = page.total_count;
        state.last_error = None;
        let (current_page, page_size) = (state.page, state.page_size);
        state.bridge.prime(current_page, page_size);

        let snapshot = state.snapshot(Timestamp::now());
        self.cache.upsert_entities(&snapshot.items).await;
        self.cache.set_list_snapshot(&snapshot).await;

        self.pager.render(state.pager_update());
        Ok(LoadOutcome::Applied)
    }

    async fn apply_failure(
        &self,
        generation: u64,
        error: ListError,
    ) -> Result<LoadOutcome, ListError> {
        {
            let mut state = self.state.lock().await;
            if state.generation != generation {
                debug!(feature = L::NAME, generation, "Discarding stale list failure: {}", error);
                return Ok(LoadOutcome::Stale);
            }

            state.invalidate();
            state.status = state.status.transition_to(ListStatus::Failed)?;
            state.last_error = Some(error.clone());
        }

        debug!(feature = L::NAME, generation, "List request failed: {}", error);
        self.notifier.notify(L::NAME, &error);
        Err(error)
    }

    /// Reacts to a pager widget event; only a new `page|size` fetches.
    pub async fn on_pager_event(&self, event: PagerEvent) -> Result<LoadOutcome, ListError> {
        {
            let mut state = self.state.lock().await;
            let current_size = state.page_size;
            match state.bridge.on_event(&event, current_size) {
                Some(change) => {
                    state.page = change.page;
                    state.page_size = change.page_size;
                }
                None => {
                    debug!(feature = L::NAME, ?event, "Ignoring pager event");
                    return Ok(LoadOutcome::Skipped);
                }
            }
        }

        self.load_page().await
    }

    /// Header click on `field`: the current sort column flips direction, any
    /// other column becomes the sort column in ascending order. Returns to
    /// page 1.
    pub async fn change_sort(&self, field: L::Sort) -> Result<LoadOutcome, ListError> {
        let ascending = {
            let mut state = self.state.lock().await;
            state.ascending = if state.order_by == field {
                !state.ascending
            } else {
                true
            };
            state.order_by = field;
            state.page = 1;
            state.ascending
        };
        debug!(feature = L::NAME, order_by = field.wire_name(), ascending, "Sort changed");
        self.load_page().await
    }

    /// Replaces the filter form state, returns to page 1 and refetches.
    pub async fn apply_filters(&self, filters: L::Filters) -> Result<LoadOutcome, ListError> {
        {
            let mut state = self.state.lock().await;
            state.filters = filters;
            state.page = 1;
            state.invalidate();
        }
        self.load_page().await
    }

    pub async fn clear_filters(&self) -> Result<LoadOutcome, ListError> {
        self.apply_filters(L::Filters::default()).await
    }

    /// Re-issues the current request, even if it was the last one sent.
    pub async fn retry(&self) -> Result<LoadOutcome, ListError> {
        self.state.lock().await.invalidate();
        self.load_page().await
    }

    /// Folds a successful create or update into the list.
    ///
    /// An update patches the row in place without a request. A create drops
    /// the cached snapshot and rewinds to an empty page 1 with the current
    /// sort and filters, so the next mount or load fetches it.
    pub async fn after_mutation_success(&self, mutation: Mutation<L::Item>) {
        let mut state = self.state.lock().await;
        match mutation {
            Mutation::Updated(item) => {
                let id = item.entity_id();
                let visible = match state.items.iter_mut().find(|row| row.entity_id() == id) {
                    Some(slot) => {
                        *slot = item.clone();
                        true
                    }
                    None => false,
                };
                self.cache.update_list_item(&item).await;
                debug!(feature = L::NAME, %id, visible, "Patched updated record");
                if visible {
                    self.pager.render(state.pager_update());
                }
            }
            Mutation::Created(item) => {
                self.cache.upsert_entity(&item).await;
                self.cache.clear_list_snapshot().await;

                let mut rewound =
                    ListState::fresh(&self.settings, state.generation + 1, state.context.take());
                rewound.page_size = state.page_size;
                rewound.order_by = state.order_by;
                rewound.ascending = state.ascending;
                rewound.filters = std::mem::take(&mut state.filters);
                rewound.bridge.prime(1, rewound.page_size);
                if state.bridge.is_armed() {
                    rewound.bridge.arm();
                }
                *state = rewound;

                debug!(feature = L::NAME, id = %item.entity_id(), "Invalidated list after create");
                self.pager.render(state.pager_update());
            }
        }
    }

    /// Copy of the visible state.
    pub async fn view(&self) -> ListView<L::Item> {
        let state = self.state.lock().await;
        ListView {
            items: state.items.clone(),
            total_items: state.total_items,
            page: state.page,
            page_size: state.page_size,
            total_pages: total_pages(state.total_items, state.page_size),
            order_by: state.order_by.wire_name(),
            ascending: state.ascending,
            filters: state.filters.to_filters(),
            status: state.status,
            error: state.last_error.as_ref().map(ListError::user_message),
            context: state.context.clone(),
        }
    }

    /// Current filter form state.
    pub async fn filter_state(&self) -> L::Filters {
        self.state.lock().await.filters.clone()
    }

    pub fn settings(&self) -> &ListSettings {
        &self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MockListResource;
    use crate::domain::foundation::{EntityId, ErrorCode};
    use crate::domain::listing::test_support::{snapshot, Row, RowFilters, RowSort, Rows};
    use std::sync::Mutex as StdMutex;
    use std::time::Duration;

    #[derive(Default)]
    struct RecordingPager {
        updates: StdMutex<Vec<PagerUpdate<Row>>>,
    }

    impl RecordingPager {
        fn count(&self) -> usize {
            self.updates.lock().unwrap().len()
        }

        fn last(&self) -> PagerUpdate<Row> {
            self.updates.lock().unwrap().last().cloned().unwrap()
        }
    }

    impl PagerView<Row> for RecordingPager {
        fn render(&self, update: PagerUpdate<Row>) {
            self.updates.lock().unwrap().push(update);
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        codes: StdMutex<Vec<ErrorCode>>,
    }

    impl RecordingNotifier {
        fn count(&self) -> usize {
            self.codes.lock().unwrap().len()
        }
    }

    impl ErrorNotifier for RecordingNotifier {
        fn notify(&self, _feature: &'static str, error: &ListError) {
            self.codes.lock().unwrap().push(error.code());
        }
    }

    struct Harness {
        resource: Arc<MockListResource<Rows>>,
        cache: Arc<PagedResultCache<Rows>>,
        pager: Arc<RecordingPager>,
        notifier: Arc<RecordingNotifier>,
        settings: ListSettings,
    }

    impl Harness {
        fn with_rows(count: u64) -> Self {
            let rows = (1..=count)
                .map(|i| Row::new(i, &format!("row-{:02}", i)))
                .collect();
            Self {
                resource: Arc::new(MockListResource::new().with_rows(rows)),
                cache: Arc::new(PagedResultCache::new()),
                pager: Arc::new(RecordingPager::default()),
                notifier: Arc::new(RecordingNotifier::default()),
                settings: ListSettings::default(),
            }
        }

        fn controller(&self) -> ListController<Rows> {
            ListController::new(
                self.resource.clone(),
                self.cache.clone(),
                self.pager.clone(),
                self.notifier.clone(),
                self.settings,
            )
        }

        fn calls(&self) -> usize {
            self.resource.list_calls()
        }
    }

    fn page_event(page: i64, size: i64) -> PagerEvent {
        PagerEvent::new((page - 1) * size, size, size)
    }

    fn ids(view: &ListView<Row>) -> Vec<u64> {
        view.items.iter().map(|row| row.id).collect()
    }

    #[tokio::test]
    async fn mount_without_snapshot_fetches_first_page() {
        let harness = Harness::with_rows(45);
        let controller = harness.controller();

        let outcome = controller.mount(None).await.unwrap();

        assert_eq!(outcome, MountOutcome::Fetched);
        assert_eq!(harness.calls(), 1);
        let view = controller.view().await;
        assert_eq!(view.status, ListStatus::Loaded);
        assert_eq!(ids(&view), (1..=10).collect::<Vec<_>>());
        assert_eq!(view.total_items, 45);
        assert_eq!(view.total_pages, 5);

        let update = harness.pager.last();
        assert_eq!(update.total_data, 45);
        assert_eq!(update.serial_number_array, (1..=10).collect::<Vec<u64>>());
        assert!(harness.cache.has_snapshot().await);
        assert_eq!(harness.cache.entity_count().await, 10);
    }

    #[tokio::test]
    async fn identical_request_is_skipped() {
        let harness = Harness::with_rows(45);
        let controller = harness.controller();
        controller.mount(None).await.unwrap();

        let outcome = controller.load_page().await.unwrap();

        assert_eq!(outcome, LoadOutcome::Skipped);
        assert_eq!(harness.calls(), 1);
    }

    #[tokio::test]
    async fn pager_offset_selects_page() {
        let harness = Harness::with_rows(45);
        let controller = harness.controller();
        controller.mount(None).await.unwrap();

        let outcome = controller
            .on_pager_event(PagerEvent::new(20, 10, 10))
            .await
            .unwrap();

        assert_eq!(outcome, LoadOutcome::Applied);
        let view = controller.view().await;
        assert_eq!(view.page, 3);
        assert_eq!(ids(&view), (21..=30).collect::<Vec<_>>());
        assert_eq!(harness.pager.last().serial_number_array[0], 21);
    }

    #[tokio::test]
    async fn repeated_pager_event_fetches_once() {
        let harness = Harness::with_rows(45);
        let controller = harness.controller();
        controller.mount(None).await.unwrap();

        controller.on_pager_event(page_event(2, 10)).await.unwrap();
        let second = controller.on_pager_event(page_event(2, 10)).await.unwrap();

        assert_eq!(second, LoadOutcome::Skipped);
        assert_eq!(harness.calls(), 2);
    }

    #[tokio::test]
    async fn echo_of_applied_page_is_ignored() {
        let harness = Harness::with_rows(45);
        let controller = harness.controller();
        controller.mount(None).await.unwrap();

        let echo = controller.on_pager_event(page_event(1, 10)).await.unwrap();

        assert_eq!(echo, LoadOutcome::Skipped);
        assert_eq!(harness.calls(), 1);
    }

    #[tokio::test]
    async fn pager_events_before_mount_are_ignored() {
        let harness = Harness::with_rows(45);
        let controller = harness.controller();

        let outcome = controller.on_pager_event(page_event(2, 10)).await.unwrap();

        assert_eq!(outcome, LoadOutcome::Skipped);
        assert_eq!(harness.calls(), 0);
    }

    #[tokio::test]
    async fn pager_size_is_capped() {
        let mut harness = Harness::with_rows(45);
        harness.settings = ListSettings::default().with_max_page_size(20);
        let controller = harness.controller();
        controller.mount(None).await.unwrap();

        controller.on_pager_event(PagerEvent::new(0, 50, 50)).await.unwrap();

        assert_eq!(harness.resource.last_query().unwrap().page_size, 20);
    }

    #[tokio::test]
    async fn capped_size_still_starts_at_requested_offset() {
        let mut harness = Harness::with_rows(150);
        harness.settings = ListSettings::default().with_max_page_size(20);
        let controller = harness.controller();
        controller.mount(None).await.unwrap();

        controller.on_pager_event(PagerEvent::new(100, 150, 50)).await.unwrap();

        let view = controller.view().await;
        assert_eq!((view.page, view.page_size), (6, 20));
        assert_eq!(view.items[0].id, 101);
        let cached = harness.cache.get_list_snapshot().await.unwrap();
        assert_eq!(cached.last_pager_key.unwrap().to_string(), "6|20");

        let echo = controller.on_pager_event(PagerEvent::new(100, 120, 20)).await.unwrap();
        assert_eq!(echo, LoadOutcome::Skipped);
        assert_eq!(harness.calls(), 2);
    }

    #[tokio::test]
    async fn failure_keeps_rows_and_allows_identical_retry() {
        let harness = Harness::with_rows(45);
        let controller = harness.controller();
        controller.mount(None).await.unwrap();
        harness.resource.fail_next(ListError::network("connection reset"));

        let err = controller.on_pager_event(page_event(2, 10)).await.unwrap_err();

        assert!(matches!(err, ListError::Network(_)));
        let view = controller.view().await;
        assert_eq!(view.status, ListStatus::Failed);
        assert_eq!(ids(&view), (1..=10).collect::<Vec<_>>());
        assert!(view.error.is_some());
        assert_eq!(harness.notifier.count(), 1);

        let retried = controller.load_page().await.unwrap();
        assert_eq!(retried, LoadOutcome::Applied);
        let view = controller.view().await;
        assert_eq!(ids(&view), (11..=20).collect::<Vec<_>>());
        assert_eq!(view.error, None);
        assert_eq!(harness.calls(), 3);
    }

    #[tokio::test]
    async fn failed_mount_reports_error() {
        let harness = Harness::with_rows(5);
        harness.resource.fail_next(ListError::Timeout { timeout_secs: 30 });
        let controller = harness.controller();

        assert!(controller.mount(None).await.is_err());

        let view = controller.view().await;
        assert_eq!(view.status, ListStatus::Failed);
        assert!(view.items.is_empty());
        assert!(!harness.cache.has_snapshot().await);

        assert_eq!(controller.retry().await.unwrap(), LoadOutcome::Applied);
        assert_eq!(controller.view().await.items.len(), 5);
    }

    #[tokio::test]
    async fn retry_forces_a_request() {
        let harness = Harness::with_rows(45);
        let controller = harness.controller();
        controller.mount(None).await.unwrap();

        assert_eq!(controller.retry().await.unwrap(), LoadOutcome::Applied);
        assert_eq!(harness.calls(), 2);
    }

    #[tokio::test]
    async fn remount_restores_without_network() {
        let harness = Harness::with_rows(45);
        let first = harness.controller();
        first.mount(None).await.unwrap();
        first.on_pager_event(page_event(3, 10)).await.unwrap();
        first.unmount().await;
        assert_eq!(harness.calls(), 2);

        let second = harness.controller();
        let outcome = second.mount(None).await.unwrap();

        assert_eq!(outcome, MountOutcome::Restored);
        assert_eq!(harness.calls(), 2);
        let view = second.view().await;
        assert_eq!(view.status, ListStatus::Loaded);
        assert_eq!(view.page, 3);
        assert_eq!(ids(&view), (21..=30).collect::<Vec<_>>());
        assert_eq!(harness.pager.last().current_page, 3);

        let echo = second.on_pager_event(page_event(3, 10)).await.unwrap();
        assert_eq!(echo, LoadOutcome::Skipped);
        assert_eq!(second.load_page().await.unwrap(), LoadOutcome::Skipped);
        assert_eq!(harness.calls(), 2);
    }

    #[tokio::test]
    async fn snapshot_of_other_context_is_not_restored() {
        let harness = Harness::with_rows(45);
        harness.controller().mount(Some("role:1")).await.unwrap();

        let outcome = harness.controller().mount(Some("role:2")).await.unwrap();

        assert_eq!(outcome, MountOutcome::Fetched);
        assert_eq!(harness.calls(), 2);
    }

    #[tokio::test]
    async fn huge_snapshot_max_age_still_restores() {
        let mut harness = Harness::with_rows(45);
        harness.settings = ListSettings::default().with_snapshot_max_age(u64::MAX / 2);
        harness.controller().mount(None).await.unwrap();

        let outcome = harness.controller().mount(None).await.unwrap();

        assert_eq!(outcome, MountOutcome::Restored);
        assert_eq!(harness.calls(), 1);
    }

    #[tokio::test]
    async fn expired_snapshot_is_refetched() {
        let mut harness = Harness::with_rows(45);
        harness.settings = ListSettings::default().with_snapshot_max_age(60);
        let mut old = snapshot(vec![Row::new(1, "old")], 1);
        old.fetched_at = Timestamp::now().minus_secs(600);
        harness.cache.set_list_snapshot(&old).await;

        let controller = harness.controller();
        let outcome = controller.mount(None).await.unwrap();

        assert_eq!(outcome, MountOutcome::Fetched);
        assert_eq!(controller.view().await.total_items, 45);
    }

    #[tokio::test]
    async fn new_sort_column_starts_ascending_on_first_page() {
        let harness = Harness::with_rows(45);
        let controller = harness.controller();
        controller.mount(None).await.unwrap();
        controller.change_sort(RowSort::Name).await.unwrap();
        assert!(!controller.view().await.ascending);
        controller.on_pager_event(page_event(3, 10)).await.unwrap();

        let outcome = controller.change_sort(RowSort::Id).await.unwrap();

        assert_eq!(outcome, LoadOutcome::Applied);
        let query = harness.resource.last_query().unwrap();
        assert_eq!(query.page, 1);
        assert_eq!(query.order_by, RowSort::Id);
        assert!(query.ascending);
        let view = controller.view().await;
        assert_eq!(view.order_by, "id");
        assert_eq!(view.page, 1);
    }

    #[tokio::test]
    async fn same_sort_column_flips_direction() {
        let harness = Harness::with_rows(45);
        let controller = harness.controller();
        controller.mount(None).await.unwrap();

        assert_eq!(controller.change_sort(RowSort::Id).await.unwrap(), LoadOutcome::Applied);
        assert!(harness.resource.last_query().unwrap().ascending);

        assert_eq!(controller.change_sort(RowSort::Id).await.unwrap(), LoadOutcome::Applied);
        assert!(!harness.resource.last_query().unwrap().ascending);

        assert_eq!(controller.change_sort(RowSort::Id).await.unwrap(), LoadOutcome::Applied);
        assert!(harness.resource.last_query().unwrap().ascending);
        assert_eq!(harness.calls(), 4);
    }

    #[tokio::test]
    async fn concurrent_identical_load_is_skipped_while_in_flight() {
        let harness = Harness::with_rows(45);
        let controller = harness.controller();
        controller.mount(None).await.unwrap();
        harness.resource.delay_next(Duration::from_millis(100));

        let (first, second) = tokio::join!(controller.retry(), async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            controller.load_page().await
        });

        assert_eq!(first.unwrap(), LoadOutcome::Applied);
        assert_eq!(second.unwrap(), LoadOutcome::Skipped);
        assert_eq!(harness.calls(), 2);
    }

    #[tokio::test]
    async fn filters_reset_page_and_always_refetch() {
        let harness = Harness::with_rows(45);
        let controller = harness.controller();
        controller.mount(None).await.unwrap();
        controller.on_pager_event(page_event(2, 10)).await.unwrap();

        let active = RowFilters {
            name: None,
            is_active: Some(true),
        };
        controller.apply_filters(active.clone()).await.unwrap();
        controller.apply_filters(active.clone()).await.unwrap();

        assert_eq!(harness.calls(), 4);
        let query = harness.resource.last_query().unwrap();
        assert_eq!(query.page, 1);
        assert!(query.filters.get("is_active").is_some());
        assert_eq!(controller.filter_state().await, active);

        controller.clear_filters().await.unwrap();
        assert!(harness.resource.last_query().unwrap().filters.is_empty());
        assert!(controller.view().await.filters.is_empty());
    }

    #[tokio::test]
    async fn stale_response_is_discarded() {
        let harness = Harness::with_rows(45);
        let controller = harness.controller();
        controller.mount(None).await.unwrap();
        harness.resource.delay_next(Duration::from_millis(150));

        let (slow, fast) = tokio::join!(controller.on_pager_event(page_event(2, 10)), async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            controller.on_pager_event(page_event(3, 10)).await
        });

        assert_eq!(fast.unwrap(), LoadOutcome::Applied);
        assert_eq!(slow.unwrap(), LoadOutcome::Stale);
        let view = controller.view().await;
        assert_eq!(view.page, 3);
        assert_eq!(ids(&view), (21..=30).collect::<Vec<_>>());
        assert_eq!(view.status, ListStatus::Loaded);
        assert_eq!(harness.cache.get_list_snapshot().await.unwrap().page, 3);
    }

    #[tokio::test]
    async fn unmount_drops_in_flight_response() {
        let harness = Harness::with_rows(45);
        let controller = harness.controller();
        controller.mount(None).await.unwrap();
        harness.resource.delay_next(Duration::from_millis(100));

        let (outcome, _) = tokio::join!(controller.on_pager_event(page_event(2, 10)), async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            controller.unmount().await
        });

        assert_eq!(outcome.unwrap(), LoadOutcome::Stale);
        assert_eq!(harness.cache.get_list_snapshot().await.unwrap().page, 1);
    }

    #[tokio::test]
    async fn update_patches_row_without_refetch() {
        let harness = Harness::with_rows(45);
        let controller = harness.controller();
        controller.mount(None).await.unwrap();
        let renders = harness.pager.count();

        controller
            .after_mutation_success(Mutation::Updated(Row::new(2, "B2")))
            .await;

        let view = controller.view().await;
        assert_eq!(view.items[1], Row::new(2, "B2"));
        assert_eq!(view.items.len(), 10);
        assert_eq!(harness.calls(), 1);
        assert_eq!(harness.pager.count(), renders + 1);

        let cached = harness.cache.get_list_snapshot().await.unwrap();
        assert_eq!(cached.items[1].name, "B2");
        assert_eq!(cached.items[0].name, "row-01");
    }

    #[tokio::test]
    async fn update_of_invisible_row_only_touches_entity_cache() {
        let harness = Harness::with_rows(45);
        let controller = harness.controller();
        controller.mount(None).await.unwrap();
        let renders = harness.pager.count();

        controller
            .after_mutation_success(Mutation::Updated(Row::new(40, "far away")))
            .await;

        assert_eq!(harness.pager.count(), renders);
        let cached = harness.cache.get_by_id(&EntityId::from(40)).await.unwrap();
        assert_eq!(cached.name, "far away");
    }

    #[tokio::test]
    async fn create_invalidates_snapshot_and_next_mount_fetches() {
        let harness = Harness::with_rows(45);
        let controller = harness.controller();
        controller.mount(None).await.unwrap();
        controller.on_pager_event(page_event(4, 10)).await.unwrap();

        controller
            .after_mutation_success(Mutation::Created(Row::new(46, "new")))
            .await;

        assert!(!harness.cache.has_snapshot().await);
        assert!(harness.cache.get_by_id(&EntityId::from(46)).await.is_some());
        let view = controller.view().await;
        assert_eq!(view.page, 1);
        assert!(view.items.is_empty());
        assert_eq!(view.status, ListStatus::Idle);
        assert_eq!(harness.pager.last().current_page, 1);
        assert!(harness.pager.last().table_data.is_empty());

        let echo = controller.on_pager_event(page_event(1, 10)).await.unwrap();
        assert_eq!(echo, LoadOutcome::Skipped);

        let next = harness.controller();
        assert_eq!(next.mount(None).await.unwrap(), MountOutcome::Fetched);
        assert_eq!(harness.resource.last_query().unwrap().page, 1);

        assert_eq!(controller.load_page().await.unwrap(), LoadOutcome::Applied);
        assert_eq!(ids(&controller.view().await), (1..=10).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn active_filter_listing_reports_five_pages() {
        let harness = Harness::with_rows(45);
        let controller = harness.controller();
        controller.mount(None).await.unwrap();

        controller
            .apply_filters(RowFilters {
                name: None,
                is_active: Some(true),
            })
            .await
            .unwrap();

        let ascending = harness.resource.last_query().unwrap();
        let descending = ascending.clone().with_ascending(false);
        assert_ne!(ascending.signature(), descending.signature());

        let view = controller.view().await;
        assert_eq!(view.items.len(), 10);
        assert_eq!(view.total_items, 45);
        assert_eq!(view.total_pages, 5);
        assert_eq!(harness.pager.last().total_pages, 5);
    }
}
