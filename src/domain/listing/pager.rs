//! Pager bridge.
//!
//! The pager widget speaks in zero-based `skip`/`limit` offsets and re-emits
//! events whenever its inputs change, including when the controller itself
//! pushed those inputs. The bridge turns offsets into 1-based pages and drops
//! every event whose `page|size` key was already acted on, which breaks the
//! push -> echo -> refetch loop.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Page size used when the event carries none and the controller has none.
pub const FALLBACK_PAGE_SIZE: u32 = 10;

/// Event emitted by the pager widget on page or size change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagerEvent {
    pub skip: i64,
    pub limit: i64,
    pub page_size: i64,
}

impl PagerEvent {
    pub fn new(skip: i64, limit: i64, page_size: i64) -> Self {
        Self {
            skip,
            limit,
            page_size,
        }
    }
}

/// `page|size` key of the last pager state acted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PagerKey {
    pub page: u32,
    pub page_size: u32,
}

impl PagerKey {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self { page, page_size }
    }
}

impl fmt::Display for PagerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.page, self.page_size)
    }
}

/// Page position adopted from a pager event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageChange {
    pub page: u32,
    pub page_size: u32,
}

/// Reconciles pager widget events with the controller's page state.
#[derive(Debug, Clone, Default)]
pub struct PagerBridge {
    armed: bool,
    last_key: Option<PagerKey>,
    max_page_size: Option<u32>,
}

impl PagerBridge {
    /// Creates a disarmed bridge with no history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Caps sizes requested by the widget. The page is derived from the
    /// capped size so `skip` still lands on the row the widget asked for.
    pub fn with_max_page_size(mut self, max_page_size: u32) -> Self {
        self.max_page_size = Some(max_page_size.max(1));
        self
    }

    /// Records `page|size` as already applied without reacting to it.
    pub fn prime(&mut self, page: u32, page_size: u32) {
        self.last_key = Some(PagerKey::new(page, page_size));
    }

    /// Starts reacting to pager events.
    pub fn arm(&mut self) {
        self.armed = true;
    }

    /// Stops reacting to pager events.
    pub fn disarm(&mut self) {
        self.armed = false;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn last_key(&self) -> Option<PagerKey> {
        self.last_key
    }

    /// Translates a pager event into a page change.
    ///
    /// Returns `None` while disarmed and for events whose key matches the last
    /// one acted on.
    pub fn on_event(&mut self, event: &PagerEvent, current_page_size: u32) -> Option<PageChange> {
        if !self.armed {
            return None;
        }

        let size = u32::try_from(event.page_size)
            .ok()
            .filter(|s| *s > 0)
            .or(Some(current_page_size).filter(|s| *s > 0))
            .unwrap_or(FALLBACK_PAGE_SIZE);
        let size = self.max_page_size.map_or(size, |max| size.min(max));
        let skip = u64::try_from(event.skip.max(0)).unwrap_or(0);
        let page = u32::try_from(skip / u64::from(size) + 1).unwrap_or(u32::MAX);

        let key = PagerKey::new(page, size);
        if self.last_key == Some(key) {
            return None;
        }

        self.last_key = Some(key);
        Some(PageChange {
            page,
            page_size: size,
        })
    }
}

/// Number of pages needed to show `total` rows at `page_size` per page.
pub fn total_pages(total: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    u32::try_from(total.div_ceil(u64::from(page_size))).unwrap_or(u32::MAX)
}

/// State pushed to the pager widget after a page is applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PagerUpdate<T> {
    pub total_data: u64,
    pub page_size: u32,
    pub table_data: Vec<T>,
    /// 1-based absolute row numbers of `table_data`.
    pub serial_number_array: Vec<u64>,
    pub current_page: u32,
    pub total_pages: u32,
}

impl<T> PagerUpdate<T> {
    pub fn new(table_data: Vec<T>, total_data: u64, page: u32, page_size: u32) -> Self {
        let first = u64::from(page.saturating_sub(1)) * u64::from(page_size);
        let serial_number_array = (1..=table_data.len() as u64).map(|i| first + i).collect();
        Self {
            total_data,
            page_size,
            table_data,
            serial_number_array,
            current_page: page,
            total_pages: total_pages(total_data, page_size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn armed() -> PagerBridge {
        let mut bridge = PagerBridge::new();
        bridge.arm();
        bridge
    }

    #[test]
    fn skip_translates_to_one_based_page() {
        let mut bridge = armed();
        let change = bridge.on_event(&PagerEvent::new(20, 30, 10), 10).unwrap();
        assert_eq!(change, PageChange { page: 3, page_size: 10 });
        assert_eq!(bridge.last_key().unwrap().to_string(), "3|10");
    }

    #[test]
    fn disarmed_bridge_ignores_events() {
        let mut bridge = PagerBridge::new();
        assert!(bridge.on_event(&PagerEvent::new(10, 20, 10), 10).is_none());
        assert!(bridge.last_key().is_none());
    }

    #[test]
    fn repeated_key_is_discarded() {
        let mut bridge = armed();
        assert!(bridge.on_event(&PagerEvent::new(10, 20, 10), 10).is_some());
        assert!(bridge.on_event(&PagerEvent::new(15, 25, 10), 10).is_none());
    }

    #[test]
    fn primed_key_suppresses_echo() {
        let mut bridge = PagerBridge::new();
        bridge.prime(4, 25);
        bridge.arm();
        assert!(bridge.on_event(&PagerEvent::new(75, 100, 25), 25).is_none());
        assert!(bridge.on_event(&PagerEvent::new(100, 125, 25), 25).is_some());
    }

    #[test]
    fn missing_size_falls_back_to_current_then_default() {
        let mut bridge = armed();
        let change = bridge.on_event(&PagerEvent::new(40, 60, 0), 20).unwrap();
        assert_eq!(change, PageChange { page: 3, page_size: 20 });

        let mut bridge = armed();
        let change = bridge.on_event(&PagerEvent::new(40, 50, -1), 0).unwrap();
        assert_eq!(change, PageChange { page: 5, page_size: FALLBACK_PAGE_SIZE });
    }

    #[test]
    fn negative_skip_is_first_page() {
        let mut bridge = armed();
        let change = bridge.on_event(&PagerEvent::new(-5, 10, 10), 10).unwrap();
        assert_eq!(change.page, 1);
    }

    #[test]
    fn size_change_on_same_page_is_acted_on() {
        let mut bridge = armed();
        bridge.prime(1, 10);
        let change = bridge.on_event(&PagerEvent::new(0, 25, 25), 10).unwrap();
        assert_eq!(change, PageChange { page: 1, page_size: 25 });
    }

    #[test]
    fn capped_size_is_used_for_page_math() {
        let mut bridge = PagerBridge::new().with_max_page_size(20);
        bridge.arm();
        let change = bridge.on_event(&PagerEvent::new(100, 150, 50), 10).unwrap();
        assert_eq!(change, PageChange { page: 6, page_size: 20 });
        assert_eq!(bridge.last_key().unwrap().to_string(), "6|20");
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(45, 10), 5);
        assert_eq!(total_pages(40, 10), 4);
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(10, 0), 0);
    }

    #[test]
    fn pager_update_numbers_rows_from_page_offset() {
        let update = PagerUpdate::new(vec!["a", "b", "c"], 23, 3, 10);
        assert_eq!(update.serial_number_array, vec![21, 22, 23]);
        assert_eq!(update.total_pages, 3);
        assert_eq!(update.current_page, 3);
    }

    #[test]
    fn pager_update_serializes_camel_case() {
        let update = PagerUpdate::new(vec![1], 1, 1, 10);
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json["totalData"], 1);
        assert_eq!(json["serialNumberArray"][0], 1);
        assert_eq!(json["tableData"][0], 1);
    }

    proptest! {
        #[test]
        fn page_math_matches_floor_division(skip in 0i64..100_000, size in 1i64..500) {
            let mut bridge = armed();
            let change = bridge.on_event(&PagerEvent::new(skip, skip + size, size), 10).unwrap();
            prop_assert_eq!(i64::from(change.page), skip / size + 1);
            prop_assert_eq!(i64::from(change.page_size), size);
        }

        #[test]
        fn same_event_twice_acts_once(skip in 0i64..10_000, size in 1i64..100) {
            let mut bridge = armed();
            let event = PagerEvent::new(skip, skip + size, size);
            prop_assert!(bridge.on_event(&event, 10).is_some());
            prop_assert!(bridge.on_event(&event, 10).is_none());
        }
    }
}
