//! Cached view of a list page.

use super::feature::{Identifiable, ListFeature};
use super::pager::{total_pages, PagerKey};
use super::signature::QuerySignature;
use crate::domain::foundation::Timestamp;

/// Complete visible state of a list view, kept for restore-on-return.
///
/// Replaced wholesale after every successful fetch. The cache only ever hands
/// out clones.
#[derive(Debug, Clone, PartialEq)]
pub struct ListViewSnapshot<L: ListFeature> {
    /// Rows in server order.
    pub items: Vec<L::Item>,
    pub total_items: u64,
    pub page: u32,
    pub page_size: u32,
    pub order_by: L::Sort,
    pub ascending: bool,
    pub filters: L::Filters,
    pub last_request_signature: QuerySignature,
    pub last_pager_key: Option<PagerKey>,
    /// Scope the list was opened in (e.g. the parent record of a sub-list).
    pub context: Option<String>,
    pub fetched_at: Timestamp,
}

impl<L: ListFeature> ListViewSnapshot<L> {
    /// Replaces the row with the same id, keeping its position.
    ///
    /// Returns false when no row carries that id.
    pub fn replace_item(&mut self, updated: &L::Item) -> bool {
        let id = updated.entity_id();
        match self.items.iter_mut().find(|item| item.entity_id() == id) {
            Some(slot) => {
                *slot = updated.clone();
                true
            }
            None => false,
        }
    }

    pub fn total_pages(&self) -> u32 {
        total_pages(self.total_items, self.page_size)
    }

    pub fn matches_context(&self, context: Option<&str>) -> bool {
        self.context.as_deref() == context
    }

    /// True when the snapshot was fetched more than `max_age_secs` before `now`.
    pub fn is_expired(&self, max_age_secs: Option<u64>, now: &Timestamp) -> bool {
        max_age_secs.is_some_and(|max| self.fetched_at.is_older_than(max, now))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::listing::feature::tests::{Row, RowFilters, RowSort, Rows};

    pub(crate) fn snapshot(items: Vec<Row>, total: u64) -> ListViewSnapshot<Rows> {
        ListViewSnapshot {
            items,
            total_items: total,
            page: 1,
            page_size: 10,
            order_by: RowSort::Name,
            ascending: true,
            filters: RowFilters::default(),
            last_request_signature: QuerySignature::empty(),
            last_pager_key: Some(PagerKey::new(1, 10)),
            context: None,
            fetched_at: Timestamp::now(),
        }
    }

    #[test]
    fn replace_item_keeps_position() {
        let mut snap = snapshot(
            vec![Row::new(1, "A"), Row::new(2, "B"), Row::new(3, "C")],
            3,
        );
        assert!(snap.replace_item(&Row::new(2, "B2")));
        let names: Vec<&str> = snap.items.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B2", "C"]);
    }

    #[test]
    fn replace_item_ignores_unknown_id() {
        let mut snap = snapshot(vec![Row::new(1, "A")], 1);
        assert!(!snap.replace_item(&Row::new(9, "Z")));
        assert_eq!(snap.items, vec![Row::new(1, "A")]);
    }

    #[test]
    fn total_pages_uses_page_size() {
        assert_eq!(snapshot(Vec::new(), 45).total_pages(), 5);
    }

    #[test]
    fn context_must_match_exactly() {
        let mut snap = snapshot(Vec::new(), 0);
        assert!(snap.matches_context(None));
        snap.context = Some("role:4".into());
        assert!(snap.matches_context(Some("role:4")));
        assert!(!snap.matches_context(Some("role:5")));
        assert!(!snap.matches_context(None));
    }

    #[test]
    fn expiry_is_optional() {
        let mut snap = snapshot(Vec::new(), 0);
        let now = Timestamp::now();
        snap.fetched_at = now.minus_secs(600);
        assert!(!snap.is_expired(None, &now));
        assert!(snap.is_expired(Some(60), &now));
        assert!(!snap.is_expired(Some(3600), &now));
    }
}
