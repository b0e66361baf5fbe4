//! Paged query value objects.
//!
//! A [`PagedQuery`] is everything a list endpoint needs to serve one page:
//! position, size, ordering and the active filters. Filters are kept in a
//! name-ordered map so two queries built in a different order compare (and
//! sign) identically.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Debug;

/// Page size used when neither the caller nor the pager supplies one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Scalar value a list filter can hold.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Bool(bool),
    Int(i64),
    Text(String),
}

impl FilterValue {
    /// Renders the value the way query parameters carry it.
    pub fn to_query_value(&self) -> String {
        match self {
            FilterValue::Bool(b) => b.to_string(),
            FilterValue::Int(i) => i.to_string(),
            FilterValue::Text(s) => s.clone(),
        }
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        FilterValue::Bool(value)
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        FilterValue::Int(value)
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::Text(value)
    }
}

/// Name-ordered set of defined filters.
///
/// An undefined filter is simply absent: setting a filter to `None` removes
/// it, so `{name: undefined}` and `{}` are the same filter set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Filters(BTreeMap<String, FilterValue>);

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a defined filter.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    /// Adds a filter only when a value is present.
    pub fn with_optional<V: Into<FilterValue>>(
        mut self,
        name: impl Into<String>,
        value: Option<V>,
    ) -> Self {
        self.set(name, value.map(Into::into));
        self
    }

    /// Defines or removes a filter.
    pub fn set(&mut self, name: impl Into<String>, value: Option<FilterValue>) {
        let name = name.into();
        match value {
            Some(value) => {
                self.0.insert(name, value);
            }
            None => {
                self.0.remove(&name);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&FilterValue> {
        self.0.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Defined filters in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Sortable column of a feature list.
pub trait SortField: Copy + Debug + PartialEq + Eq + Send + Sync + 'static {
    /// Column name the REST API expects in `order_by`.
    fn wire_name(&self) -> &'static str;
}

/// Filter form state of a feature list.
pub trait FilterState: Clone + Debug + Default + PartialEq + Send + Sync + 'static {
    /// Projects the form state onto the canonical filter set.
    fn to_filters(&self) -> Filters;
}

/// Request for one page of a sorted, filtered collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagedQuery<S: SortField> {
    /// 1-based page number.
    pub page: u32,
    pub page_size: u32,
    pub order_by: S,
    pub ascending: bool,
    pub filters: Filters,
}

impl<S: SortField> PagedQuery<S> {
    /// First page, default size, ascending, no filters.
    pub fn new(order_by: S) -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            order_by,
            ascending: true,
            filters: Filters::new(),
        }
    }

    /// Sets the page, clamping to 1.
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    /// Sets the page size; zero falls back to the default.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = if page_size == 0 {
            DEFAULT_PAGE_SIZE
        } else {
            page_size
        };
        self
    }

    pub fn with_ascending(mut self, ascending: bool) -> Self {
        self.ascending = ascending;
        self
    }

    pub fn with_filters(mut self, filters: Filters) -> Self {
        self.filters = filters;
        self
    }

    /// Number of rows preceding this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.page_size)
    }

    /// Query string parameters for the list endpoint.
    pub fn to_query_params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("page".to_string(), self.page.to_string()),
            ("page_size".to_string(), self.page_size.to_string()),
            ("order_by".to_string(), self.order_by.wire_name().to_string()),
            ("ascending".to_string(), self.ascending.to_string()),
        ];
        params.extend(
            self.filters
                .iter()
                .map(|(name, value)| (name.to_string(), value.to_query_value())),
        );
        params
    }
}

/// One page of results as returned by a list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total_count: u64) -> Self {
        Self { items, total_count }
    }

    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
        }
    }
}
