//! Query signatures for request de-duplication.
//!
//! The signature is a canonical `key=value` rendering of a [`PagedQuery`]:
//! fixed fields first, then one entry per defined filter in name order. Text
//! is escaped so separators inside values cannot make two different queries
//! render alike, and every filter value carries a type tag so `"true"` and
//! `true` stay distinct.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::query::{FilterValue, PagedQuery, SortField};

/// Canonical string key of a paged query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuerySignature(String);

impl QuerySignature {
    /// Marker for "no request issued" (or a request that failed).
    pub fn empty() -> Self {
        Self(String::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QuerySignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Computes the signature of a query. Pure; depends on nothing but the query.
pub fn compute_signature<S: SortField>(query: &PagedQuery<S>) -> QuerySignature {
    let mut out = String::with_capacity(64);
    out.push_str(&format!(
        "page={};page_size={};order_by=",
        query.page, query.page_size
    ));
    push_escaped(&mut out, query.order_by.wire_name());
    out.push_str(&format!(";ascending={}", query.ascending));

    for (name, value) in query.filters.iter() {
        out.push_str(";filter.");
        push_escaped(&mut out, name);
        out.push('=');
        match value {
            FilterValue::Bool(b) => out.push_str(&format!("b:{}", b)),
            FilterValue::Int(i) => out.push_str(&format!("i:{}", i)),
            FilterValue::Text(s) => {
                out.push_str("s:");
                push_escaped(&mut out, s);
            }
        }
    }

    QuerySignature(out)
}

fn push_escaped(out: &mut String, raw: &str) {
    for ch in raw.chars() {
        if matches!(ch, '\\' | ';' | '=') {
            out.push('\\');
        }
        out.push(ch);
    }
}

impl<S: SortField> PagedQuery<S> {
    /// Shorthand for [`compute_signature`].
    pub fn signature(&self) -> QuerySignature {
        compute_signature(self)
    }
}
