//! Per-feature vocabulary of a list.
//!
//! Every CRUD feature of the dashboard supplies one [`ListFeature`]
//! implementation naming its row type, sortable columns, filter form and
//! create/update draft. The controller, cache and handlers are written once
//! against this trait.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;

use super::query::{FilterState, SortField};
use crate::domain::foundation::{EntityId, FormErrors};

/// Records that carry a stable id.
pub trait Identifiable {
    fn entity_id(&self) -> EntityId;
}

/// Create/update payload of a feature, validated locally before any request.
pub trait Draft: Clone + Debug + Serialize + Send + Sync + 'static {
    /// Every field the form exposes; all are marked touched on failure.
    const FIELDS: &'static [&'static str];

    /// Records problems with the draft into `errors`.
    fn check(&self, errors: &mut FormErrors);

    fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::new();
        self.check(&mut errors);
        if !errors.is_empty() {
            errors.touch_all(Self::FIELDS.iter().copied());
        }
        errors.into_result()
    }
}

/// Type bundle describing one feature list.
pub trait ListFeature:
    Debug + Clone + Copy + PartialEq + Default + Send + Sync + 'static
{
    type Item: Identifiable
        + Clone
        + Debug
        + PartialEq
        + Serialize
        + DeserializeOwned
        + Send
        + Sync
        + 'static;
    type Sort: SortField;
    type Filters: FilterState;
    type Draft: Draft;

    /// Feature name used in logs.
    const NAME: &'static str;

    /// Column the list is ordered by until the user picks another.
    const DEFAULT_SORT: Self::Sort;

    /// Permission needed to read the list and its records.
    const READ_PERMISSION: &'static str;

    /// Permission needed to create or edit records.
    const WRITE_PERMISSION: &'static str;
}

/// Successful mutation reported back to the list.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation<T> {
    Created(T),
    Updated(T),
}

impl<T> Mutation<T> {
    pub fn item(&self) -> &T {
        match self {
            Mutation::Created(item) | Mutation::Updated(item) => item,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Mutation::Created(_) => "create",
            Mutation::Updated(_) => "update",
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    //! Minimal feature used by unit tests across the crate.

    use super::*;
    use crate::domain::foundation::ValidationError;
    use crate::domain::listing::query::{Filters, SortField};
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub(crate) struct Row {
        pub id: u64,
        pub name: String,
    }

    impl Row {
        pub fn new(id: u64, name: &str) -> Self {
            Self {
                id,
                name: name.to_string(),
            }
        }
    }

    impl Identifiable for Row {
        fn entity_id(&self) -> EntityId {
            EntityId::from(self.id)
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub(crate) enum RowSort {
        Name,
        Id,
    }

    impl SortField for RowSort {
        fn wire_name(&self) -> &'static str {
            match self {
                RowSort::Name => "name",
                RowSort::Id => "id",
            }
        }
    }

    #[derive(Debug, Clone, Default, PartialEq)]
    pub(crate) struct RowFilters {
        pub name: Option<String>,
        pub is_active: Option<bool>,
    }

    impl FilterState for RowFilters {
        fn to_filters(&self) -> Filters {
            Filters::new()
                .with_optional("name", self.name.clone())
                .with_optional("is_active", self.is_active)
        }
    }

    #[derive(Debug, Clone, PartialEq, Serialize)]
    pub(crate) struct RowDraft {
        pub name: String,
    }

    impl Draft for RowDraft {
        const FIELDS: &'static [&'static str] = &["name"];

        fn check(&self, errors: &mut FormErrors) {
            if self.name.trim().is_empty() {
                errors.push(ValidationError::empty_field("name"));
            }
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Default)]
    pub(crate) struct Rows;

    impl ListFeature for Rows {
        type Item = Row;
        type Sort = RowSort;
        type Filters = RowFilters;
        type Draft = RowDraft;

        const NAME: &'static str = "rows";
        const DEFAULT_SORT: RowSort = RowSort::Name;
        const READ_PERMISSION: &'static str = "rows.view";
        const WRITE_PERMISSION: &'static str = "rows.edit";
    }

    #[test]
    fn invalid_draft_touches_every_field() {
        let errors = RowDraft { name: "  ".into() }.validate().unwrap_err();
        assert!(errors.is_touched("name"));
        assert_eq!(errors.for_field("name").len(), 1);
    }

    #[test]
    fn valid_draft_passes() {
        assert!(RowDraft { name: "Tablets".into() }.validate().is_ok());
    }

    #[test]
    fn mutation_exposes_item_and_kind() {
        let created = Mutation::Created(Row::new(1, "a"));
        assert_eq!(created.kind(), "create");
        assert_eq!(created.item().id, 1);
        assert_eq!(Mutation::Updated(Row::new(2, "b")).kind(), "update");
    }
}
