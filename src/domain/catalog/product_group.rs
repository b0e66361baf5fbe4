//! Product groups.

use serde::{Deserialize, Serialize};

use super::{max_len, require, search_term};
use crate::domain::foundation::{EntityId, FormErrors, Timestamp};
use crate::domain::listing::{Draft, FilterState, Filters, Identifiable, ListFeature, SortField};

/// A group products are classified under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductGroup {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

fn default_active() -> bool {
    true
}

impl Identifiable for ProductGroup {
    fn entity_id(&self) -> EntityId {
        self.id.clone()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductGroupSort {
    Name,
    IsActive,
    CreatedAt,
}

impl SortField for ProductGroupSort {
    fn wire_name(&self) -> &'static str {
        match self {
            ProductGroupSort::Name => "name",
            ProductGroupSort::IsActive => "is_active",
            ProductGroupSort::CreatedAt => "created_at",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductGroupFilters {
    pub name: Option<String>,
    pub is_active: Option<bool>,
}

impl FilterState for ProductGroupFilters {
    fn to_filters(&self) -> Filters {
        Filters::new()
            .with_optional("name", search_term(&self.name))
            .with_optional("is_active", self.is_active)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductGroupDraft {
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
}

impl Draft for ProductGroupDraft {
    const FIELDS: &'static [&'static str] = &["name", "description", "is_active"];

    fn check(&self, errors: &mut FormErrors) {
        require(errors, "name", &self.name);
        max_len(errors, "name", &self.name, 120);
        if let Some(description) = &self.description {
            max_len(errors, "description", description, 500);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ProductGroups;

impl ListFeature for ProductGroups {
    type Item = ProductGroup;
    type Sort = ProductGroupSort;
    type Filters = ProductGroupFilters;
    type Draft = ProductGroupDraft;

    const NAME: &'static str = "product_groups";
    const DEFAULT_SORT: ProductGroupSort = ProductGroupSort::Name;
    const READ_PERMISSION: &'static str = "product_groups.view";
    const WRITE_PERMISSION: &'static str = "product_groups.edit";
}
