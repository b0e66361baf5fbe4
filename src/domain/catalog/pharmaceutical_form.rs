//! Pharmaceutical forms (tablet, syrup, ampoule, ...).

use serde::{Deserialize, Serialize};

use super::{max_len, require, search_term};
use crate::domain::foundation::{EntityId, FormErrors, Timestamp, ValidationError};
use crate::domain::listing::{Draft, FilterState, Filters, Identifiable, ListFeature, SortField};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PharmaceuticalForm {
    pub id: EntityId,
    pub name: String,
    /// Short label printed on packaging, e.g. `TAB`.
    #[serde(default)]
    pub abbreviation: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

impl Identifiable for PharmaceuticalForm {
    fn entity_id(&self) -> EntityId {
        self.id.clone()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PharmaceuticalFormSort {
    Name,
    Abbreviation,
    CreatedAt,
}

impl SortField for PharmaceuticalFormSort {
    fn wire_name(&self) -> &'static str {
        match self {
            PharmaceuticalFormSort::Name => "name",
            PharmaceuticalFormSort::Abbreviation => "short_name",
            PharmaceuticalFormSort::CreatedAt => "created_at",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PharmaceuticalFormFilters {
    pub name: Option<String>,
    pub is_active: Option<bool>,
}

impl FilterState for PharmaceuticalFormFilters {
    fn to_filters(&self) -> Filters {
        Filters::new()
            .with_optional("name", search_term(&self.name))
            .with_optional("is_active", self.is_active)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PharmaceuticalFormDraft {
    pub name: String,
    pub abbreviation: Option<String>,
    pub is_active: bool,
}

impl Draft for PharmaceuticalFormDraft {
    const FIELDS: &'static [&'static str] = &["name", "abbreviation", "is_active"];

    fn check(&self, errors: &mut FormErrors) {
        require(errors, "name", &self.name);
        max_len(errors, "name", &self.name, 100);
        if let Some(abbreviation) = &self.abbreviation {
            max_len(errors, "abbreviation", abbreviation, 10);
            if abbreviation.chars().any(char::is_whitespace) {
                errors.push(ValidationError::invalid_format(
                    "abbreviation",
                    "must not contain spaces",
                ));
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PharmaceuticalForms;

impl ListFeature for PharmaceuticalForms {
    type Item = PharmaceuticalForm;
    type Sort = PharmaceuticalFormSort;
    type Filters = PharmaceuticalFormFilters;
    type Draft = PharmaceuticalFormDraft;

    const NAME: &'static str = "pharmaceutical_forms";
    const DEFAULT_SORT: PharmaceuticalFormSort = PharmaceuticalFormSort::Name;
    const READ_PERMISSION: &'static str = "pharmaceutical_forms.view";
    const WRITE_PERMISSION: &'static str = "pharmaceutical_forms.edit";
}
