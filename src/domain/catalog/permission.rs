//! Permissions assignable to roles.

use serde::{Deserialize, Serialize};

use super::{max_len, require, search_term};
use crate::domain::foundation::{EntityId, FormErrors, ValidationError};
use crate::domain::listing::{Draft, FilterState, Filters, Identifiable, ListFeature, SortField};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Permission {
    pub id: EntityId,
    /// Dotted capability code, e.g. `users.edit`.
    pub code: String,
    #[serde(default)]
    pub description: Option<String>,
    pub module: String,
}

impl Identifiable for Permission {
    fn entity_id(&self) -> EntityId {
        self.id.clone()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionSort {
    Code,
    Module,
}

impl SortField for PermissionSort {
    fn wire_name(&self) -> &'static str {
        match self {
            PermissionSort::Code => "codename",
            PermissionSort::Module => "module",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PermissionFilters {
    pub name: Option<String>,
    pub module: Option<String>,
}

impl FilterState for PermissionFilters {
    fn to_filters(&self) -> Filters {
        Filters::new()
            .with_optional("name", search_term(&self.name))
            .with_optional("module", search_term(&self.module))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionDraft {
    pub code: String,
    pub description: Option<String>,
    pub module: String,
}

impl Draft for PermissionDraft {
    const FIELDS: &'static [&'static str] = &["code", "description", "module"];

    fn check(&self, errors: &mut FormErrors) {
        require(errors, "code", &self.code);
        max_len(errors, "code", &self.code, 100);
        if !self.code.trim().is_empty() && !is_dotted_code(&self.code) {
            errors.push(ValidationError::invalid_format(
                "code",
                "expected <module>.<action>",
            ));
        }
        require(errors, "module", &self.module);
        if let Some(description) = &self.description {
            max_len(errors, "description", description, 255);
        }
    }
}

fn is_dotted_code(code: &str) -> bool {
    let mut parts = code.split('.');
    let valid_part =
        |p: &str| !p.is_empty() && p.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    match (parts.next(), parts.next()) {
        (Some(module), Some(action)) => {
            valid_part(module) && valid_part(action) && parts.all(valid_part)
        }
        _ => false,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Permissions;

impl ListFeature for Permissions {
    type Item = Permission;
    type Sort = PermissionSort;
    type Filters = PermissionFilters;
    type Draft = PermissionDraft;

    const NAME: &'static str = "permissions";
    const DEFAULT_SORT: PermissionSort = PermissionSort::Module;
    const READ_PERMISSION: &'static str = "permissions.view";
    const WRITE_PERMISSION: &'static str = "permissions.edit";
}
