//! Catalog module - the CRUD features of the admin dashboard.
//!
//! Each submodule declares one [`ListFeature`](crate::domain::listing::ListFeature):
//! the record type, its sortable columns, the filter form and the draft used
//! for create/update.

pub mod permission;
pub mod pharmaceutical_form;
pub mod product_group;
pub mod user;

pub use permission::{Permission, PermissionDraft, PermissionFilters, PermissionSort, Permissions};
pub use pharmaceutical_form::{
    PharmaceuticalForm, PharmaceuticalFormDraft, PharmaceuticalFormFilters,
    PharmaceuticalFormSort, PharmaceuticalForms,
};
pub use product_group::{
    ProductGroup, ProductGroupDraft, ProductGroupFilters, ProductGroupSort, ProductGroups,
};
pub use user::{User, UserDraft, UserFilters, UserSort, Users};

use crate::domain::foundation::{FormErrors, ValidationError};

/// Records an error when `value` is blank.
fn require(errors: &mut FormErrors, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.push(ValidationError::empty_field(field));
    }
}

/// Records an error when `value` has more than `max` characters.
fn max_len(errors: &mut FormErrors, field: &str, value: &str, max: usize) {
    let len = value.chars().count();
    if len > max {
        errors.push(ValidationError::out_of_range(field, 0, max as i64, len as i64));
    }
}

/// Trims a free-text filter, dropping it when nothing is left.
fn search_term(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
