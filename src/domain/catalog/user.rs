//! Dashboard user accounts.

use serde::{Deserialize, Serialize};

use super::{max_len, require, search_term};
use crate::domain::foundation::{EntityId, FormErrors, Timestamp, ValidationError};
use crate::domain::listing::{Draft, FilterState, Filters, Identifiable, ListFeature, SortField};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: EntityId,
    pub username: String,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub role_id: Option<EntityId>,
    #[serde(default)]
    pub role_name: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub last_login: Option<Timestamp>,
}

impl Identifiable for User {
    fn entity_id(&self) -> EntityId {
        self.id.clone()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserSort {
    Username,
    FullName,
    Email,
    LastLogin,
}

impl SortField for UserSort {
    fn wire_name(&self) -> &'static str {
        match self {
            UserSort::Username => "username",
            UserSort::FullName => "full_name",
            UserSort::Email => "email",
            UserSort::LastLogin => "last_login",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserFilters {
    /// Free-text search over username, name and email.
    pub name: Option<String>,
    pub role_id: Option<i64>,
    pub is_active: Option<bool>,
}

impl FilterState for UserFilters {
    fn to_filters(&self) -> Filters {
        Filters::new()
            .with_optional("name", search_term(&self.name))
            .with_optional("role", self.role_id)
            .with_optional("is_active", self.is_active)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDraft {
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub role_id: Option<EntityId>,
    pub is_active: bool,
}

impl Draft for UserDraft {
    const FIELDS: &'static [&'static str] =
        &["username", "full_name", "email", "role_id", "is_active"];

    fn check(&self, errors: &mut FormErrors) {
        require(errors, "username", &self.username);
        max_len(errors, "username", &self.username, 50);
        if self.username.chars().any(char::is_whitespace) {
            errors.push(ValidationError::invalid_format(
                "username",
                "must not contain spaces",
            ));
        }
        require(errors, "full_name", &self.full_name);
        max_len(errors, "full_name", &self.full_name, 150);
        require(errors, "email", &self.email);
        if !self.email.trim().is_empty() && !looks_like_email(self.email.trim()) {
            errors.push(ValidationError::invalid_format(
                "email",
                "expected name@domain",
            ));
        }
    }
}

fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Users;

impl ListFeature for Users {
    type Item = User;
    type Sort = UserSort;
    type Filters = UserFilters;
    type Draft = UserDraft;

    const NAME: &'static str = "users";
    const DEFAULT_SORT: UserSort = UserSort::Username;
    const READ_PERMISSION: &'static str = "users.view";
    const WRITE_PERMISSION: &'static str = "users.edit";
}
