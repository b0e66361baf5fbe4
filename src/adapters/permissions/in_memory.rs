//! In-memory permission set.

use std::collections::HashSet;
use std::sync::{Arc, PoisonError, RwLock};

use crate::ports::PermissionChecker;

/// Permission codes granted to the signed-in user.
///
/// Clones share the same set, so a refresh after sign-in is visible to every
/// handler holding a copy.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPermissionSet {
    granted: Arc<RwLock<HashSet<String>>>,
}

impl InMemoryPermissionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a set holding `permissions`.
    pub fn with_permissions<I, S>(permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set = Self::new();
        set.replace(permissions);
        set
    }

    /// Replaces the whole set, e.g. after the permission list is reloaded.
    pub fn replace<I, S>(&self, permissions: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut granted = self.granted.write().unwrap_or_else(PoisonError::into_inner);
        *granted = permissions.into_iter().map(Into::into).collect();
    }

    pub fn grant(&self, permission: impl Into<String>) {
        self.granted
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(permission.into());
    }

    pub fn revoke(&self, permission: &str) {
        self.granted
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(permission);
    }

    pub fn len(&self) -> usize {
        self.granted.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PermissionChecker for InMemoryPermissionSet {
    fn has_permission(&self, required: &[&str]) -> bool {
        if required.is_empty() {
            return true;
        }
        let granted = self.granted.read().unwrap_or_else(PoisonError::into_inner);
        required.iter().any(|permission| granted.contains(*permission))
    }
}
