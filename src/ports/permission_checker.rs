//! Permission checker port.
//!
//! The permission set is loaded elsewhere (after sign-in); this port only
//! answers capability questions against it.

/// Capability predicate used to gate list reads and mutations.
pub trait PermissionChecker: Send + Sync {
    /// True when the user holds at least one of `required`.
    ///
    /// An empty requirement is always satisfied.
    fn has_permission(&self, required: &[&str]) -> bool;

    /// Single-permission shorthand.
    fn has(&self, permission: &str) -> bool {
        self.has_permission(&[permission])
    }
}
