//! Error notifier port - user-facing failure reporting.

use crate::domain::listing::ListError;

/// Surfaces a failed list or mutation operation to the user.
pub trait ErrorNotifier: Send + Sync {
    fn notify(&self, feature: &'static str, error: &ListError);
}
