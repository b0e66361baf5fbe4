//! Error notifier that writes user-facing failures to the log.

use crate::domain::listing::ListError;
use crate::ports::ErrorNotifier;

/// Logs every notification as a warning with its error code.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl TracingNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl ErrorNotifier for TracingNotifier {
    fn notify(&self, feature: &'static str, error: &ListError) {
        tracing::warn!(
            feature = feature,
            code = %error.code(),
            retryable = error.is_retryable(),
            "{}: {}",
            error.user_message(),
            error
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn notifier_is_usable_as_port() {
        let notifier: Arc<dyn ErrorNotifier> = Arc::new(TracingNotifier::new());
        notifier.notify("product_groups", &ListError::network("connection refused"));
        notifier.notify("users", &ListError::rejected(409, "Username already taken"));
    }
}
