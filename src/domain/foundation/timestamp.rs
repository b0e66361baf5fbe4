//! Timestamp value object for immutable points in time.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Immutable point in time, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from a DateTime<Utc>.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the inner DateTime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Returns the duration from another timestamp to this one.
    ///
    /// Returns negative duration if other is after self.
    pub fn duration_since(&self, other: &Timestamp) -> Duration {
        self.0.signed_duration_since(other.0)
    }

    /// Creates a new timestamp by subtracting the specified number of seconds.
    ///
    /// Saturates at the earliest representable instant.
    pub fn minus_secs(&self, secs: u64) -> Self {
        i64::try_from(secs)
            .ok()
            .and_then(Duration::try_seconds)
            .and_then(|delta| self.0.checked_sub_signed(delta))
            .map_or(Self(DateTime::<Utc>::MIN_UTC), Self)
    }

    /// True when more than `max_age_secs` have passed between this timestamp and `now`.
    ///
    /// Ages too large for a `Duration` are never exceeded.
    pub fn is_older_than(&self, max_age_secs: u64, now: &Timestamp) -> bool {
        i64::try_from(max_age_secs)
            .ok()
            .and_then(Duration::try_seconds)
            .is_some_and(|max_age| now.duration_since(self) > max_age)
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn timestamp_now_creates_current_time() {
        let before = Utc::now();
        let ts = Timestamp::now();
        let after = Utc::now();

        assert!(ts.as_datetime() >= &before);
        assert!(ts.as_datetime() <= &after);
    }

    #[test]
    fn timestamp_deserializes_from_json() {
        let json = "\"2024-01-15T10:30:00Z\"";
        let ts: Timestamp = serde_json::from_str(json).unwrap();

        assert_eq!(ts.as_datetime().year(), 2024);
    }

    #[test]
    fn huge_max_age_never_expires() {
        let now = Timestamp::now();
        let fetched = now.minus_secs(120);
        assert!(!fetched.is_older_than(u64::MAX / 2, &now));
        assert!(!fetched.is_older_than(u64::MAX, &now));
    }

    #[test]
    fn minus_secs_saturates() {
        let now = Timestamp::now();
        assert_eq!(now.minus_secs(u64::MAX), Timestamp::from_datetime(DateTime::<Utc>::MIN_UTC));
    }

    #[test]
    fn is_older_than_compares_against_reference() {
        let now = Timestamp::now();
        let fetched = now.minus_secs(120);

        assert!(fetched.is_older_than(60, &now));
        assert!(!fetched.is_older_than(300, &now));
    }

    #[test]
    fn duration_since_is_signed() {
        let now = Timestamp::now();
        let earlier = now.minus_secs(10);

        assert_eq!(now.duration_since(&earlier).num_seconds(), 10);
        assert_eq!(earlier.duration_since(&now).num_seconds(), -10);
    }
}
