//! List view configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::application::ListSettings;
use crate::domain::listing::DEFAULT_PAGE_SIZE;

/// One year.
pub const MAX_SNAPSHOT_AGE_SECS: u64 = 365 * 24 * 60 * 60;

/// Page size and snapshot reuse settings shared by every list
#[derive(Debug, Clone, Deserialize)]
pub struct ListingConfig {
    /// Page size of a freshly opened list
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,

    /// Largest page size the pager may request
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u32,

    /// Cached list snapshots older than this are refetched; unset means
    /// snapshots never expire
    #[serde(default)]
    pub snapshot_max_age_secs: Option<u64>,
}

impl ListingConfig {
    /// Validate listing configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.default_page_size == 0 || self.default_page_size > self.max_page_size {
            return Err(ValidationError::InvalidPageSize);
        }
        if self
            .snapshot_max_age_secs
            .is_some_and(|secs| secs > MAX_SNAPSHOT_AGE_SECS)
        {
            return Err(ValidationError::InvalidSnapshotMaxAge {
                max: MAX_SNAPSHOT_AGE_SECS,
            });
        }
        Ok(())
    }

    /// Controller settings derived from this configuration
    pub fn settings(&self) -> ListSettings {
        let settings = ListSettings::default()
            .with_page_size(self.default_page_size)
            .with_max_page_size(self.max_page_size);
        match self.snapshot_max_age_secs {
            Some(secs) => settings.with_snapshot_max_age(secs),
            None => settings,
        }
    }
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
            snapshot_max_age_secs: None,
        }
    }
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_max_page_size() -> u32 {
    100
}
