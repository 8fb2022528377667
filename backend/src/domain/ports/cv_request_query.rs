//! Driving port for the admin view of captured CV requests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{CaptureRecord, Error};

/// Every captured record, most recent first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CvRequestListing {
    /// Records ordered by `created_at` descending.
    pub records: Vec<CaptureRecord>,
    /// When the listing was read from the store.
    pub generated_at: DateTime<Utc>,
}

impl CvRequestListing {
    /// Number of records in the listing.
    pub fn count(&self) -> usize {
        self.records.len()
    }

    /// Number of distinct emails; equal to [`Self::count`] because uniqueness
    /// is enforced at insertion.
    pub fn distinct_count(&self) -> usize {
        let mut emails: Vec<&str> = self.records.iter().map(|r| r.email().as_str()).collect();
        emails.sort_unstable();
        emails.dedup();
        emails.len()
    }
}

/// Use-case port for listing captured CV requests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CvRequestQuery: Send + Sync {
    /// Return every stored record.
    async fn list_all(&self) -> Result<CvRequestListing, Error>;
}
