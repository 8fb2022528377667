//! Stored CV request submissions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::EmailAddress;

/// One captured email submission.
///
/// ## Invariants
/// - `email` is normalised and unique across the record set.
/// - `created_at` is assigned once at insertion and never changes.
/// - `updated_at` is only populated by schema-backed stores that maintain it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureRecord {
    email: EmailAddress,
    created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    updated_at: Option<DateTime<Utc>>,
}

impl CaptureRecord {
    /// Create a record for a fresh submission.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::{CaptureRecord, EmailAddress};
    /// use chrono::Utc;
    ///
    /// let email = EmailAddress::parse("a@b.com").expect("valid");
    /// let record = CaptureRecord::new(email.clone(), Utc::now());
    /// assert_eq!(record.email(), &email);
    /// assert!(record.updated_at().is_none());
    /// ```
    pub fn new(email: EmailAddress, created_at: DateTime<Utc>) -> Self {
        Self {
            email,
            created_at,
            updated_at: None,
        }
    }

    /// Rehydrate a record read back from a store that tracks modification time.
    pub fn with_updated_at(mut self, updated_at: DateTime<Utc>) -> Self {
        self.updated_at = Some(updated_at);
        self
    }

    /// Normalised email address.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Insertion timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last modification timestamp, when the store maintains one.
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }
}
