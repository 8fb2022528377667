//! Driving port for CV request submissions.
//!
//! Inbound adapters hand over the raw form value; validation, normalisation,
//! deduplication and persistence all happen behind this port.

use async_trait::async_trait;

use crate::domain::Error;

/// Raw submission as received from the contact form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitCvRequest {
    /// Email as typed by the visitor; `None` when absent or not a string.
    pub email: Option<String>,
}

impl SubmitCvRequest {
    /// Build a request from a present email value.
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
        }
    }
}

/// Outcome of a successful submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitCvRequestResponse {
    /// Total stored records after the insert, as reported by the store.
    pub count: u64,
}

/// Use-case port for capturing CV requests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CvRequestCommand: Send + Sync {
    /// Validate, deduplicate and persist one submission.
    async fn submit(&self, request: SubmitCvRequest) -> Result<SubmitCvRequestResponse, Error>;
}
