//! CV request capture service.
//!
//! Implements the submission and listing driving ports on top of any
//! [`CaptureRepository`]. The service validates and normalises input, rejects
//! duplicates, and reports the store's own record count so the answer stays
//! correct when several server instances write to the same store.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info};

use crate::domain::ports::{
    CaptureRepository, CaptureRepositoryError, CvRequestCommand, CvRequestListing,
    CvRequestQuery, SubmitCvRequest, SubmitCvRequestResponse,
};
use crate::domain::{CaptureRecord, EmailAddress, EmailValidationError, Error};

/// Message for missing or non-string email input.
pub const EMAIL_REQUIRED_MESSAGE: &str = "Email is required";
/// Message for email input that fails the shape check.
pub const INVALID_EMAIL_MESSAGE: &str = "Invalid email format";
/// Message for a submission that is already stored.
pub const DUPLICATE_EMAIL_MESSAGE: &str = "Email already exists";

fn map_validation_error(error: EmailValidationError) -> Error {
    match error {
        EmailValidationError::Missing => Error::invalid_input(EMAIL_REQUIRED_MESSAGE),
        EmailValidationError::InvalidFormat => Error::invalid_format(INVALID_EMAIL_MESSAGE),
    }
}

fn map_repository_error(error: CaptureRepositoryError) -> Error {
    match error {
        CaptureRepositoryError::Conflict { .. } => Error::conflict(DUPLICATE_EMAIL_MESSAGE),
        CaptureRepositoryError::Connection { message } => {
            Error::storage_unavailable(format!("capture store unavailable: {message}"))
        }
        CaptureRepositoryError::Query { message } => {
            Error::internal(format!("capture store error: {message}"))
        }
    }
}

/// Capture service implementing [`CvRequestCommand`] and [`CvRequestQuery`].
pub struct CvRequestService<R: ?Sized> {
    repository: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R: ?Sized> Clone for CvRequestService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R: ?Sized> CvRequestService<R> {
    /// Create a service over the given repository and clock.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use backend::domain::CvRequestService;
    /// use backend::outbound::memory::MemoryCaptureRepository;
    /// use mockable::DefaultClock;
    ///
    /// let service = CvRequestService::new(
    ///     Arc::new(MemoryCaptureRepository::default()),
    ///     Arc::new(DefaultClock),
    /// );
    /// # let _ = service;
    /// ```
    pub fn new(repository: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }
}

#[async_trait]
impl<R> CvRequestCommand for CvRequestService<R>
where
    R: CaptureRepository + ?Sized,
{
    async fn submit(&self, request: SubmitCvRequest) -> Result<SubmitCvRequestResponse, Error> {
        let raw = request
            .email
            .ok_or_else(|| Error::invalid_input(EMAIL_REQUIRED_MESSAGE))?;
        let email = EmailAddress::parse(&raw).map_err(map_validation_error)?;

        let existing = self
            .repository
            .find_by_email(&email)
            .await
            .map_err(map_repository_error)?;
        if existing.is_some() {
            debug!(email = %email, "duplicate cv request rejected");
            return Err(Error::conflict(DUPLICATE_EMAIL_MESSAGE));
        }

        let record = CaptureRecord::new(email, self.clock.utc());
        self.repository
            .insert(&record)
            .await
            .map_err(map_repository_error)?;

        let count = self
            .repository
            .count()
            .await
            .map_err(map_repository_error)?;
        info!(email = %record.email(), count, "cv request captured");
        Ok(SubmitCvRequestResponse { count })
    }
}

#[async_trait]
impl<R> CvRequestQuery for CvRequestService<R>
where
    R: CaptureRepository + ?Sized,
{
    async fn list_all(&self) -> Result<CvRequestListing, Error> {
        let records = self
            .repository
            .list_all()
            .await
            .map_err(map_repository_error)?;
        Ok(CvRequestListing {
            records,
            generated_at: self.clock.utc(),
        })
    }
}

#[cfg(test)]
#[path = "cv_request_service_tests.rs"]
mod tests;
