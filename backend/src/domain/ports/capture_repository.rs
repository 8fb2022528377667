//! Driven port for CV request persistence.
//!
//! Every storage tier (PostgreSQL, JSON file, in-process memory) and the
//! fallback chain that selects between them implement this contract, so the
//! capture service never sees a concrete backend.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{CaptureRecord, EmailAddress};

use super::define_port_error;

define_port_error! {
    /// Errors raised by capture repository adapters.
    pub enum CaptureRepositoryError {
        /// A record with the same normalised email already exists.
        Conflict => "capture record already exists: {message}",
        /// The backing store could not be reached or written.
        Connection => "capture store connection failed: {message}",
        /// Query or mutation failed during execution.
        Query => "capture store query failed: {message}",
    }
}

impl CaptureRepositoryError {
    /// Whether the error should demote the active storage tier.
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection { .. })
    }
}

/// Storage tier identifiers, ordered from most to least durable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StorageTier {
    /// Relational store reached over the network.
    Durable,
    /// Local JSON document on disk.
    File,
    /// Process-lifetime collection.
    Memory,
}

impl StorageTier {
    /// Stable label used in structured logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Durable => "durable",
            Self::File => "file",
            Self::Memory => "memory",
        }
    }
}

impl fmt::Display for StorageTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Port for reading and appending capture records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CaptureRepository: Send + Sync {
    /// Look up a record by its normalised email.
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<CaptureRecord>, CaptureRepositoryError>;

    /// Append a record.
    ///
    /// Returns [`CaptureRepositoryError::Conflict`] when the email is already
    /// stored, including when a concurrent writer won the race.
    async fn insert(&self, record: &CaptureRecord) -> Result<(), CaptureRepositoryError>;

    /// Total number of stored records as reported by the store.
    async fn count(&self) -> Result<u64, CaptureRepositoryError>;

    /// Every record, most recent first.
    async fn list_all(&self) -> Result<Vec<CaptureRecord>, CaptureRepositoryError>;
}

/// Factory that establishes one storage tier on demand.
#[async_trait]
pub trait CaptureTierConnector: Send + Sync {
    /// Tier produced by this connector.
    fn tier(&self) -> StorageTier;

    /// Establish the tier, returning a connection error when it is unusable.
    async fn connect(&self) -> Result<Arc<dyn CaptureRepository>, CaptureRepositoryError>;
}
