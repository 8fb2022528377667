//! Process-lifetime capture tier.
//!
//! Last resort in the fallback chain: it never fails to connect and keeps
//! records only until the process exits.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{
    CaptureRepository, CaptureRepositoryError, CaptureTierConnector, StorageTier,
};
use crate::domain::{CaptureRecord, EmailAddress};

/// In-memory implementation of [`CaptureRepository`].
#[derive(Debug, Default)]
pub struct MemoryCaptureRepository {
    records: Mutex<Vec<CaptureRecord>>,
}

impl MemoryCaptureRepository {
    fn records(&self) -> Result<MutexGuard<'_, Vec<CaptureRecord>>, CaptureRepositoryError> {
        self.records
            .lock()
            .map_err(|_| CaptureRepositoryError::query("memory store lock poisoned"))
    }
}

#[async_trait]
impl CaptureRepository for MemoryCaptureRepository {
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<CaptureRecord>, CaptureRepositoryError> {
        let records = self.records()?;
        Ok(records.iter().find(|r| r.email() == email).cloned())
    }

    async fn insert(&self, record: &CaptureRecord) -> Result<(), CaptureRepositoryError> {
        let mut records = self.records()?;
        if records.iter().any(|r| r.email() == record.email()) {
            return Err(CaptureRepositoryError::conflict(record.email().as_str()));
        }
        records.push(record.clone());
        Ok(())
    }

    async fn count(&self) -> Result<u64, CaptureRepositoryError> {
        Ok(self.records()?.len() as u64)
    }

    async fn list_all(&self) -> Result<Vec<CaptureRecord>, CaptureRepositoryError> {
        Ok(self.records()?.iter().rev().cloned().collect())
    }
}

/// Connector handing out one shared [`MemoryCaptureRepository`].
#[derive(Debug, Clone, Default)]
pub struct MemoryTierConnector {
    repository: Arc<MemoryCaptureRepository>,
}

impl MemoryTierConnector {
    /// Connector over an existing repository, so callers can inspect it.
    pub fn with_repository(repository: Arc<MemoryCaptureRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl CaptureTierConnector for MemoryTierConnector {
    fn tier(&self) -> StorageTier {
        StorageTier::Memory
    }

    async fn connect(&self) -> Result<Arc<dyn CaptureRepository>, CaptureRepositoryError> {
        Ok(self.repository.clone())
    }
}
