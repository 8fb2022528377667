//! JSON document capture tier.
//!
//! Records live in `<data_dir>/cv_requests.json`:
//!
//! ```json
//! {"records":[{"email":"a@b.com","created_at":"2024-01-01T00:00:00Z"}],"lastUpdated":"2024-01-01T00:00:00Z"}
//! ```
//!
//! Every mutation is a read-modify-write of the whole document under one
//! async mutex, and the rewrite goes through [`atomic_io::write_atomic`].
//! Filesystem failures surface as connection errors so the fallback chain can
//! demote to memory; a document that does not parse is a query error.

mod atomic_io;

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use cap_std::ambient_authority;
use cap_std::fs::Dir;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::debug;

use crate::domain::ports::{
    CaptureRepository, CaptureRepositoryError, CaptureTierConnector, StorageTier,
};
use crate::domain::{CaptureRecord, EmailAddress};

/// File name of the capture document inside the data directory.
pub const CAPTURE_FILE_NAME: &str = "cv_requests.json";

#[derive(Debug, Default, Serialize, Deserialize)]
struct CaptureDocument {
    #[serde(default)]
    records: Vec<CaptureRecord>,
    #[serde(rename = "lastUpdated", default, skip_serializing_if = "Option::is_none")]
    last_updated: Option<DateTime<Utc>>,
}

fn io_error(context: &str, err: io::Error) -> CaptureRepositoryError {
    CaptureRepositoryError::connection(format!("{context}: {err}"))
}

fn read_document(dir: &Dir) -> Result<CaptureDocument, CaptureRepositoryError> {
    let raw = match dir.read(CAPTURE_FILE_NAME) {
        Ok(raw) => raw,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(CaptureDocument::default()),
        Err(err) => return Err(io_error("read capture document", err)),
    };
    serde_json::from_slice(&raw)
        .map_err(|err| CaptureRepositoryError::query(format!("decode capture document: {err}")))
}

fn write_document(dir: &Dir, document: &CaptureDocument) -> Result<(), CaptureRepositoryError> {
    let encoded = serde_json::to_vec_pretty(document)
        .map_err(|err| CaptureRepositoryError::query(format!("encode capture document: {err}")))?;
    atomic_io::write_atomic(dir, CAPTURE_FILE_NAME, &encoded)
        .map_err(|err| io_error("write capture document", err))
}

/// Capture repository persisting to a JSON document on local disk.
#[derive(Debug)]
pub struct FileCaptureRepository {
    dir: Arc<Dir>,
    lock: Mutex<()>,
}

impl FileCaptureRepository {
    /// Repository over an already opened data directory.
    pub fn new(dir: Dir) -> Self {
        Self {
            dir: Arc::new(dir),
            lock: Mutex::new(()),
        }
    }

    /// Create `path` if needed and open it as the data directory.
    pub fn open(path: &Path) -> Result<Self, CaptureRepositoryError> {
        Dir::create_ambient_dir_all(path, ambient_authority())
            .map_err(|err| io_error("create data directory", err))?;
        let dir = Dir::open_ambient_dir(path, ambient_authority())
            .map_err(|err| io_error("open data directory", err))?;
        Ok(Self::new(dir))
    }

    async fn load(&self) -> Result<CaptureDocument, CaptureRepositoryError> {
        let dir = Arc::clone(&self.dir);
        tokio::task::spawn_blocking(move || read_document(&dir))
            .await
            .map_err(|err| CaptureRepositoryError::query(format!("file task failed: {err}")))?
    }

    async fn store(&self, document: CaptureDocument) -> Result<(), CaptureRepositoryError> {
        let dir = Arc::clone(&self.dir);
        tokio::task::spawn_blocking(move || write_document(&dir, &document))
            .await
            .map_err(|err| CaptureRepositoryError::query(format!("file task failed: {err}")))?
    }

    /// Write an empty document when none exists yet, proving the directory
    /// is writable.
    async fn ensure_document(&self) -> Result<(), CaptureRepositoryError> {
        let _guard = self.lock.lock().await;
        let dir = Arc::clone(&self.dir);
        let exists = tokio::task::spawn_blocking(move || dir.try_exists(CAPTURE_FILE_NAME))
            .await
            .map_err(|err| CaptureRepositoryError::query(format!("file task failed: {err}")))?
            .map_err(|err| io_error("probe capture document", err))?;
        if exists {
            return Ok(());
        }
        self.store(CaptureDocument::default()).await
    }
}

#[async_trait]
impl CaptureRepository for FileCaptureRepository {
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<CaptureRecord>, CaptureRepositoryError> {
        let _guard = self.lock.lock().await;
        let document = self.load().await?;
        Ok(document.records.into_iter().find(|r| r.email() == email))
    }

    async fn insert(&self, record: &CaptureRecord) -> Result<(), CaptureRepositoryError> {
        let _guard = self.lock.lock().await;
        let mut document = self.load().await?;
        if document.records.iter().any(|r| r.email() == record.email()) {
            return Err(CaptureRepositoryError::conflict(record.email().as_str()));
        }
        document.records.push(record.clone());
        document.last_updated = Some(record.created_at());
        self.store(document).await?;
        debug!(email = %record.email(), "capture record written to file tier");
        Ok(())
    }

    async fn count(&self) -> Result<u64, CaptureRepositoryError> {
        let _guard = self.lock.lock().await;
        Ok(self.load().await?.records.len() as u64)
    }

    async fn list_all(&self) -> Result<Vec<CaptureRecord>, CaptureRepositoryError> {
        let _guard = self.lock.lock().await;
        let mut records = self.load().await?.records;
        records.reverse();
        Ok(records)
    }
}

/// Connector opening the file tier under a data directory.
#[derive(Debug, Clone)]
pub struct FileTierConnector {
    data_dir: PathBuf,
}

impl FileTierConnector {
    /// Connector for `data_dir`; nothing touches the disk until `connect`.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }
}

#[async_trait]
impl CaptureTierConnector for FileTierConnector {
    fn tier(&self) -> StorageTier {
        StorageTier::File
    }

    async fn connect(&self) -> Result<Arc<dyn CaptureRepository>, CaptureRepositoryError> {
        let path = self.data_dir.clone();
        let repository = tokio::task::spawn_blocking(move || FileCaptureRepository::open(&path))
            .await
            .map_err(|err| CaptureRepositoryError::connection(format!("file task failed: {err}")))??;
        repository.ensure_document().await?;
        Ok(Arc::new(repository))
    }
}

#[cfg(test)]
mod tests;
