//! Connector for the durable capture tier.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{info, warn};
use url::Url;

use crate::domain::ports::{
    CaptureRepository, CaptureRepositoryError, CaptureTierConnector, StorageTier,
};

use super::bootstrap::bootstrap_schema;
use super::diesel_capture_repository::DieselCaptureRepository;
use super::diesel_error_mapping::map_pool_error;
use super::pool::{DbPool, PoolConfig};

/// Errors raised while deriving the durable tier's connection URL.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DatabaseUrlError {
    /// The configured URL does not parse.
    #[error("database url is invalid: {0}")]
    Invalid(String),
    /// The URL scheme cannot carry a database path.
    #[error("database url cannot carry a database name")]
    CannotBeABase,
}

/// Replace the database path of `database_url` with `database_name`.
///
/// # Examples
/// ```
/// use backend::outbound::persistence::with_database_name;
///
/// let url = with_database_name("postgres://u:p@db:5432/postgres", "portfolio").unwrap();
/// assert_eq!(url, "postgres://u:p@db:5432/portfolio");
/// ```
pub fn with_database_name(
    database_url: &str,
    database_name: &str,
) -> Result<String, DatabaseUrlError> {
    let mut url = Url::parse(database_url).map_err(|err| DatabaseUrlError::Invalid(err.to_string()))?;
    url.path_segments_mut()
        .map_err(|()| DatabaseUrlError::CannotBeABase)?
        .clear()
        .push(database_name);
    Ok(url.into())
}

/// Connects the PostgreSQL tier and bootstraps its schema.
#[derive(Debug, Clone)]
pub struct PostgresTierConnector {
    database_url: Option<String>,
    connect_timeout: Duration,
}

impl PostgresTierConnector {
    /// Connector for `database_url`; `None` means the tier is not configured
    /// and always fails to connect.
    pub fn new(database_url: Option<String>, connect_timeout: Duration) -> Self {
        Self {
            database_url,
            connect_timeout,
        }
    }
}

#[async_trait]
impl CaptureTierConnector for PostgresTierConnector {
    fn tier(&self) -> StorageTier {
        StorageTier::Durable
    }

    async fn connect(&self) -> Result<Arc<dyn CaptureRepository>, CaptureRepositoryError> {
        let Some(database_url) = self.database_url.as_deref() else {
            return Err(CaptureRepositoryError::connection(
                "no database url configured",
            ));
        };

        let pool = DbPool::new(
            PoolConfig::new(database_url).with_connection_timeout(self.connect_timeout),
        );
        {
            let mut conn = pool.get().await.map_err(|err| {
                warn!(error = %err, "durable capture tier unreachable");
                map_pool_error(err)
            })?;
            bootstrap_schema(&mut conn).await?;
        }
        info!("durable capture tier connected");
        Ok(Arc::new(DieselCaptureRepository::new(pool)))
    }
}
