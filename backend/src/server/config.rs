//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use backend::domain::AdminCredentials;
use backend::settings::{AppSettings, SettingsError};

/// Resolved configuration for creating the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) database_url: Option<String>,
    pub(crate) db_connect_timeout: Duration,
    pub(crate) data_dir: PathBuf,
    pub(crate) admin: AdminCredentials,
}

impl ServerConfig {
    /// Configuration with only the file and memory tiers enabled.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, data_dir: PathBuf, admin: AdminCredentials) -> Self {
        Self {
            bind_addr,
            database_url: None,
            db_connect_timeout: Duration::from_secs(5),
            data_dir,
            admin,
        }
    }

    /// Resolve loaded settings into a server configuration.
    ///
    /// # Errors
    /// Returns [`SettingsError`] when a setting cannot be interpreted.
    pub fn from_settings(settings: &AppSettings) -> Result<Self, SettingsError> {
        let config = Self::new(
            settings.bind_addr()?,
            settings.data_dir(),
            settings.admin_credentials()?,
        )
        .with_connect_timeout(settings.db_connect_timeout());
        Ok(match settings.database_url()? {
            Some(url) => config.with_database_url(url),
            None => config,
        })
    }

    /// Enable the durable tier.
    #[must_use]
    pub fn with_database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    /// Budget for reaching the durable tier before falling back.
    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.db_connect_timeout = timeout;
        self
    }

    /// Socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
