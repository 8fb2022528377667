//! Application settings loaded via OrthoConfig.
//!
//! Values come from `PORTFOLIO_*` environment variables, CLI flags or a
//! config file, layered by OrthoConfig. Unset fields fall back to defaults;
//! accessors apply them and validate.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::{AdminCredentials, AdminCredentialsError};
use crate::outbound::persistence::{DatabaseUrlError, with_database_name};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_ADMIN_USERNAME: &str = "admin";
const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// Errors raised while turning raw settings into runtime values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// `bind_addr` is not a socket address.
    #[error("invalid bind address {value:?}: {message}")]
    InvalidBindAddr { value: String, message: String },
    /// The database URL could not be combined with the database name.
    #[error(transparent)]
    DatabaseUrl(#[from] DatabaseUrlError),
    /// The admin identity is unusable.
    #[error(transparent)]
    AdminCredentials(#[from] AdminCredentialsError),
}

/// Runtime configuration for the portfolio backend.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PORTFOLIO")]
pub struct AppSettings {
    /// PostgreSQL URL for the durable tier; unset disables it.
    pub database_url: Option<String>,
    /// Database name overriding the path of `database_url`.
    pub database_name: Option<String>,
    /// Directory holding the file tier's document.
    pub data_dir: Option<PathBuf>,
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    pub admin_username: Option<String>,
    /// Hex-encoded SHA-256 digest of the admin password.
    pub admin_password_hash: Option<String>,
    /// Plaintext admin password; takes precedence over the hash.
    pub admin_password: Option<String>,
    /// Seconds to wait for the durable tier before falling back.
    #[ortho_config(default = 5)]
    pub db_connect_timeout_secs: u64,
}

impl AppSettings {
    /// Effective database URL, with `database_name` applied when set.
    pub fn database_url(&self) -> Result<Option<String>, SettingsError> {
        let Some(url) = self.database_url.as_deref().filter(|url| !url.trim().is_empty()) else {
            return Ok(None);
        };
        match self.database_name.as_deref() {
            Some(name) if !name.trim().is_empty() => Ok(Some(with_database_name(url, name.trim())?)),
            _ => Ok(Some(url.to_owned())),
        }
    }

    /// Data directory, defaulting to `./data`.
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
    }

    /// Bind address, defaulting to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|err: std::net::AddrParseError| SettingsError::InvalidBindAddr {
            value: raw.to_owned(),
            message: err.to_string(),
        })
    }

    /// Durable tier connect timeout.
    pub fn db_connect_timeout(&self) -> Duration {
        Duration::from_secs(self.db_connect_timeout_secs)
    }

    /// Admin identity used by the login endpoint.
    pub fn admin_credentials(&self) -> Result<AdminCredentials, SettingsError> {
        let username = self
            .admin_username
            .as_deref()
            .unwrap_or(DEFAULT_ADMIN_USERNAME);
        let credentials = match (&self.admin_password, &self.admin_password_hash) {
            (Some(password), _) => AdminCredentials::from_plaintext(username, password)?,
            (None, Some(hash)) => AdminCredentials::from_hash(username, hash)?,
            (None, None) => AdminCredentials::from_plaintext(username, DEFAULT_ADMIN_PASSWORD)?,
        };
        Ok(credentials)
    }
}
