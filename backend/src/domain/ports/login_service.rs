//! Driving port for admin login.
//!
//! Inbound adapters call it to exchange credentials for an opaque bearer
//! token without knowing where the admin credentials come from.

use async_trait::async_trait;

use crate::domain::{AdminToken, Error, LoginCredentials};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and mint a token for the admin view.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<AdminToken, Error>;
}
