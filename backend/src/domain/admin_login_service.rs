//! Login service backed by configured admin credentials.

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::ports::LoginService;
use crate::domain::{AdminCredentials, AdminToken, Error, LoginCredentials};

/// Message returned for any credential mismatch.
pub const INVALID_LOGIN_MESSAGE: &str = "Invalid username or password";

/// Authenticates against a single configured admin identity.
#[derive(Debug, Clone)]
pub struct AdminLoginService {
    admin: AdminCredentials,
}

impl AdminLoginService {
    /// Create a service for the given admin identity.
    pub fn new(admin: AdminCredentials) -> Self {
        Self { admin }
    }
}

#[async_trait]
impl LoginService for AdminLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<AdminToken, Error> {
        if !self.admin.matches(credentials) {
            warn!(username = credentials.username(), "admin login rejected");
            return Err(Error::unauthorized(INVALID_LOGIN_MESSAGE));
        }
        info!(username = credentials.username(), "admin login accepted");
        Ok(AdminToken::generate())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    fn service() -> AdminLoginService {
        AdminLoginService::new(
            AdminCredentials::from_plaintext("admin", "admin123").expect("valid admin"),
        )
    }

    #[rstest]
    #[case("admin", "admin123", true)]
    #[case("admin", "wrong", false)]
    #[case("other", "admin123", false)]
    #[tokio::test]
    async fn authenticates_only_the_configured_admin(
        #[case] username: &str,
        #[case] password: &str,
        #[case] should_succeed: bool,
    ) {
        let creds = LoginCredentials::try_from_parts(username, password).expect("shape");
        match (should_succeed, service().authenticate(&creds).await) {
            (true, Ok(token)) => assert!(!token.as_str().is_empty()),
            (false, Err(err)) => {
                assert_eq!(err.code(), ErrorCode::Unauthorized);
                assert_eq!(err.message(), INVALID_LOGIN_MESSAGE);
            }
            (true, Err(err)) => panic!("expected success, got error: {err:?}"),
            (false, Ok(_)) => panic!("expected failure, got a token"),
        }
    }
}
