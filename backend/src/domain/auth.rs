//! Authentication primitives for the admin view.
//!
//! Credentials are validated here before a handler talks to the login port.
//! The admin secret is kept as a SHA-256 digest so configuration never has
//! to hold the plaintext password longer than startup.

use std::fmt;

use rand::RngCore;
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    #[error("username must not be empty")]
    EmptyUsername,
    /// Password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Validated login credentials.
///
/// ## Invariants
/// - `username` is trimmed and non-empty.
/// - `password` is non-empty and keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" admin ", "admin123").unwrap();
/// assert_eq!(creds.username(), " admin ");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    ///
    /// The username is kept verbatim so it must match the configured admin
    /// exactly; a blank one is rejected.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        if username.trim().is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            username: username.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username supplied by the caller.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password supplied by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Errors raised while building [`AdminCredentials`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdminCredentialsError {
    /// The configured username was blank.
    #[error("admin username must not be empty")]
    EmptyUsername,
    /// The configured hash is not 64 hex characters.
    #[error("admin password hash must be a hex-encoded SHA-256 digest")]
    InvalidPasswordHash,
}

/// Configured admin identity: a username and a SHA-256 password digest.
#[derive(Clone, PartialEq, Eq)]
pub struct AdminCredentials {
    username: String,
    password_hash: [u8; 32],
}

impl AdminCredentials {
    /// Build credentials from a username and a hex-encoded SHA-256 digest.
    pub fn from_hash(username: &str, password_hash_hex: &str) -> Result<Self, AdminCredentialsError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(AdminCredentialsError::EmptyUsername);
        }
        let mut password_hash = [0_u8; 32];
        hex::decode_to_slice(password_hash_hex.trim(), &mut password_hash)
            .map_err(|_| AdminCredentialsError::InvalidPasswordHash)?;
        Ok(Self {
            username: username.to_owned(),
            password_hash,
        })
    }

    /// Build credentials from a plaintext password, hashing it immediately.
    pub fn from_plaintext(username: &str, password: &str) -> Result<Self, AdminCredentialsError> {
        let digest = Zeroizing::new(hash_password(password));
        Self::from_hash(username, &digest)
    }

    /// Configured admin username.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Whether the supplied credentials match the configured admin.
    pub fn matches(&self, credentials: &LoginCredentials) -> bool {
        let supplied: [u8; 32] = Sha256::digest(credentials.password().as_bytes()).into();
        credentials.username() == self.username && supplied == self.password_hash
    }
}

impl fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username)
            .field("password_hash", &"<redacted>")
            .finish()
    }
}

/// Hex-encoded SHA-256 digest of `password`.
///
/// # Examples
/// ```
/// use backend::domain::hash_password;
///
/// assert_eq!(hash_password("admin123").len(), 64);
/// ```
pub fn hash_password(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

/// Opaque bearer value handed to the admin UI after login.
///
/// The token is random and is not verified by any endpoint.
#[derive(Clone, PartialEq, Eq)]
pub struct AdminToken(String);

impl AdminToken {
    /// Mint a fresh 256-bit random token.
    pub fn generate() -> Self {
        let mut bytes = [0_u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(hex::encode(bytes))
    }

    /// Borrow the token value.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for AdminToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AdminToken(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", LoginValidationError::EmptyUsername)]
    #[case("   ", "pw", LoginValidationError::EmptyUsername)]
    #[case("user", "", LoginValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(username, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case("admin", "admin123", true)]
    #[case("admin", "admin1234", false)]
    #[case("root", "admin123", false)]
    #[case("  admin ", "admin123", false)]
    #[case("Admin", "admin123", false)]
    fn admin_credentials_match_on_username_and_digest(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: bool,
    ) {
        let admin = AdminCredentials::from_plaintext("admin", "admin123").expect("valid admin");
        let creds = LoginCredentials::try_from_parts(username, password).expect("shape");
        assert_eq!(admin.matches(&creds), expected);
    }

    #[rstest]
    #[case("zz")]
    #[case("abcd")]
    fn from_hash_rejects_non_digest(#[case] hash: &str) {
        let err = AdminCredentials::from_hash("admin", hash).expect_err("bad digest");
        assert_eq!(err, AdminCredentialsError::InvalidPasswordHash);
    }

    #[rstest]
    fn from_hash_accepts_precomputed_digest() {
        let admin =
            AdminCredentials::from_hash("admin", &hash_password("s3cret")).expect("valid digest");
        let creds = LoginCredentials::try_from_parts("admin", "s3cret").expect("shape");
        assert!(admin.matches(&creds));
    }

    #[rstest]
    fn debug_output_redacts_secrets() {
        let admin = AdminCredentials::from_plaintext("admin", "admin123").expect("valid admin");
        assert!(!format!("{admin:?}").contains(&hash_password("admin123")));
        let token = AdminToken::generate();
        assert!(!format!("{token:?}").contains(token.as_str()));
    }

    #[rstest]
    fn tokens_are_unique_hex() {
        let first = AdminToken::generate();
        let second = AdminToken::generate();
        assert_ne!(first, second);
        assert_eq!(first.as_str().len(), 64);
        assert!(first.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }
}
