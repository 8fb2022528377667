//! Email address primitive used by the CV request capture flow.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Longest accepted address in bytes; matches the durable column width.
pub const MAX_EMAIL_LEN: usize = 255;

/// Validation errors returned by [`EmailAddress::parse`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EmailValidationError {
    /// The input was empty.
    #[error("Email is required")]
    Missing,
    /// The input does not look like `local@domain.tld`.
    #[error("Invalid email format")]
    InvalidFormat,
}

fn email_regex() -> &'static Regex {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Normalised (lowercased) email address.
///
/// ## Invariants
/// - Contains exactly one `@`, a non-empty local part, and at least one `.`
///   after the `@` with non-empty labels around it.
/// - Contains no whitespace.
/// - Is at most [`MAX_EMAIL_LEN`] bytes long.
/// - Is stored lowercased; equality is therefore case-insensitive with
///   respect to the raw input.
///
/// # Examples
/// ```
/// use backend::domain::EmailAddress;
///
/// let email = EmailAddress::parse("User@Example.COM").expect("valid email");
/// assert_eq!(email.as_ref(), "user@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate raw input and normalise it to lowercase.
    pub fn parse(raw: &str) -> Result<Self, EmailValidationError> {
        if raw.is_empty() {
            return Err(EmailValidationError::Missing);
        }
        if raw.len() > MAX_EMAIL_LEN || !email_regex().is_match(raw) {
            return Err(EmailValidationError::InvalidFormat);
        }
        Ok(Self(raw.to_lowercase()))
    }

    /// Borrow the normalised address.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = EmailValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}
