//! Domain primitives, services and ports.
//!
//! Purpose: define the strongly typed values used by the HTTP adapters and
//! the storage tiers, together with the services that implement the CV
//! request and admin login use-cases. Nothing in here depends on a concrete
//! transport or store.
//!
//! Public surface:
//! - `Error` / `ErrorCode`: API error payload and stable identifiers.
//! - `EmailAddress`: validated, lowercased email.
//! - `CaptureRecord`: one stored submission.
//! - `CvRequestService` / `AdminLoginService`: use-case implementations.

pub mod admin_login_service;
pub mod auth;
pub mod capture_record;
pub mod cv_request_service;
pub mod email;
pub mod error;
pub mod ports;
pub mod trace_id;

pub use self::admin_login_service::{AdminLoginService, INVALID_LOGIN_MESSAGE};
pub use self::auth::{
    AdminCredentials, AdminCredentialsError, AdminToken, LoginCredentials, LoginValidationError,
    hash_password,
};
pub use self::capture_record::CaptureRecord;
pub use self::cv_request_service::{
    CvRequestService, DUPLICATE_EMAIL_MESSAGE, EMAIL_REQUIRED_MESSAGE, INVALID_EMAIL_MESSAGE,
};
pub use self::email::{EmailAddress, EmailValidationError};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::trace_id::TraceId;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::unauthorized("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
