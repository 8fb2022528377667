//! Admin login handler.
//!
//! ```text
//! POST /auth/login {"username":"admin","password":"admin123"}
//! ```
//!
//! Responses use a `{"success": bool, "message": ...}` envelope instead of
//! the `{"error": ...}` body used elsewhere, matching what the admin view
//! reads.

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::{ErrorCode, INVALID_LOGIN_MESSAGE, LoginCredentials};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::state::HttpState;

/// Message for a successful login.
pub const LOGIN_SUCCESS_MESSAGE: &str = "Login successful";
/// Message for a body that is not valid JSON.
pub const INVALID_REQUEST_MESSAGE: &str = "Invalid request";

/// Login request body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct LoginRequest {
    #[schema(value_type = String, example = "admin")]
    #[serde(default)]
    pub username: Option<serde_json::Value>,
    #[schema(value_type = String, example = "admin123")]
    #[serde(default)]
    pub password: Option<serde_json::Value>,
}

fn as_text(value: Option<&serde_json::Value>) -> &str {
    value.and_then(serde_json::Value::as_str).unwrap_or_default()
}

/// Login response envelope.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct LoginResponse {
    pub success: bool,
    /// Opaque bearer token, present on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    pub message: String,
}

impl LoginResponse {
    fn rejected(message: &str) -> Self {
        Self {
            success: false,
            token: None,
            message: message.to_owned(),
        }
    }
}

/// Exchange admin credentials for an opaque token.
///
/// The body is parsed as JSON whatever its `Content-Type`. Missing or
/// non-string fields are treated as wrong credentials.
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = LoginResponse),
        (status = 400, description = "Body is not valid JSON", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = LoginResponse),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Bytes,
) -> ApiResult<HttpResponse> {
    let body: LoginRequest = match serde_json::from_slice(&payload) {
        Ok(body) => body,
        Err(err) => {
            debug!(error = %err, "unreadable login body");
            return Ok(HttpResponse::BadRequest().json(LoginResponse::rejected(INVALID_REQUEST_MESSAGE)));
        }
    };

    let credentials = match LoginCredentials::try_from_parts(
        as_text(body.username.as_ref()),
        as_text(body.password.as_ref()),
    ) {
        Ok(credentials) => credentials,
        Err(err) => {
            debug!(error = %err, "login payload failed validation");
            return Ok(HttpResponse::Unauthorized().json(LoginResponse::rejected(INVALID_LOGIN_MESSAGE)));
        }
    };

    match state.login.authenticate(&credentials).await {
        Ok(token) => Ok(HttpResponse::Ok().json(LoginResponse {
            success: true,
            token: Some(token.as_str().to_owned()),
            message: LOGIN_SUCCESS_MESSAGE.to_owned(),
        })),
        Err(err) if err.code() == ErrorCode::Unauthorized => {
            Ok(HttpResponse::Unauthorized().json(LoginResponse::rejected(err.message())))
        }
        Err(err) => Err(err),
    }
}
