//! CV request capture handlers.
//!
//! ```text
//! POST /cv-request {"email":"visitor@example.com"}
//! GET  /cv-request
//! ```

use actix_web::{HttpResponse, get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::ports::{CvRequestListing, SubmitCvRequest};
use crate::domain::{EMAIL_REQUIRED_MESSAGE, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::state::HttpState;

/// Success message for `POST /cv-request`.
pub const SUBMITTED_MESSAGE: &str = "Email submitted successfully";

/// Request body for `POST /cv-request`.
///
/// `email` is kept as raw JSON so a non-string value reports "Email is
/// required" rather than a deserialisation error.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CvRequestBody {
    #[schema(value_type = String, example = "visitor@example.com")]
    #[serde(default)]
    pub email: Option<serde_json::Value>,
}

impl From<CvRequestBody> for SubmitCvRequest {
    fn from(body: CvRequestBody) -> Self {
        let email = match body.email {
            Some(serde_json::Value::String(raw)) => Some(raw),
            _ => None,
        };
        Self { email }
    }
}

/// Response body for a successful submission.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CvRequestSubmitted {
    #[schema(example = "Email submitted successfully")]
    pub message: String,
    /// Total number of stored requests after this one.
    pub count: u64,
}

/// One stored request in the admin listing.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CvRequestDetail {
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Response body for `GET /cv-request`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CvRequestList {
    /// Stored emails, most recent first.
    pub emails: Vec<String>,
    pub count: usize,
    /// When the listing was generated.
    #[serde(rename = "lastUpdated")]
    pub last_updated: DateTime<Utc>,
    pub details: Vec<CvRequestDetail>,
}

impl From<CvRequestListing> for CvRequestList {
    fn from(listing: CvRequestListing) -> Self {
        let count = listing.count();
        let details: Vec<CvRequestDetail> = listing
            .records
            .into_iter()
            .map(|record| CvRequestDetail {
                email: record.email().to_string(),
                created_at: record.created_at(),
            })
            .collect();
        Self {
            emails: details.iter().map(|d| d.email.clone()).collect(),
            count,
            last_updated: listing.generated_at,
            details,
        }
    }
}

/// Capture an email address requesting the CV.
///
/// The body is parsed as JSON whatever its `Content-Type`; a body that is
/// not valid JSON is treated as a missing email.
#[utoipa::path(
    post,
    path = "/cv-request",
    request_body = CvRequestBody,
    responses(
        (status = 200, description = "Email stored", body = CvRequestSubmitted),
        (status = 400, description = "Missing or malformed email", body = ErrorBody),
        (status = 409, description = "Email already stored", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["cv-requests"],
    operation_id = "submitCvRequest"
)]
#[post("/cv-request")]
pub async fn submit_cv_request(
    state: web::Data<HttpState>,
    payload: web::Bytes,
) -> ApiResult<web::Json<CvRequestSubmitted>> {
    let body: CvRequestBody = serde_json::from_slice(&payload).map_err(|err| {
        debug!(error = %err, "unreadable cv request body");
        Error::invalid_input(EMAIL_REQUIRED_MESSAGE)
    })?;

    let response = state.cv_requests.submit(body.into()).await?;
    Ok(web::Json(CvRequestSubmitted {
        message: SUBMITTED_MESSAGE.to_owned(),
        count: response.count,
    }))
}

/// List every captured email, most recent first.
#[utoipa::path(
    get,
    path = "/cv-request",
    responses(
        (status = 200, description = "Stored requests", body = CvRequestList),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["cv-requests"],
    operation_id = "listCvRequests"
)]
#[get("/cv-request")]
pub async fn list_cv_requests(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let listing = state.cv_requests_query.list_all().await?;
    Ok(HttpResponse::Ok().json(CvRequestList::from(listing)))
}

#[cfg(test)]
#[path = "cv_requests_tests.rs"]
mod tests;
