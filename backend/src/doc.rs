//! OpenAPI documentation for the portfolio backend.
//!
//! [`ApiDoc`] registers the CV request, login and health endpoints. Swagger
//! UI serves it in debug builds and `cargo run --bin openapi-dump` prints it.

use utoipa::OpenApi;

use crate::inbound::http::auth::{LoginRequest, LoginResponse};
use crate::inbound::http::cv_requests::{
    CvRequestBody, CvRequestDetail, CvRequestList, CvRequestSubmitted,
};
use crate::inbound::http::error::ErrorBody;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Portfolio backend API",
        description = "CV request capture, admin login and health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::cv_requests::submit_cv_request,
        crate::inbound::http::cv_requests::list_cv_requests,
        crate::inbound::http::auth::login,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        CvRequestBody,
        CvRequestSubmitted,
        CvRequestList,
        CvRequestDetail,
        LoginRequest,
        LoginResponse,
        ErrorBody,
    )),
    tags(
        (name = "cv-requests", description = "Email capture for CV requests"),
        (name = "auth", description = "Admin login"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
