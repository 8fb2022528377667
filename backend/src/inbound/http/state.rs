//! Shared HTTP adapter state.
//!
//! Handlers receive this via `actix_web::web::Data` and only depend on the
//! driving ports, so they stay testable with mocks.

use std::sync::Arc;

use crate::domain::ports::{CvRequestCommand, CvRequestQuery, LoginService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub cv_requests: Arc<dyn CvRequestCommand>,
    pub cv_requests_query: Arc<dyn CvRequestQuery>,
    pub login: Arc<dyn LoginService>,
}

impl HttpState {
    /// Bundle the driving ports used by the handlers.
    pub fn new(
        cv_requests: Arc<dyn CvRequestCommand>,
        cv_requests_query: Arc<dyn CvRequestQuery>,
        login: Arc<dyn LoginService>,
    ) -> Self {
        Self {
            cv_requests,
            cv_requests_query,
            login,
        }
    }
}
