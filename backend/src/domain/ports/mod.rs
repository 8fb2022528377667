//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod capture_repository;
mod cv_request_command;
mod cv_request_query;
mod login_service;

#[cfg(test)]
pub use capture_repository::MockCaptureRepository;
pub use capture_repository::{
    CaptureRepository, CaptureRepositoryError, CaptureTierConnector, StorageTier,
};
#[cfg(test)]
pub use cv_request_command::MockCvRequestCommand;
pub use cv_request_command::{CvRequestCommand, SubmitCvRequest, SubmitCvRequestResponse};
#[cfg(test)]
pub use cv_request_query::MockCvRequestQuery;
pub use cv_request_query::{CvRequestListing, CvRequestQuery};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::LoginService;
