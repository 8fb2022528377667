//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod cv_requests;
pub mod error;
pub mod health;
pub mod state;

pub use error::ApiResult;
