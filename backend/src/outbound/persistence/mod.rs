//! PostgreSQL capture tier using Diesel ORM.
//!
//! Built on `diesel-async` with a `bb8` pool. Row structs (`models.rs`) and
//! table definitions (`schema.rs`) stay private to this module; the domain
//! only ever sees [`CaptureRecord`](crate::domain::CaptureRecord).
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use backend::domain::ports::CaptureTierConnector;
//! use backend::outbound::persistence::PostgresTierConnector;
//!
//! # async fn run() {
//! let connector = PostgresTierConnector::new(
//!     Some("postgres://localhost/portfolio".to_owned()),
//!     Duration::from_secs(5),
//! );
//! let repository = connector.connect().await;
//! # let _ = repository;
//! # }
//! ```

mod bootstrap;
mod diesel_capture_repository;
pub(crate) mod diesel_error_mapping;
mod models;
mod pool;
mod postgres_tier;
mod schema;

pub use diesel_capture_repository::DieselCaptureRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
pub use postgres_tier::{DatabaseUrlError, PostgresTierConnector, with_database_name};
