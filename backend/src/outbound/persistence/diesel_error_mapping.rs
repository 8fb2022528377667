//! Diesel and pool error mapping for the durable capture tier.
//!
//! Anything that means "the database is not there" becomes a connection
//! error so the fallback chain demotes; a unique violation on `email` is the
//! authoritative duplicate signal.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::CaptureRepositoryError;

use super::pool::PoolError;

/// Map pool checkout/build failures to connection errors.
pub(crate) fn map_pool_error(error: PoolError) -> CaptureRepositoryError {
    CaptureRepositoryError::connection(error.message())
}

/// Map Diesel errors to capture repository errors.
pub(crate) fn map_diesel_error(error: DieselError) -> CaptureRepositoryError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            CaptureRepositoryError::conflict("email already stored")
        }
        // diesel-async reports transport failures (socket closed, server gone)
        // as `UnableToSendCommand`.
        DieselError::DatabaseError(DatabaseErrorKind::UnableToSendCommand, _)
        | DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _)
        | DieselError::BrokenTransactionManager => {
            CaptureRepositoryError::connection("database connection error")
        }
        DieselError::NotFound => CaptureRepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => CaptureRepositoryError::query("database query error"),
        _ => CaptureRepositoryError::query("database error"),
    }
}
