//! Idempotent schema bootstrap for the durable capture tier.

use diesel_async::{AsyncPgConnection, SimpleAsyncConnection};

use crate::domain::ports::CaptureRepositoryError;

use super::diesel_error_mapping::map_diesel_error;

/// DDL run every time the tier connects.
pub(crate) const BOOTSTRAP_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS cv_requests (
    id SERIAL PRIMARY KEY,
    email VARCHAR(255) UNIQUE NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX IF NOT EXISTS idx_cv_requests_created_at ON cv_requests (created_at);

CREATE OR REPLACE FUNCTION cv_requests_touch_updated_at()
RETURNS TRIGGER AS $$
BEGIN
    NEW.updated_at = now();
    RETURN NEW;
END;
$$ LANGUAGE plpgsql;

DROP TRIGGER IF EXISTS cv_requests_touch_updated_at ON cv_requests;
CREATE TRIGGER cv_requests_touch_updated_at
    BEFORE UPDATE ON cv_requests
    FOR EACH ROW
    EXECUTE FUNCTION cv_requests_touch_updated_at();
"#;

/// Create the `cv_requests` table, index and trigger when missing.
pub(crate) async fn bootstrap_schema(
    conn: &mut AsyncPgConnection,
) -> Result<(), CaptureRepositoryError> {
    conn.batch_execute(BOOTSTRAP_SQL)
        .await
        .map_err(map_diesel_error)
}
