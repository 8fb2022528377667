//! Internal Diesel row structs for the `cv_requests` table.
//!
//! These never leave the persistence module; rows are converted into
//! [`CaptureRecord`] values before reaching the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::ports::CaptureRepositoryError;
use crate::domain::{CaptureRecord, EmailAddress};

use super::schema::cv_requests;

/// Row struct for reading from the `cv_requests` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = cv_requests)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CvRequestRow {
    #[expect(dead_code, reason = "surrogate key only used for ordering in SQL")]
    pub id: i32,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<CvRequestRow> for CaptureRecord {
    type Error = CaptureRepositoryError;

    fn try_from(row: CvRequestRow) -> Result<Self, Self::Error> {
        let email = EmailAddress::parse(&row.email).map_err(|err| {
            CaptureRepositoryError::query(format!("stored email {:?} is invalid: {err}", row.email))
        })?;
        Ok(CaptureRecord::new(email, row.created_at).with_updated_at(row.updated_at))
    }
}

/// Insertable struct for new capture rows.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = cv_requests)]
pub(crate) struct NewCvRequestRow<'a> {
    pub email: &'a str,
    pub created_at: DateTime<Utc>,
}

impl<'a> From<&'a CaptureRecord> for NewCvRequestRow<'a> {
    fn from(record: &'a CaptureRecord) -> Self {
        Self {
            email: record.email().as_str(),
            created_at: record.created_at(),
        }
    }
}
