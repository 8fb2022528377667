//! PostgreSQL-backed `CaptureRepository` implementation using Diesel.
//!
//! The `UNIQUE` constraint on `cv_requests.email` is what actually enforces
//! deduplication across concurrent writers and server instances.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CaptureRepository, CaptureRepositoryError};
use crate::domain::{CaptureRecord, EmailAddress};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{CvRequestRow, NewCvRequestRow};
use super::pool::DbPool;
use super::schema::cv_requests;

/// Diesel-backed implementation of the capture repository port.
#[derive(Clone)]
pub struct DieselCaptureRepository {
    pool: DbPool,
}

impl DieselCaptureRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CaptureRepository for DieselCaptureRepository {
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<CaptureRecord>, CaptureRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = cv_requests::table
            .filter(cv_requests::email.eq(email.as_str()))
            .select(CvRequestRow::as_select())
            .first::<CvRequestRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(CaptureRecord::try_from).transpose()
    }

    async fn insert(&self, record: &CaptureRecord) -> Result<(), CaptureRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(cv_requests::table)
            .values(NewCvRequestRow::from(record))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn count(&self) -> Result<u64, CaptureRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let total: i64 = cv_requests::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        u64::try_from(total)
            .map_err(|_| CaptureRepositoryError::query(format!("negative row count {total}")))
    }

    async fn list_all(&self) -> Result<Vec<CaptureRecord>, CaptureRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<CvRequestRow> = cv_requests::table
            .order((cv_requests::created_at.desc(), cv_requests::id.desc()))
            .select(CvRequestRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(CaptureRecord::try_from).collect()
    }
}
