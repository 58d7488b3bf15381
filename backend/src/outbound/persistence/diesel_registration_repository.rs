//! PostgreSQL-backed `RegistrationRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{RegistrationRepository, RepositoryError};
use crate::domain::registration::Registration;

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewRegistrationRow, RegistrationRow, RegistrationUpdate};
use super::pool::DbPool;
use super::schema::registrations;

/// Diesel-backed implementation of the registration repository port.
#[derive(Clone)]
pub struct DieselRegistrationRepository {
    pool: DbPool,
}

impl DieselRegistrationRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RegistrationRepository for DieselRegistrationRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Registration>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = registrations::table
            .filter(registrations::id.eq(id))
            .select(RegistrationRow::as_select())
            .first::<RegistrationRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(Registration::from))
    }

    async fn find_all(&self) -> Result<Vec<Registration>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<RegistrationRow> = registrations::table
            .select(RegistrationRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(Registration::from).collect())
    }

    async fn save(&self, registration: Registration) -> Result<Registration, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewRegistrationRow::from_domain(&registration);

        let row = match registration.id {
            None => diesel::insert_into(registrations::table)
                .values(&new_row)
                .returning(RegistrationRow::as_returning())
                .get_result::<RegistrationRow>(&mut conn)
                .await
                .map_err(map_diesel_error)?,
            Some(id) => {
                let update_row = RegistrationUpdate::from_domain(&registration);
                diesel::insert_into(registrations::table)
                    .values((registrations::id.eq(id), &new_row))
                    .on_conflict(registrations::id)
                    .do_update()
                    .set(&update_row)
                    .returning(RegistrationRow::as_returning())
                    .get_result::<RegistrationRow>(&mut conn)
                    .await
                    .map_err(map_diesel_error)?
            }
        };

        Ok(Registration::from(row))
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(registrations::table.filter(registrations::id.eq(id)))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_skier_ids(
        &self,
        ids: Vec<i64>,
    ) -> Result<Vec<Registration>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let ids: Vec<Option<i64>> = ids.into_iter().map(Some).collect();

        let rows: Vec<RegistrationRow> = registrations::table
            .filter(registrations::skier_id.eq_any(ids))
            .select(RegistrationRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(Registration::from).collect())
    }
}
