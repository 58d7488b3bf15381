//! PostgreSQL-backed `PisteRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::piste::Piste;
use crate::domain::ports::{PisteRepository, RepositoryError};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewPisteRow, PisteRow, PisteUpdate};
use super::pool::DbPool;
use super::schema::pistes;

/// Diesel-backed implementation of the piste repository port.
#[derive(Clone)]
pub struct DieselPisteRepository {
    pool: DbPool,
}

impl DieselPisteRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PisteRepository for DieselPisteRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Piste>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = pistes::table
            .filter(pistes::id.eq(id))
            .select(PisteRow::as_select())
            .first::<PisteRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(Piste::try_from).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Piste>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<PisteRow> = pistes::table
            .select(PisteRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(Piste::try_from).collect()
    }

    async fn save(&self, piste: Piste) -> Result<Piste, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewPisteRow::from_domain(&piste);

        let row = match piste.id {
            None => diesel::insert_into(pistes::table)
                .values(&new_row)
                .returning(PisteRow::as_returning())
                .get_result::<PisteRow>(&mut conn)
                .await
                .map_err(map_diesel_error)?,
            Some(id) => {
                let update_row = PisteUpdate::from_domain(&piste);
                diesel::insert_into(pistes::table)
                    .values((pistes::id.eq(id), &new_row))
                    .on_conflict(pistes::id)
                    .do_update()
                    .set(&update_row)
                    .returning(PisteRow::as_returning())
                    .get_result::<PisteRow>(&mut conn)
                    .await
                    .map_err(map_diesel_error)?
            }
        };

        Piste::try_from(row)
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(pistes::table.filter(pistes::id.eq(id)))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}
