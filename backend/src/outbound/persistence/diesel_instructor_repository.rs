//! PostgreSQL-backed `InstructorRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::instructor::Instructor;
use crate::domain::ports::{InstructorRepository, RepositoryError};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{InstructorRow, InstructorUpdate, NewInstructorRow};
use super::pool::DbPool;
use super::schema::instructors;

/// Diesel-backed implementation of the instructor repository port.
#[derive(Clone)]
pub struct DieselInstructorRepository {
    pool: DbPool,
}

impl DieselInstructorRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InstructorRepository for DieselInstructorRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Instructor>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = instructors::table
            .filter(instructors::id.eq(id))
            .select(InstructorRow::as_select())
            .first::<InstructorRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(Instructor::from))
    }

    async fn find_all(&self) -> Result<Vec<Instructor>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<InstructorRow> = instructors::table
            .select(InstructorRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(Instructor::from).collect())
    }

    async fn save(&self, instructor: Instructor) -> Result<Instructor, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewInstructorRow::from_domain(&instructor);

        let row = match instructor.id {
            None => diesel::insert_into(instructors::table)
                .values(&new_row)
                .returning(InstructorRow::as_returning())
                .get_result::<InstructorRow>(&mut conn)
                .await
                .map_err(map_diesel_error)?,
            Some(id) => {
                let update_row = InstructorUpdate::from_domain(&instructor);
                diesel::insert_into(instructors::table)
                    .values((instructors::id.eq(id), &new_row))
                    .on_conflict(instructors::id)
                    .do_update()
                    .set(&update_row)
                    .returning(InstructorRow::as_returning())
                    .get_result::<InstructorRow>(&mut conn)
                    .await
                    .map_err(map_diesel_error)?
            }
        };

        Ok(Instructor::from(row))
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(instructors::table.filter(instructors::id.eq(id)))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}
