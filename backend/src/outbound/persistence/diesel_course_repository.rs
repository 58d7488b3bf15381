//! PostgreSQL-backed `CourseRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::course::Course;
use crate::domain::ports::{CourseRepository, RepositoryError};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{CourseRow, CourseUpdate, NewCourseRow};
use super::pool::DbPool;
use super::schema::courses;

/// Diesel-backed implementation of the course repository port.
#[derive(Clone)]
pub struct DieselCourseRepository {
    pool: DbPool,
}

impl DieselCourseRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn rows_to_domain(rows: Vec<CourseRow>) -> Result<Vec<Course>, RepositoryError> {
    rows.into_iter().map(Course::try_from).collect()
}

#[async_trait]
impl CourseRepository for DieselCourseRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Course>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = courses::table
            .filter(courses::id.eq(id))
            .select(CourseRow::as_select())
            .first::<CourseRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(Course::try_from).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Course>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<CourseRow> = courses::table
            .select(CourseRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_domain(rows)
    }

    async fn save(&self, course: Course) -> Result<Course, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewCourseRow::from_domain(&course);

        let row = match course.id {
            None => diesel::insert_into(courses::table)
                .values(&new_row)
                .returning(CourseRow::as_returning())
                .get_result::<CourseRow>(&mut conn)
                .await
                .map_err(map_diesel_error)?,
            Some(id) => {
                let update_row = CourseUpdate::from_domain(&course);
                diesel::insert_into(courses::table)
                    .values((courses::id.eq(id), &new_row))
                    .on_conflict(courses::id)
                    .do_update()
                    .set(&update_row)
                    .returning(CourseRow::as_returning())
                    .get_result::<CourseRow>(&mut conn)
                    .await
                    .map_err(map_diesel_error)?
            }
        };

        Course::try_from(row)
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(courses::table.filter(courses::id.eq(id)))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_instructor(&self, instructor_id: i64) -> Result<Vec<Course>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<CourseRow> = courses::table
            .filter(courses::instructor_id.eq(Some(instructor_id)))
            .select(CourseRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_domain(rows)
    }
}
