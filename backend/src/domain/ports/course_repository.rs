//! Persistence port for courses.

use async_trait::async_trait;

use crate::domain::course::Course;
use crate::domain::ports::RepositoryError;

/// Store-agnostic access to course rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Course>, RepositoryError>;

    async fn find_all(&self) -> Result<Vec<Course>, RepositoryError>;

    /// Insert when `id` is `None`, otherwise insert-or-update keyed on it.
    async fn save(&self, course: Course) -> Result<Course, RepositoryError>;

    async fn delete_by_id(&self, id: i64) -> Result<(), RepositoryError>;

    /// Courses assigned to the given instructor.
    async fn find_by_instructor(&self, instructor_id: i64) -> Result<Vec<Course>, RepositoryError>;
}
