//! Persistence port for instructors.

use async_trait::async_trait;

use crate::domain::instructor::Instructor;
use crate::domain::ports::RepositoryError;

/// Store-agnostic access to instructor rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InstructorRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Instructor>, RepositoryError>;

    async fn find_all(&self) -> Result<Vec<Instructor>, RepositoryError>;

    /// Insert when `id` is `None`, otherwise insert-or-update keyed on it.
    async fn save(&self, instructor: Instructor) -> Result<Instructor, RepositoryError>;

    async fn delete_by_id(&self, id: i64) -> Result<(), RepositoryError>;
}
