//! Persistence port for pistes.

use async_trait::async_trait;

use crate::domain::piste::Piste;
use crate::domain::ports::RepositoryError;

/// Store-agnostic access to piste rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PisteRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Piste>, RepositoryError>;

    async fn find_all(&self) -> Result<Vec<Piste>, RepositoryError>;

    /// Insert when `id` is `None`, otherwise insert-or-update keyed on it.
    async fn save(&self, piste: Piste) -> Result<Piste, RepositoryError>;

    async fn delete_by_id(&self, id: i64) -> Result<(), RepositoryError>;
}
