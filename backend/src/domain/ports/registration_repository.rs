//! Persistence port for registrations.

use async_trait::async_trait;

use crate::domain::ports::RepositoryError;
use crate::domain::registration::Registration;

/// Store-agnostic access to registration rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Registration>, RepositoryError>;

    async fn find_all(&self) -> Result<Vec<Registration>, RepositoryError>;

    /// Insert when `id` is `None`, otherwise insert-or-update keyed on it.
    async fn save(&self, registration: Registration) -> Result<Registration, RepositoryError>;

    async fn delete_by_id(&self, id: i64) -> Result<(), RepositoryError>;

    /// Lookup index used to resolve composed skier views.
    async fn find_by_skier_ids(&self, ids: Vec<i64>)
    -> Result<Vec<Registration>, RepositoryError>;
}
