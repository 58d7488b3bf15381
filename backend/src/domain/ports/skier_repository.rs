//! Persistence port for skiers and their piste associations.

use async_trait::async_trait;

use crate::domain::ports::RepositoryError;
use crate::domain::skier::Skier;
use crate::domain::subscription::SubscriptionType;

/// Store-agnostic access to skier rows and the skier-piste join table.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SkierRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Skier>, RepositoryError>;

    async fn find_all(&self) -> Result<Vec<Skier>, RepositoryError>;

    /// Insert when `id` is `None`, otherwise insert-or-update keyed on it.
    async fn save(&self, skier: Skier) -> Result<Skier, RepositoryError>;

    async fn delete_by_id(&self, id: i64) -> Result<(), RepositoryError>;

    /// Skiers whose current subscription has the given plan type.
    async fn find_by_subscription_type(
        &self,
        subscription_type: SubscriptionType,
    ) -> Result<Vec<Skier>, RepositoryError>;

    /// Record that a skier uses a piste. Idempotent on re-assign.
    async fn attach_piste(&self, skier_id: i64, piste_id: i64) -> Result<(), RepositoryError>;

    /// Lookup index over the join table.
    async fn piste_ids_for(&self, skier_id: i64) -> Result<Vec<i64>, RepositoryError>;
}
