//! Persistence port for subscriptions.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::ports::RepositoryError;
use crate::domain::subscription::{Subscription, SubscriptionType};

/// Store-agnostic access to subscription rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Subscription>, RepositoryError>;

    async fn find_all(&self) -> Result<Vec<Subscription>, RepositoryError>;

    /// Insert when `id` is `None`, otherwise insert-or-update keyed on it.
    async fn save(&self, subscription: Subscription) -> Result<Subscription, RepositoryError>;

    async fn delete_by_id(&self, id: i64) -> Result<(), RepositoryError>;

    /// Subscriptions of a plan type, ordered by start date ascending.
    async fn find_by_type(
        &self,
        subscription_type: SubscriptionType,
    ) -> Result<Vec<Subscription>, RepositoryError>;

    /// Subscriptions whose start date falls within the inclusive range.
    async fn find_by_start_date_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Subscription>, RepositoryError>;

    /// Lookup index used to resolve composed skier views.
    async fn find_by_ids(&self, ids: Vec<i64>) -> Result<Vec<Subscription>, RepositoryError>;
}
