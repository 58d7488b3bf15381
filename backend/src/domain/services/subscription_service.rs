//! Subscription service: tariff catalogue CRUD and derived lookups.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::error::Error;
use crate::domain::ports::SubscriptionRepository;
use crate::domain::services::map_repository_error;
use crate::domain::subscription::{Subscription, SubscriptionType};

/// Driving port for subscription use cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubscriptionService: Send + Sync {
    /// Persist a new subscription with its end date derived from the plan.
    async fn add_subscription(&self, subscription: Subscription) -> Result<Subscription, Error>;

    /// Persist the subscription exactly as given, without recomputation.
    async fn update_subscription(&self, subscription: Subscription) -> Result<Subscription, Error>;

    async fn retrieve_subscription(&self, id: i64) -> Result<Option<Subscription>, Error>;

    async fn retrieve_all_subscriptions(&self) -> Result<Vec<Subscription>, Error>;

    /// Subscriptions of one plan type, ordered by start date.
    async fn retrieve_subscriptions_by_type(
        &self,
        subscription_type: SubscriptionType,
    ) -> Result<Vec<Subscription>, Error>;

    /// Subscriptions starting within the inclusive date range.
    async fn retrieve_subscriptions_by_dates(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Subscription>, Error>;

    async fn remove_subscription(&self, id: i64) -> Result<(), Error>;
}

/// Default [`SubscriptionService`] over the repository port.
pub struct SubscriptionServiceImpl {
    subscriptions: Arc<dyn SubscriptionRepository>,
}

impl SubscriptionServiceImpl {
    #[must_use]
    pub fn new(subscriptions: Arc<dyn SubscriptionRepository>) -> Self {
        Self { subscriptions }
    }
}

#[async_trait]
impl SubscriptionService for SubscriptionServiceImpl {
    async fn add_subscription(&self, subscription: Subscription) -> Result<Subscription, Error> {
        let mut subscription = subscription;
        let end_date = subscription
            .subscription_type
            .end_date(subscription.start_date)
            .ok_or_else(|| Error::invalid_request("subscription start date is out of range"))?;
        subscription.end_date = Some(end_date);
        self.subscriptions
            .save(subscription)
            .await
            .map_err(map_repository_error)
    }

    async fn update_subscription(&self, subscription: Subscription) -> Result<Subscription, Error> {
        self.subscriptions
            .save(subscription)
            .await
            .map_err(map_repository_error)
    }

    async fn retrieve_subscription(&self, id: i64) -> Result<Option<Subscription>, Error> {
        self.subscriptions
            .find_by_id(id)
            .await
            .map_err(map_repository_error)
    }

    async fn retrieve_all_subscriptions(&self) -> Result<Vec<Subscription>, Error> {
        self.subscriptions
            .find_all()
            .await
            .map_err(map_repository_error)
    }

    async fn retrieve_subscriptions_by_type(
        &self,
        subscription_type: SubscriptionType,
    ) -> Result<Vec<Subscription>, Error> {
        self.subscriptions
            .find_by_type(subscription_type)
            .await
            .map_err(map_repository_error)
    }

    async fn retrieve_subscriptions_by_dates(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Subscription>, Error> {
        self.subscriptions
            .find_by_start_date_between(start, end)
            .await
            .map_err(map_repository_error)
    }

    async fn remove_subscription(&self, id: i64) -> Result<(), Error> {
        self.subscriptions
            .delete_by_id(id)
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "subscription_service_tests.rs"]
mod tests;
