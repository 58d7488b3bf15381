//! PostgreSQL-backed `SubscriptionRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{RepositoryError, SubscriptionRepository};
use crate::domain::subscription::{Subscription, SubscriptionType};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewSubscriptionRow, SubscriptionRow, SubscriptionUpdate};
use super::pool::DbPool;
use super::schema::subscriptions;

/// Diesel-backed implementation of the subscription repository port.
#[derive(Clone)]
pub struct DieselSubscriptionRepository {
    pool: DbPool,
}

impl DieselSubscriptionRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn rows_to_domain(rows: Vec<SubscriptionRow>) -> Result<Vec<Subscription>, RepositoryError> {
    rows.into_iter().map(Subscription::try_from).collect()
}

#[async_trait]
impl SubscriptionRepository for DieselSubscriptionRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Subscription>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = subscriptions::table
            .filter(subscriptions::id.eq(id))
            .select(SubscriptionRow::as_select())
            .first::<SubscriptionRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(Subscription::try_from).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Subscription>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<SubscriptionRow> = subscriptions::table
            .select(SubscriptionRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_domain(rows)
    }

    async fn save(&self, subscription: Subscription) -> Result<Subscription, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewSubscriptionRow::from_domain(&subscription);

        let row = match subscription.id {
            None => diesel::insert_into(subscriptions::table)
                .values(&new_row)
                .returning(SubscriptionRow::as_returning())
                .get_result::<SubscriptionRow>(&mut conn)
                .await
                .map_err(map_diesel_error)?,
            Some(id) => {
                let update_row = SubscriptionUpdate::from_domain(&subscription);
                diesel::insert_into(subscriptions::table)
                    .values((subscriptions::id.eq(id), &new_row))
                    .on_conflict(subscriptions::id)
                    .do_update()
                    .set(&update_row)
                    .returning(SubscriptionRow::as_returning())
                    .get_result::<SubscriptionRow>(&mut conn)
                    .await
                    .map_err(map_diesel_error)?
            }
        };

        Subscription::try_from(row)
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(subscriptions::table.filter(subscriptions::id.eq(id)))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_type(
        &self,
        subscription_type: SubscriptionType,
    ) -> Result<Vec<Subscription>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<SubscriptionRow> = subscriptions::table
            .filter(subscriptions::subscription_type.eq(subscription_type.as_str()))
            .order(subscriptions::start_date.asc())
            .select(SubscriptionRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_domain(rows)
    }

    async fn find_by_start_date_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Subscription>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<SubscriptionRow> = subscriptions::table
            .filter(subscriptions::start_date.between(start, end))
            .order(subscriptions::start_date.asc())
            .select(SubscriptionRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_domain(rows)
    }

    async fn find_by_ids(&self, ids: Vec<i64>) -> Result<Vec<Subscription>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<SubscriptionRow> = subscriptions::table
            .filter(subscriptions::id.eq_any(ids))
            .select(SubscriptionRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_domain(rows)
    }
}
