//! PostgreSQL-backed `SkierRepository` implementation using Diesel ORM.
//!
//! Persists skier rows and the skier-piste join table. The subscription-type
//! lookup joins through the subscriptions table so the filter happens in SQL.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{RepositoryError, SkierRepository};
use crate::domain::skier::Skier;
use crate::domain::subscription::SubscriptionType;

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewSkierRow, SkierPisteRow, SkierRow, SkierUpdate};
use super::pool::DbPool;
use super::schema::{skier_pistes, skiers, subscriptions};

/// Diesel-backed implementation of the skier repository port.
#[derive(Clone)]
pub struct DieselSkierRepository {
    pool: DbPool,
}

impl DieselSkierRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SkierRepository for DieselSkierRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Skier>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = skiers::table
            .filter(skiers::id.eq(id))
            .select(SkierRow::as_select())
            .first::<SkierRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(Skier::from))
    }

    async fn find_all(&self) -> Result<Vec<Skier>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<SkierRow> = skiers::table
            .select(SkierRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(Skier::from).collect())
    }

    async fn save(&self, skier: Skier) -> Result<Skier, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewSkierRow::from_domain(&skier);

        let row = match skier.id {
            None => diesel::insert_into(skiers::table)
                .values(&new_row)
                .returning(SkierRow::as_returning())
                .get_result::<SkierRow>(&mut conn)
                .await
                .map_err(map_diesel_error)?,
            Some(id) => {
                let update_row = SkierUpdate::from_domain(&skier);
                diesel::insert_into(skiers::table)
                    .values((skiers::id.eq(id), &new_row))
                    .on_conflict(skiers::id)
                    .do_update()
                    .set(&update_row)
                    .returning(SkierRow::as_returning())
                    .get_result::<SkierRow>(&mut conn)
                    .await
                    .map_err(map_diesel_error)?
            }
        };

        Ok(Skier::from(row))
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(skiers::table.filter(skiers::id.eq(id)))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_subscription_type(
        &self,
        subscription_type: SubscriptionType,
    ) -> Result<Vec<Skier>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<SkierRow> = skiers::table
            .inner_join(subscriptions::table)
            .filter(subscriptions::subscription_type.eq(subscription_type.as_str()))
            .select(SkierRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(Skier::from).collect())
    }

    async fn attach_piste(&self, skier_id: i64, piste_id: i64) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(skier_pistes::table)
            .values(&SkierPisteRow { skier_id, piste_id })
            .on_conflict((skier_pistes::skier_id, skier_pistes::piste_id))
            .do_nothing()
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn piste_ids_for(&self, skier_id: i64) -> Result<Vec<i64>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        skier_pistes::table
            .filter(skier_pistes::skier_id.eq(skier_id))
            .select(skier_pistes::piste_id)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)
    }
}
