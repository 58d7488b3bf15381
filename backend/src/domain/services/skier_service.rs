//! Skier service: intake, association wiring, and composed reads.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::domain::error::Error;
use crate::domain::ports::{
    CourseRepository, PisteRepository, RegistrationRepository, SkierRepository,
    SubscriptionRepository,
};
use crate::domain::registration::Registration;
use crate::domain::services::map_repository_error;
use crate::domain::skier::{Skier, SkierDetails, SkierDraft};
use crate::domain::subscription::{Subscription, SubscriptionType};

/// Driving port for skier use cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SkierService: Send + Sync {
    /// Create a skier; a nested subscription is persisted first with its end
    /// date derived from the plan.
    async fn add_skier(&self, draft: SkierDraft) -> Result<SkierDetails, Error>;

    /// Create a skier and enrol them in a course for each week listed in the
    /// draft. The nested subscription is persisted exactly as given.
    async fn add_skier_and_assign_to_course(
        &self,
        draft: SkierDraft,
        course_id: i64,
    ) -> Result<SkierDetails, Error>;

    /// Point an existing skier at an existing subscription.
    async fn assign_skier_to_subscription(
        &self,
        skier_id: i64,
        subscription_id: i64,
    ) -> Result<SkierDetails, Error>;

    /// Record that an existing skier uses an existing piste.
    async fn assign_skier_to_piste(
        &self,
        skier_id: i64,
        piste_id: i64,
    ) -> Result<SkierDetails, Error>;

    async fn retrieve_skier(&self, id: i64) -> Result<Option<SkierDetails>, Error>;

    async fn retrieve_all_skiers(&self) -> Result<Vec<SkierDetails>, Error>;

    async fn retrieve_skiers_by_subscription_type(
        &self,
        subscription_type: SubscriptionType,
    ) -> Result<Vec<SkierDetails>, Error>;

    async fn remove_skier(&self, id: i64) -> Result<(), Error>;
}

/// Default [`SkierService`] over the repository ports.
pub struct SkierServiceImpl {
    skiers: Arc<dyn SkierRepository>,
    subscriptions: Arc<dyn SubscriptionRepository>,
    pistes: Arc<dyn PisteRepository>,
    courses: Arc<dyn CourseRepository>,
    registrations: Arc<dyn RegistrationRepository>,
}

impl SkierServiceImpl {
    #[must_use]
    pub fn new(
        skiers: Arc<dyn SkierRepository>,
        subscriptions: Arc<dyn SubscriptionRepository>,
        pistes: Arc<dyn PisteRepository>,
        courses: Arc<dyn CourseRepository>,
        registrations: Arc<dyn RegistrationRepository>,
    ) -> Self {
        Self {
            skiers,
            subscriptions,
            pistes,
            courses,
            registrations,
        }
    }

    /// Resolve subscriptions and registrations for a batch of skiers through
    /// the repository lookup indices.
    async fn compose(&self, skiers: Vec<Skier>) -> Result<Vec<SkierDetails>, Error> {
        let subscription_ids: Vec<i64> = skiers.iter().filter_map(|s| s.subscription_id).collect();
        let skier_ids: Vec<i64> = skiers.iter().filter_map(|s| s.id).collect();

        let subscriptions = if subscription_ids.is_empty() {
            Vec::new()
        } else {
            self.subscriptions
                .find_by_ids(subscription_ids)
                .await
                .map_err(map_repository_error)?
        };
        let registrations = if skier_ids.is_empty() {
            Vec::new()
        } else {
            self.registrations
                .find_by_skier_ids(skier_ids)
                .await
                .map_err(map_repository_error)?
        };

        // Subscriptions are shared references, so they are looked up rather
        // than consumed per skier.
        let subscriptions_by_id: HashMap<i64, Subscription> = subscriptions
            .into_iter()
            .filter_map(|s| s.id.map(|id| (id, s)))
            .collect();
        let mut registrations_by_skier: HashMap<i64, Vec<Registration>> = HashMap::new();
        for registration in registrations {
            if let Some(skier_id) = registration.skier_id {
                registrations_by_skier
                    .entry(skier_id)
                    .or_default()
                    .push(registration);
            }
        }

        Ok(skiers
            .into_iter()
            .map(|skier| {
                let subscription = skier
                    .subscription_id
                    .and_then(|id| subscriptions_by_id.get(&id).cloned());
                let registrations = skier
                    .id
                    .and_then(|id| registrations_by_skier.remove(&id))
                    .unwrap_or_default();
                SkierDetails {
                    skier,
                    subscription,
                    registrations,
                }
            })
            .collect())
    }

    async fn compose_one(&self, skier: Skier) -> Result<SkierDetails, Error> {
        let mut details = self.compose(vec![skier]).await?;
        details
            .pop()
            .ok_or_else(|| Error::internal("composed view missing for skier"))
    }

    async fn require_skier(&self, skier_id: i64) -> Result<Skier, Error> {
        self.skiers
            .find_by_id(skier_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| {
                Error::not_found("skier not found").with_details(json!({ "skierId": skier_id }))
            })
    }
}

#[async_trait]
impl SkierService for SkierServiceImpl {
    async fn add_skier(&self, draft: SkierDraft) -> Result<SkierDetails, Error> {
        let mut draft = draft;
        let saved_subscription = match draft.subscription.take() {
            Some(mut subscription) => {
                let end_date = subscription
                    .subscription_type
                    .end_date(subscription.start_date)
                    .ok_or_else(|| {
                        Error::invalid_request("subscription start date is out of range")
                    })?;
                subscription.end_date = Some(end_date);
                Some(
                    self.subscriptions
                        .save(subscription)
                        .await
                        .map_err(map_repository_error)?,
                )
            }
            None => None,
        };

        let skier = draft.into_skier(saved_subscription.as_ref().and_then(|s| s.id));
        let saved = self
            .skiers
            .save(skier)
            .await
            .map_err(map_repository_error)?;
        Ok(SkierDetails {
            skier: saved,
            subscription: saved_subscription,
            registrations: Vec::new(),
        })
    }

    async fn add_skier_and_assign_to_course(
        &self,
        draft: SkierDraft,
        course_id: i64,
    ) -> Result<SkierDetails, Error> {
        // The course is resolved before any write so a bad id cannot leave a
        // half-created skier behind.
        let course = self
            .courses
            .find_by_id(course_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| {
                Error::not_found("course not found").with_details(json!({ "courseId": course_id }))
            })?;

        let mut draft = draft;
        let weeks = std::mem::take(&mut draft.registration_weeks);
        let saved_subscription = match draft.subscription.take() {
            Some(subscription) => Some(
                self.subscriptions
                    .save(subscription)
                    .await
                    .map_err(map_repository_error)?,
            ),
            None => None,
        };

        let skier = draft.into_skier(saved_subscription.as_ref().and_then(|s| s.id));
        let saved = self
            .skiers
            .save(skier)
            .await
            .map_err(map_repository_error)?;

        let mut registrations = Vec::with_capacity(weeks.len());
        for num_week in weeks {
            let registration = Registration {
                id: None,
                num_week,
                skier_id: saved.id,
                course_id: course.id,
            };
            registrations.push(
                self.registrations
                    .save(registration)
                    .await
                    .map_err(map_repository_error)?,
            );
        }

        Ok(SkierDetails {
            skier: saved,
            subscription: saved_subscription,
            registrations,
        })
    }

    async fn assign_skier_to_subscription(
        &self,
        skier_id: i64,
        subscription_id: i64,
    ) -> Result<SkierDetails, Error> {
        let mut skier = self.require_skier(skier_id).await?;
        let subscription = self
            .subscriptions
            .find_by_id(subscription_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| {
                Error::not_found("subscription not found")
                    .with_details(json!({ "subscriptionId": subscription_id }))
            })?;

        skier.subscription_id = subscription.id;
        let saved = self
            .skiers
            .save(skier)
            .await
            .map_err(map_repository_error)?;

        let registrations = match saved.id {
            Some(id) => self
                .registrations
                .find_by_skier_ids(vec![id])
                .await
                .map_err(map_repository_error)?,
            None => Vec::new(),
        };
        Ok(SkierDetails {
            skier: saved,
            subscription: Some(subscription),
            registrations,
        })
    }

    async fn assign_skier_to_piste(
        &self,
        skier_id: i64,
        piste_id: i64,
    ) -> Result<SkierDetails, Error> {
        let skier = self.require_skier(skier_id).await?;
        let piste = self
            .pistes
            .find_by_id(piste_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| {
                Error::not_found("piste not found").with_details(json!({ "pisteId": piste_id }))
            })?;

        if let (Some(skier_id), Some(piste_id)) = (skier.id, piste.id) {
            self.skiers
                .attach_piste(skier_id, piste_id)
                .await
                .map_err(map_repository_error)?;
        }
        self.compose_one(skier).await
    }

    async fn retrieve_skier(&self, id: i64) -> Result<Option<SkierDetails>, Error> {
        let skier = self
            .skiers
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?;
        match skier {
            Some(skier) => Ok(Some(self.compose_one(skier).await?)),
            None => Ok(None),
        }
    }

    async fn retrieve_all_skiers(&self) -> Result<Vec<SkierDetails>, Error> {
        let skiers = self.skiers.find_all().await.map_err(map_repository_error)?;
        self.compose(skiers).await
    }

    async fn retrieve_skiers_by_subscription_type(
        &self,
        subscription_type: SubscriptionType,
    ) -> Result<Vec<SkierDetails>, Error> {
        let skiers = self
            .skiers
            .find_by_subscription_type(subscription_type)
            .await
            .map_err(map_repository_error)?;
        self.compose(skiers).await
    }

    async fn remove_skier(&self, id: i64) -> Result<(), Error> {
        self.skiers
            .delete_by_id(id)
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "skier_service_tests.rs"]
mod tests;
