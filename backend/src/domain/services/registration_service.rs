//! Registration service: enrolment intake and course assignment.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::domain::error::Error;
use crate::domain::ports::{CourseRepository, RegistrationRepository, SkierRepository};
use crate::domain::registration::{Registration, RegistrationDraft};
use crate::domain::services::map_repository_error;

/// Driving port for registration use cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationService: Send + Sync {
    /// Create a registration bound to an existing skier, with no course yet.
    async fn add_registration_and_assign_to_skier(
        &self,
        draft: RegistrationDraft,
        skier_id: i64,
    ) -> Result<Registration, Error>;

    /// Point an existing registration at an existing course.
    async fn assign_registration_to_course(
        &self,
        registration_id: i64,
        course_id: i64,
    ) -> Result<Registration, Error>;

    async fn retrieve_registration(&self, id: i64) -> Result<Option<Registration>, Error>;

    async fn retrieve_all_registrations(&self) -> Result<Vec<Registration>, Error>;

    async fn remove_registration(&self, id: i64) -> Result<(), Error>;
}

/// Default [`RegistrationService`] over the repository ports.
pub struct RegistrationServiceImpl {
    registrations: Arc<dyn RegistrationRepository>,
    skiers: Arc<dyn SkierRepository>,
    courses: Arc<dyn CourseRepository>,
}

impl RegistrationServiceImpl {
    #[must_use]
    pub fn new(
        registrations: Arc<dyn RegistrationRepository>,
        skiers: Arc<dyn SkierRepository>,
        courses: Arc<dyn CourseRepository>,
    ) -> Self {
        Self {
            registrations,
            skiers,
            courses,
        }
    }
}

#[async_trait]
impl RegistrationService for RegistrationServiceImpl {
    async fn add_registration_and_assign_to_skier(
        &self,
        draft: RegistrationDraft,
        skier_id: i64,
    ) -> Result<Registration, Error> {
        let skier = self
            .skiers
            .find_by_id(skier_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| {
                Error::not_found("skier not found").with_details(json!({ "skierId": skier_id }))
            })?;

        let registration = Registration {
            id: None,
            num_week: draft.num_week,
            skier_id: skier.id,
            course_id: None,
        };
        self.registrations
            .save(registration)
            .await
            .map_err(map_repository_error)
    }

    async fn assign_registration_to_course(
        &self,
        registration_id: i64,
        course_id: i64,
    ) -> Result<Registration, Error> {
        let mut registration = self
            .registrations
            .find_by_id(registration_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| {
                Error::not_found("registration not found")
                    .with_details(json!({ "registrationId": registration_id }))
            })?;
        let course = self
            .courses
            .find_by_id(course_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| {
                Error::not_found("course not found").with_details(json!({ "courseId": course_id }))
            })?;

        registration.course_id = course.id;
        self.registrations
            .save(registration)
            .await
            .map_err(map_repository_error)
    }

    async fn retrieve_registration(&self, id: i64) -> Result<Option<Registration>, Error> {
        self.registrations
            .find_by_id(id)
            .await
            .map_err(map_repository_error)
    }

    async fn retrieve_all_registrations(&self) -> Result<Vec<Registration>, Error> {
        self.registrations
            .find_all()
            .await
            .map_err(map_repository_error)
    }

    async fn remove_registration(&self, id: i64) -> Result<(), Error> {
        self.registrations
            .delete_by_id(id)
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "registration_service_tests.rs"]
mod tests;
