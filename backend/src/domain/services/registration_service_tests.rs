//! Tests for the registration service.

use std::sync::Arc;

use chrono::NaiveDate;
use mockall::predicate::eq;

use super::*;
use crate::domain::course::{Course, CourseType, Support};
use crate::domain::error::ErrorCode;
use crate::domain::ports::{MockCourseRepository, MockRegistrationRepository, MockSkierRepository};
use crate::domain::skier::Skier;

fn sample_skier(id: i64) -> Skier {
    Skier {
        id: Some(id),
        first_name: "John".to_owned(),
        last_name: "Doe".to_owned(),
        date_of_birth: NaiveDate::from_ymd_opt(1990, 5, 15).expect("valid date"),
        city: "Tunis".to_owned(),
        subscription_id: None,
    }
}

fn sample_registration(id: i64) -> Registration {
    Registration {
        id: Some(id),
        num_week: 4,
        skier_id: Some(1),
        course_id: None,
    }
}

struct Mocks {
    registrations: MockRegistrationRepository,
    skiers: MockSkierRepository,
    courses: MockCourseRepository,
}

impl Mocks {
    fn new() -> Self {
        Self {
            registrations: MockRegistrationRepository::new(),
            skiers: MockSkierRepository::new(),
            courses: MockCourseRepository::new(),
        }
    }

    fn into_service(self) -> RegistrationServiceImpl {
        RegistrationServiceImpl::new(
            Arc::new(self.registrations),
            Arc::new(self.skiers),
            Arc::new(self.courses),
        )
    }
}

#[tokio::test]
async fn add_and_assign_binds_registration_to_skier() {
    let mut mocks = Mocks::new();
    mocks
        .skiers
        .expect_find_by_id()
        .with(eq(1))
        .times(1)
        .returning(|_| Ok(Some(sample_skier(1))));
    mocks
        .registrations
        .expect_save()
        .times(1)
        .withf(|registration| {
            registration.skier_id == Some(1)
                && registration.course_id.is_none()
                && registration.num_week == 4
        })
        .returning(|mut registration| {
            registration.id = Some(11);
            Ok(registration)
        });

    let saved = mocks
        .into_service()
        .add_registration_and_assign_to_skier(RegistrationDraft { num_week: 4 }, 1)
        .await
        .expect("add succeeds");

    assert_eq!(saved.id, Some(11));
}

#[tokio::test]
async fn add_for_missing_skier_is_not_found() {
    let mut mocks = Mocks::new();
    mocks
        .skiers
        .expect_find_by_id()
        .with(eq(999))
        .returning(|_| Ok(None));

    let err = mocks
        .into_service()
        .add_registration_and_assign_to_skier(RegistrationDraft { num_week: 4 }, 999)
        .await
        .expect_err("missing skier is an error");

    assert_eq!(err.code, ErrorCode::NotFound);
}

#[tokio::test]
async fn assign_to_course_attaches_and_saves() {
    let mut mocks = Mocks::new();
    mocks
        .registrations
        .expect_find_by_id()
        .with(eq(11))
        .times(1)
        .returning(|_| Ok(Some(sample_registration(11))));
    mocks
        .courses
        .expect_find_by_id()
        .with(eq(9))
        .times(1)
        .returning(|_| {
            Ok(Some(Course {
                id: Some(9),
                level: 1,
                course_type: CourseType::CollectiveChildren,
                support: Support::Ski,
                price: 100.0,
                time_slot: 6,
                instructor_id: None,
            }))
        });
    mocks
        .registrations
        .expect_save()
        .times(1)
        .withf(|registration| registration.course_id == Some(9))
        .returning(Ok);

    let saved = mocks
        .into_service()
        .assign_registration_to_course(11, 9)
        .await
        .expect("assignment succeeds");

    assert_eq!(saved.course_id, Some(9));
}

#[tokio::test]
async fn assign_missing_registration_is_not_found() {
    let mut mocks = Mocks::new();
    mocks
        .registrations
        .expect_find_by_id()
        .with(eq(404))
        .returning(|_| Ok(None));

    let err = mocks
        .into_service()
        .assign_registration_to_course(404, 9)
        .await
        .expect_err("missing registration is an error");

    assert_eq!(err.code, ErrorCode::NotFound);
    let details = err.details.expect("error details");
    assert_eq!(details["registrationId"], 404);
}

#[tokio::test]
async fn remove_registration_delegates_to_delete() {
    let mut mocks = Mocks::new();
    mocks
        .registrations
        .expect_delete_by_id()
        .with(eq(11))
        .times(1)
        .returning(|_| Ok(()));

    mocks
        .into_service()
        .remove_registration(11)
        .await
        .expect("remove succeeds");
}
