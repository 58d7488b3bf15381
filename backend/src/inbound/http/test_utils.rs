//! Shared fixtures for handler tests.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App};

use crate::domain::services::{
    MockCourseService, MockInstructorService, MockPisteService, MockRegistrationService,
    MockSkierService, MockSubscriptionService,
};
use crate::inbound::http::state::HttpState;

/// State whose services all reject calls; tests swap in the mock under test.
pub(crate) fn state() -> HttpState {
    HttpState {
        skiers: Arc::new(MockSkierService::new()),
        subscriptions: Arc::new(MockSubscriptionService::new()),
        courses: Arc::new(MockCourseService::new()),
        instructors: Arc::new(MockInstructorService::new()),
        pistes: Arc::new(MockPisteService::new()),
        registrations: Arc::new(MockRegistrationService::new()),
    }
}

/// App with one resource module mounted under the API scope.
pub(crate) fn test_app(
    state: HttpState,
    configure: fn(&mut web::ServiceConfig),
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .service(web::scope("/api/v1").configure(configure))
}
