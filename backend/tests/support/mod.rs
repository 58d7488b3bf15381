//! Shared harness for the HTTP endpoint suites: an app assembled over
//! services backed by a fresh in-memory store.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, Error, web};

use skistation::Trace;
use skistation::domain::ports::{
    CourseRepository, InstructorRepository, PisteRepository, RegistrationRepository,
    SkierRepository, SubscriptionRepository,
};
use skistation::domain::services::{
    CourseServiceImpl, InstructorServiceImpl, PisteServiceImpl, RegistrationServiceImpl,
    SkierServiceImpl, SubscriptionServiceImpl,
};
use skistation::inbound::http::state::HttpState;
use skistation::inbound::http::{
    courses, instructors, pistes, registrations, skiers, subscriptions,
};
use skistation::test_support::InMemoryStation;

/// Services for every resource, all sharing one in-memory store.
pub fn station_state() -> web::Data<HttpState> {
    let store = Arc::new(InMemoryStation::new());
    let skiers: Arc<dyn SkierRepository> = store.clone();
    let subscriptions: Arc<dyn SubscriptionRepository> = store.clone();
    let courses: Arc<dyn CourseRepository> = store.clone();
    let instructors: Arc<dyn InstructorRepository> = store.clone();
    let pistes: Arc<dyn PisteRepository> = store.clone();
    let registrations: Arc<dyn RegistrationRepository> = store;

    web::Data::new(HttpState {
        skiers: Arc::new(SkierServiceImpl::new(
            skiers.clone(),
            subscriptions.clone(),
            pistes.clone(),
            courses.clone(),
            registrations.clone(),
        )),
        subscriptions: Arc::new(SubscriptionServiceImpl::new(subscriptions)),
        courses: Arc::new(CourseServiceImpl::new(courses.clone())),
        instructors: Arc::new(InstructorServiceImpl::new(instructors, courses.clone())),
        pistes: Arc::new(PisteServiceImpl::new(pistes)),
        registrations: Arc::new(RegistrationServiceImpl::new(registrations, skiers, courses)),
    })
}

/// The full versioned API surface behind the tracing middleware, as the
/// server assembles it.
pub fn station_app(
    state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = Error,
        InitError = (),
    >,
> {
    App::new().app_data(state).wrap(Trace).service(
        web::scope("/api/v1")
            .configure(skiers::configure)
            .configure(subscriptions::configure)
            .configure(courses::configure)
            .configure(instructors::configure)
            .configure(pistes::configure)
            .configure(registrations::configure),
    )
}
