//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] generates the OpenAPI specification for the REST API. It
//! registers every inbound HTTP path, the request and response schemas
//! referenced by those paths, and one tag per resource. The generated
//! document backs Swagger UI in debug builds.

use utoipa::OpenApi;

use crate::domain::{Color, CourseType, Error, ErrorCode, SubscriptionType, Support};
use crate::inbound::http::courses::{CourseRequest, CourseResponse};
use crate::inbound::http::instructors::{
    InstructorDetailResponse, InstructorRequest, InstructorResponse,
};
use crate::inbound::http::pistes::{PisteRequest, PisteResponse};
use crate::inbound::http::registrations::{RegistrationRequest, RegistrationResponse};
use crate::inbound::http::skiers::{
    RegistrationWeekRequest, SkierRegistrationResponse, SkierRequest, SkierResponse,
};
use crate::inbound::http::subscriptions::{SubscriptionRequest, SubscriptionResponse};

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Skistation backend API",
        description = "HTTP interface for the ski station management backend: skiers, \
            subscriptions, courses, instructors, pistes and registrations."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::skiers::add_skier,
        crate::inbound::http::skiers::add_skier_and_assign_to_course,
        crate::inbound::http::skiers::assign_skier_to_subscription,
        crate::inbound::http::skiers::assign_skier_to_piste,
        crate::inbound::http::skiers::get_skiers_by_subscription_type,
        crate::inbound::http::skiers::get_skier,
        crate::inbound::http::skiers::get_all_skiers,
        crate::inbound::http::skiers::delete_skier,
        crate::inbound::http::subscriptions::add_subscription,
        crate::inbound::http::subscriptions::update_subscription,
        crate::inbound::http::subscriptions::get_subscription,
        crate::inbound::http::subscriptions::get_all_subscriptions,
        crate::inbound::http::subscriptions::get_subscriptions_by_type,
        crate::inbound::http::subscriptions::get_subscriptions_by_dates,
        crate::inbound::http::subscriptions::delete_subscription,
        crate::inbound::http::courses::add_course,
        crate::inbound::http::courses::update_course,
        crate::inbound::http::courses::get_course,
        crate::inbound::http::courses::get_all_courses,
        crate::inbound::http::courses::delete_course,
        crate::inbound::http::instructors::add_instructor,
        crate::inbound::http::instructors::add_instructor_and_assign_to_course,
        crate::inbound::http::instructors::update_instructor,
        crate::inbound::http::instructors::get_instructor,
        crate::inbound::http::instructors::get_all_instructors,
        crate::inbound::http::instructors::delete_instructor,
        crate::inbound::http::pistes::add_piste,
        crate::inbound::http::pistes::get_piste,
        crate::inbound::http::pistes::get_all_pistes,
        crate::inbound::http::pistes::delete_piste,
        crate::inbound::http::registrations::add_registration_and_assign_to_skier,
        crate::inbound::http::registrations::assign_registration_to_course,
        crate::inbound::http::registrations::get_registration,
        crate::inbound::http::registrations::get_all_registrations,
        crate::inbound::http::registrations::delete_registration,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        SubscriptionType,
        CourseType,
        Support,
        Color,
        SkierRequest,
        RegistrationWeekRequest,
        SkierResponse,
        SkierRegistrationResponse,
        SubscriptionRequest,
        SubscriptionResponse,
        CourseRequest,
        CourseResponse,
        InstructorRequest,
        InstructorResponse,
        InstructorDetailResponse,
        PisteRequest,
        PisteResponse,
        RegistrationRequest,
        RegistrationResponse,
    )),
    tags(
        (name = "skiers", description = "Skier lifecycle and assignments"),
        (name = "subscriptions", description = "Subscription plans and lookups"),
        (name = "courses", description = "Course catalogue"),
        (name = "instructors", description = "Instructors and course assignment"),
        (name = "pistes", description = "Piste catalogue"),
        (name = "registrations", description = "Course enrolments"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
