//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain services and remain testable without I/O.

use std::sync::Arc;

use crate::domain::services::{
    CourseService, InstructorService, PisteService, RegistrationService, SkierService,
    SubscriptionService,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub skiers: Arc<dyn SkierService>,
    pub subscriptions: Arc<dyn SubscriptionService>,
    pub courses: Arc<dyn CourseService>,
    pub instructors: Arc<dyn InstructorService>,
    pub pistes: Arc<dyn PisteService>,
    pub registrations: Arc<dyn RegistrationService>,
}
