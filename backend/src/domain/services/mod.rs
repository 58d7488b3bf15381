//! Driving services, one per entity, orchestrating the repository ports.
//!
//! Each service is a driving-port trait with an `*Impl` struct holding
//! `Arc<dyn …Repository>` handles. Services apply the business rules (the
//! subscription end-date rule, association wiring) and translate
//! [`RepositoryError`] values into the API error taxonomy.

use serde_json::json;
use tracing::{debug, error};

use crate::domain::error::Error;
use crate::domain::ports::RepositoryError;

pub mod course_service;
pub mod instructor_service;
pub mod piste_service;
pub mod registration_service;
pub mod skier_service;
pub mod subscription_service;

pub use course_service::{CourseService, CourseServiceImpl};
pub use instructor_service::{InstructorService, InstructorServiceImpl};
pub use piste_service::{PisteService, PisteServiceImpl};
pub use registration_service::{RegistrationService, RegistrationServiceImpl};
pub use skier_service::{SkierService, SkierServiceImpl};
pub use subscription_service::{SubscriptionService, SubscriptionServiceImpl};

#[cfg(test)]
pub use course_service::MockCourseService;
#[cfg(test)]
pub use instructor_service::MockInstructorService;
#[cfg(test)]
pub use piste_service::MockPisteService;
#[cfg(test)]
pub use registration_service::MockRegistrationService;
#[cfg(test)]
pub use skier_service::MockSkierService;
#[cfg(test)]
pub use subscription_service::MockSubscriptionService;

/// Translate a repository failure into the client-facing error taxonomy.
///
/// Connection failures surface as 503s, constraint rejections as 409s, and
/// everything else as an internal error whose detail stays in the logs.
pub(crate) fn map_repository_error(error: RepositoryError) -> Error {
    match error {
        RepositoryError::Connection { message } => {
            error!(%message, "repository connection failure");
            Error::service_unavailable("backing store unavailable")
        }
        RepositoryError::Query { message } => {
            error!(%message, "repository query failure");
            Error::internal("storage query failed")
        }
        RepositoryError::Constraint { message } => {
            debug!(%message, "constraint rejected operation");
            Error::conflict("operation conflicts with existing references")
                .with_details(json!({ "constraint": message }))
        }
    }
}
