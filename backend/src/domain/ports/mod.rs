//! Driven ports: repository traits the persistence adapters implement.
//!
//! Each entity has one trait with the base CRUD surface (`find_by_id`,
//! `find_all`, `save`, `delete_by_id`) plus the derived lookups its services
//! need. All methods return [`RepositoryError`], which classifies failures
//! into the three categories the service layer maps onto the API taxonomy.

use thiserror::Error;

pub mod course_repository;
pub mod instructor_repository;
pub mod piste_repository;
pub mod registration_repository;
pub mod skier_repository;
pub mod subscription_repository;

pub use course_repository::CourseRepository;
pub use instructor_repository::InstructorRepository;
pub use piste_repository::PisteRepository;
pub use registration_repository::RegistrationRepository;
pub use skier_repository::SkierRepository;
pub use subscription_repository::SubscriptionRepository;

#[cfg(test)]
pub use course_repository::MockCourseRepository;
#[cfg(test)]
pub use instructor_repository::MockInstructorRepository;
#[cfg(test)]
pub use piste_repository::MockPisteRepository;
#[cfg(test)]
pub use registration_repository::MockRegistrationRepository;
#[cfg(test)]
pub use skier_repository::MockSkierRepository;
#[cfg(test)]
pub use subscription_repository::MockSubscriptionRepository;

/// Failure classification shared by every repository port.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// The backing store could not be reached or a connection could not be
    /// checked out.
    #[error("connection failure: {message}")]
    Connection { message: String },
    /// A statement failed to execute or returned malformed data.
    #[error("query failure: {message}")]
    Query { message: String },
    /// A database constraint rejected the operation.
    #[error("constraint violation: {message}")]
    Constraint { message: String },
}

impl RepositoryError {
    /// Build a [`RepositoryError::Connection`].
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Build a [`RepositoryError::Query`].
    #[must_use]
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Build a [`RepositoryError::Constraint`].
    #[must_use]
    pub fn constraint(message: impl Into<String>) -> Self {
        Self::Constraint {
            message: message.into(),
        }
    }
}
