//! PostgreSQL persistence adapters.
//!
//! One Diesel repository per entity over a shared async connection pool,
//! plus the schema definitions, row models, and error mapping they share.

pub mod diesel_course_repository;
mod diesel_error_mapping;
pub mod diesel_instructor_repository;
pub mod diesel_piste_repository;
pub mod diesel_registration_repository;
pub mod diesel_skier_repository;
pub mod diesel_subscription_repository;
pub mod models;
pub mod pool;
pub mod schema;

pub use diesel_course_repository::DieselCourseRepository;
pub use diesel_instructor_repository::DieselInstructorRepository;
pub use diesel_piste_repository::DieselPisteRepository;
pub use diesel_registration_repository::DieselRegistrationRepository;
pub use diesel_skier_repository::DieselSkierRepository;
pub use diesel_subscription_repository::DieselSubscriptionRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
