//! Domain model, driven ports, and driving services.

pub mod course;
pub mod error;
pub mod instructor;
pub mod piste;
pub mod ports;
pub mod registration;
pub mod services;
pub mod skier;
pub mod subscription;
pub mod trace_id;

pub use course::{Course, CourseType, Support};
pub use error::{Error, ErrorCode};
pub use instructor::{Instructor, InstructorDetails};
pub use piste::{Color, Piste};
pub use registration::{Registration, RegistrationDraft};
pub use skier::{Skier, SkierDetails, SkierDraft};
pub use subscription::{Subscription, SubscriptionType};
pub use trace_id::{TRACE_ID_HEADER, TraceId};
