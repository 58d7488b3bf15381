//! Skier entity, intake draft, and composed read model.

use chrono::NaiveDate;

use crate::domain::registration::Registration;
use crate::domain::subscription::Subscription;

/// A resort customer.
#[derive(Debug, Clone, PartialEq)]
pub struct Skier {
    /// Database identifier, `None` until first persisted.
    pub id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub city: String,
    /// Currently held subscription, at most one.
    pub subscription_id: Option<i64>,
}

/// Intake payload for creating a skier, optionally with a new subscription
/// and course-week enrolments.
#[derive(Debug, Clone, PartialEq)]
pub struct SkierDraft {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub city: String,
    /// Subscription to create alongside the skier.
    pub subscription: Option<Subscription>,
    /// Weeks to enrol the skier for when a target course is supplied.
    pub registration_weeks: Vec<i32>,
}

impl SkierDraft {
    /// Materialise the skier entity, pointing at an already-persisted
    /// subscription when one exists.
    #[must_use]
    pub fn into_skier(self, subscription_id: Option<i64>) -> Skier {
        Skier {
            id: None,
            first_name: self.first_name,
            last_name: self.last_name,
            date_of_birth: self.date_of_birth,
            city: self.city,
            subscription_id,
        }
    }
}

/// Composed view of a skier with its subscription and enrolments resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct SkierDetails {
    pub skier: Skier,
    pub subscription: Option<Subscription>,
    pub registrations: Vec<Registration>,
}
