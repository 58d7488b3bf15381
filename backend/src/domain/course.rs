//! Course entity and its classification enums.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Audience and format of a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CourseType {
    CollectiveChildren,
    CollectiveAdult,
    Individual,
}

/// Equipment a course is taught on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Support {
    Ski,
    Snowboard,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown course type: {0}")]
pub struct ParseCourseTypeError(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown support: {0}")]
pub struct ParseSupportError(pub String);

impl CourseType {
    /// Stable token used in the database and over the wire.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CollectiveChildren => "COLLECTIVE_CHILDREN",
            Self::CollectiveAdult => "COLLECTIVE_ADULT",
            Self::Individual => "INDIVIDUAL",
        }
    }
}

impl Support {
    /// Stable token used in the database and over the wire.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ski => "SKI",
            Self::Snowboard => "SNOWBOARD",
        }
    }
}

impl std::fmt::Display for CourseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Display for Support {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CourseType {
    type Err = ParseCourseTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "COLLECTIVE_CHILDREN" => Ok(Self::CollectiveChildren),
            "COLLECTIVE_ADULT" => Ok(Self::CollectiveAdult),
            "INDIVIDUAL" => Ok(Self::Individual),
            other => Err(ParseCourseTypeError(other.to_owned())),
        }
    }
}

impl std::str::FromStr for Support {
    type Err = ParseSupportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SKI" => Ok(Self::Ski),
            "SNOWBOARD" => Ok(Self::Snowboard),
            other => Err(ParseSupportError(other.to_owned())),
        }
    }
}

/// A ski or snowboard lesson offering.
#[derive(Debug, Clone, PartialEq)]
pub struct Course {
    /// Database identifier, `None` until first persisted.
    pub id: Option<i64>,
    /// Difficulty level.
    pub level: i32,
    pub course_type: CourseType,
    pub support: Support,
    pub price: f32,
    /// Scheduled slot within the day's timetable.
    pub time_slot: i32,
    /// Assigned instructor, if any.
    pub instructor_id: Option<i64>,
}
