//! Instructor entity and its composed read model.

use chrono::NaiveDate;

use crate::domain::course::Course;

/// A member of the teaching staff.
#[derive(Debug, Clone, PartialEq)]
pub struct Instructor {
    /// Database identifier, `None` until first persisted.
    pub id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub date_of_hire: NaiveDate,
}

/// An instructor together with the courses assigned to them.
#[derive(Debug, Clone, PartialEq)]
pub struct InstructorDetails {
    pub instructor: Instructor,
    pub courses: Vec<Course>,
}
