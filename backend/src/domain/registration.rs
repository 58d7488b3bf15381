//! Registration entity linking a skier's course enrolment to a week.

/// A skier's enrolment in a course for one numbered week of the season.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    /// Database identifier, `None` until first persisted.
    pub id: Option<i64>,
    /// Week of the season the enrolment covers.
    pub num_week: i32,
    pub skier_id: Option<i64>,
    pub course_id: Option<i64>,
}

/// Intake payload for creating a registration before it is bound to a skier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationDraft {
    pub num_week: i32,
}
