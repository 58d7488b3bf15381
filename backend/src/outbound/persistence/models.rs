//! Diesel row models and their conversions to and from domain entities.
//!
//! Enumerations are stored as varchar tokens; converting a row back into a
//! domain entity parses them and reports unknown stored tokens as query
//! errors rather than panicking.

use chrono::NaiveDate;
use diesel::prelude::*;

use crate::domain::course::Course;
use crate::domain::instructor::Instructor;
use crate::domain::piste::Piste;
use crate::domain::ports::RepositoryError;
use crate::domain::registration::Registration;
use crate::domain::skier::Skier;
use crate::domain::subscription::Subscription;

// --- subscriptions ---

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = crate::outbound::persistence::schema::subscriptions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SubscriptionRow {
    pub id: i64,
    pub subscription_type: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub price: f32,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::outbound::persistence::schema::subscriptions)]
pub struct NewSubscriptionRow<'a> {
    pub subscription_type: &'a str,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub price: f32,
}

#[derive(Debug, AsChangeset)]
#[diesel(table_name = crate::outbound::persistence::schema::subscriptions)]
#[diesel(treat_none_as_null = true)]
pub struct SubscriptionUpdate<'a> {
    pub subscription_type: &'a str,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub price: f32,
}

impl<'a> NewSubscriptionRow<'a> {
    pub fn from_domain(subscription: &'a Subscription) -> Self {
        Self {
            subscription_type: subscription.subscription_type.as_str(),
            start_date: subscription.start_date,
            end_date: subscription.end_date,
            price: subscription.price,
        }
    }
}

impl<'a> SubscriptionUpdate<'a> {
    pub fn from_domain(subscription: &'a Subscription) -> Self {
        Self {
            subscription_type: subscription.subscription_type.as_str(),
            start_date: subscription.start_date,
            end_date: subscription.end_date,
            price: subscription.price,
        }
    }
}

impl TryFrom<SubscriptionRow> for Subscription {
    type Error = RepositoryError;

    fn try_from(row: SubscriptionRow) -> Result<Self, Self::Error> {
        let subscription_type = row.subscription_type.parse().map_err(
            |err: crate::domain::subscription::ParseSubscriptionTypeError| {
                RepositoryError::query(format!("stored subscription type invalid: {}", err.0))
            },
        )?;
        Ok(Self {
            id: Some(row.id),
            subscription_type,
            start_date: row.start_date,
            end_date: row.end_date,
            price: row.price,
        })
    }
}

// --- skiers ---

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = crate::outbound::persistence::schema::skiers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SkierRow {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub city: String,
    pub subscription_id: Option<i64>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::outbound::persistence::schema::skiers)]
pub struct NewSkierRow<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub date_of_birth: NaiveDate,
    pub city: &'a str,
    pub subscription_id: Option<i64>,
}

#[derive(Debug, AsChangeset)]
#[diesel(table_name = crate::outbound::persistence::schema::skiers)]
#[diesel(treat_none_as_null = true)]
pub struct SkierUpdate<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub date_of_birth: NaiveDate,
    pub city: &'a str,
    pub subscription_id: Option<i64>,
}

impl<'a> NewSkierRow<'a> {
    pub fn from_domain(skier: &'a Skier) -> Self {
        Self {
            first_name: &skier.first_name,
            last_name: &skier.last_name,
            date_of_birth: skier.date_of_birth,
            city: &skier.city,
            subscription_id: skier.subscription_id,
        }
    }
}

impl<'a> SkierUpdate<'a> {
    pub fn from_domain(skier: &'a Skier) -> Self {
        Self {
            first_name: &skier.first_name,
            last_name: &skier.last_name,
            date_of_birth: skier.date_of_birth,
            city: &skier.city,
            subscription_id: skier.subscription_id,
        }
    }
}

impl From<SkierRow> for Skier {
    fn from(row: SkierRow) -> Self {
        Self {
            id: Some(row.id),
            first_name: row.first_name,
            last_name: row.last_name,
            date_of_birth: row.date_of_birth,
            city: row.city,
            subscription_id: row.subscription_id,
        }
    }
}

// --- instructors ---

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = crate::outbound::persistence::schema::instructors)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct InstructorRow {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub date_of_hire: NaiveDate,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::outbound::persistence::schema::instructors)]
pub struct NewInstructorRow<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub date_of_hire: NaiveDate,
}

#[derive(Debug, AsChangeset)]
#[diesel(table_name = crate::outbound::persistence::schema::instructors)]
pub struct InstructorUpdate<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub date_of_hire: NaiveDate,
}

impl<'a> NewInstructorRow<'a> {
    pub fn from_domain(instructor: &'a Instructor) -> Self {
        Self {
            first_name: &instructor.first_name,
            last_name: &instructor.last_name,
            date_of_hire: instructor.date_of_hire,
        }
    }
}

impl<'a> InstructorUpdate<'a> {
    pub fn from_domain(instructor: &'a Instructor) -> Self {
        Self {
            first_name: &instructor.first_name,
            last_name: &instructor.last_name,
            date_of_hire: instructor.date_of_hire,
        }
    }
}

impl From<InstructorRow> for Instructor {
    fn from(row: InstructorRow) -> Self {
        Self {
            id: Some(row.id),
            first_name: row.first_name,
            last_name: row.last_name,
            date_of_hire: row.date_of_hire,
        }
    }
}

// --- courses ---

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = crate::outbound::persistence::schema::courses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CourseRow {
    pub id: i64,
    pub level: i32,
    pub course_type: String,
    pub support: String,
    pub price: f32,
    pub time_slot: i32,
    pub instructor_id: Option<i64>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::outbound::persistence::schema::courses)]
pub struct NewCourseRow<'a> {
    pub level: i32,
    pub course_type: &'a str,
    pub support: &'a str,
    pub price: f32,
    pub time_slot: i32,
    pub instructor_id: Option<i64>,
}

#[derive(Debug, AsChangeset)]
#[diesel(table_name = crate::outbound::persistence::schema::courses)]
#[diesel(treat_none_as_null = true)]
pub struct CourseUpdate<'a> {
    pub level: i32,
    pub course_type: &'a str,
    pub support: &'a str,
    pub price: f32,
    pub time_slot: i32,
    pub instructor_id: Option<i64>,
}

impl<'a> NewCourseRow<'a> {
    pub fn from_domain(course: &'a Course) -> Self {
        Self {
            level: course.level,
            course_type: course.course_type.as_str(),
            support: course.support.as_str(),
            price: course.price,
            time_slot: course.time_slot,
            instructor_id: course.instructor_id,
        }
    }
}

impl<'a> CourseUpdate<'a> {
    pub fn from_domain(course: &'a Course) -> Self {
        Self {
            level: course.level,
            course_type: course.course_type.as_str(),
            support: course.support.as_str(),
            price: course.price,
            time_slot: course.time_slot,
            instructor_id: course.instructor_id,
        }
    }
}

impl TryFrom<CourseRow> for Course {
    type Error = RepositoryError;

    fn try_from(row: CourseRow) -> Result<Self, Self::Error> {
        let course_type = row
            .course_type
            .parse()
            .map_err(|err: crate::domain::course::ParseCourseTypeError| {
                RepositoryError::query(format!("stored course type invalid: {}", err.0))
            })?;
        let support = row
            .support
            .parse()
            .map_err(|err: crate::domain::course::ParseSupportError| {
                RepositoryError::query(format!("stored support invalid: {}", err.0))
            })?;
        Ok(Self {
            id: Some(row.id),
            level: row.level,
            course_type,
            support,
            price: row.price,
            time_slot: row.time_slot,
            instructor_id: row.instructor_id,
        })
    }
}

// --- pistes ---

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = crate::outbound::persistence::schema::pistes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PisteRow {
    pub id: i64,
    pub name: String,
    pub color: String,
    pub length: i32,
    pub slope: i32,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::outbound::persistence::schema::pistes)]
pub struct NewPisteRow<'a> {
    pub name: &'a str,
    pub color: &'a str,
    pub length: i32,
    pub slope: i32,
}

#[derive(Debug, AsChangeset)]
#[diesel(table_name = crate::outbound::persistence::schema::pistes)]
pub struct PisteUpdate<'a> {
    pub name: &'a str,
    pub color: &'a str,
    pub length: i32,
    pub slope: i32,
}

impl<'a> NewPisteRow<'a> {
    pub fn from_domain(piste: &'a Piste) -> Self {
        Self {
            name: &piste.name,
            color: piste.color.as_str(),
            length: piste.length,
            slope: piste.slope,
        }
    }
}

impl<'a> PisteUpdate<'a> {
    pub fn from_domain(piste: &'a Piste) -> Self {
        Self {
            name: &piste.name,
            color: piste.color.as_str(),
            length: piste.length,
            slope: piste.slope,
        }
    }
}

impl TryFrom<PisteRow> for Piste {
    type Error = RepositoryError;

    fn try_from(row: PisteRow) -> Result<Self, Self::Error> {
        let color = row
            .color
            .parse()
            .map_err(|err: crate::domain::piste::ParseColorError| {
                RepositoryError::query(format!("stored piste colour invalid: {}", err.0))
            })?;
        Ok(Self {
            id: Some(row.id),
            name: row.name,
            color,
            length: row.length,
            slope: row.slope,
        })
    }
}

// --- registrations ---

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = crate::outbound::persistence::schema::registrations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RegistrationRow {
    pub id: i64,
    pub num_week: i32,
    pub skier_id: Option<i64>,
    pub course_id: Option<i64>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::outbound::persistence::schema::registrations)]
pub struct NewRegistrationRow {
    pub num_week: i32,
    pub skier_id: Option<i64>,
    pub course_id: Option<i64>,
}

#[derive(Debug, AsChangeset)]
#[diesel(table_name = crate::outbound::persistence::schema::registrations)]
#[diesel(treat_none_as_null = true)]
pub struct RegistrationUpdate {
    pub num_week: i32,
    pub skier_id: Option<i64>,
    pub course_id: Option<i64>,
}

impl NewRegistrationRow {
    pub fn from_domain(registration: &Registration) -> Self {
        Self {
            num_week: registration.num_week,
            skier_id: registration.skier_id,
            course_id: registration.course_id,
        }
    }
}

impl RegistrationUpdate {
    pub fn from_domain(registration: &Registration) -> Self {
        Self {
            num_week: registration.num_week,
            skier_id: registration.skier_id,
            course_id: registration.course_id,
        }
    }
}

impl From<RegistrationRow> for Registration {
    fn from(row: RegistrationRow) -> Self {
        Self {
            id: Some(row.id),
            num_week: row.num_week,
            skier_id: row.skier_id,
            course_id: row.course_id,
        }
    }
}

// --- skier_pistes ---

#[derive(Debug, Clone, Queryable, Insertable)]
#[diesel(table_name = crate::outbound::persistence::schema::skier_pistes)]
pub struct SkierPisteRow {
    pub skier_id: i64,
    pub piste_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_stored_subscription_type_is_a_query_error() {
        let row = SubscriptionRow {
            id: 1,
            subscription_type: "WEEKLY".to_owned(),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 10).expect("valid date"),
            end_date: None,
            price: 100.0,
        };

        let err = Subscription::try_from(row).expect_err("unknown token fails");
        assert!(matches!(err, RepositoryError::Query { .. }));
    }

    #[test]
    fn course_row_round_trips_enum_tokens() {
        let row = CourseRow {
            id: 9,
            level: 1,
            course_type: "COLLECTIVE_ADULT".to_owned(),
            support: "SNOWBOARD".to_owned(),
            price: 120.0,
            time_slot: 2,
            instructor_id: None,
        };

        let course = Course::try_from(row).expect("valid tokens");
        assert_eq!(course.course_type.as_str(), "COLLECTIVE_ADULT");
        assert_eq!(course.support.as_str(), "SNOWBOARD");
    }
}
