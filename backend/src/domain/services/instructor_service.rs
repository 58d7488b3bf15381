//! Instructor service: staff CRUD and course assignment.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::domain::course::Course;
use crate::domain::error::Error;
use crate::domain::instructor::{Instructor, InstructorDetails};
use crate::domain::ports::{CourseRepository, InstructorRepository};
use crate::domain::services::map_repository_error;

/// Driving port for instructor use cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InstructorService: Send + Sync {
    async fn add_instructor(&self, instructor: Instructor) -> Result<Instructor, Error>;

    /// Persist the instructor and point the target course at them.
    async fn add_instructor_and_assign_to_course(
        &self,
        instructor: Instructor,
        course_id: i64,
    ) -> Result<InstructorDetails, Error>;

    async fn update_instructor(&self, instructor: Instructor) -> Result<Instructor, Error>;

    async fn retrieve_instructor(&self, id: i64) -> Result<Option<InstructorDetails>, Error>;

    async fn retrieve_all_instructors(&self) -> Result<Vec<InstructorDetails>, Error>;

    async fn remove_instructor(&self, id: i64) -> Result<(), Error>;
}

/// Default [`InstructorService`] over the repository ports.
pub struct InstructorServiceImpl {
    instructors: Arc<dyn InstructorRepository>,
    courses: Arc<dyn CourseRepository>,
}

impl InstructorServiceImpl {
    #[must_use]
    pub fn new(
        instructors: Arc<dyn InstructorRepository>,
        courses: Arc<dyn CourseRepository>,
    ) -> Self {
        Self {
            instructors,
            courses,
        }
    }

    async fn courses_for(&self, instructor: &Instructor) -> Result<Vec<Course>, Error> {
        match instructor.id {
            Some(id) => self
                .courses
                .find_by_instructor(id)
                .await
                .map_err(map_repository_error),
            None => Ok(Vec::new()),
        }
    }
}

#[async_trait]
impl InstructorService for InstructorServiceImpl {
    async fn add_instructor(&self, instructor: Instructor) -> Result<Instructor, Error> {
        self.instructors
            .save(instructor)
            .await
            .map_err(map_repository_error)
    }

    async fn add_instructor_and_assign_to_course(
        &self,
        instructor: Instructor,
        course_id: i64,
    ) -> Result<InstructorDetails, Error> {
        // Resolve the course before persisting so a bad id has no side effect.
        let mut course = self
            .courses
            .find_by_id(course_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| {
                Error::not_found("course not found").with_details(json!({ "courseId": course_id }))
            })?;

        let saved = self
            .instructors
            .save(instructor)
            .await
            .map_err(map_repository_error)?;
        course.instructor_id = saved.id;
        let course = self
            .courses
            .save(course)
            .await
            .map_err(map_repository_error)?;

        Ok(InstructorDetails {
            instructor: saved,
            courses: vec![course],
        })
    }

    async fn update_instructor(&self, instructor: Instructor) -> Result<Instructor, Error> {
        self.instructors
            .save(instructor)
            .await
            .map_err(map_repository_error)
    }

    async fn retrieve_instructor(&self, id: i64) -> Result<Option<InstructorDetails>, Error> {
        let instructor = self
            .instructors
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?;
        match instructor {
            Some(instructor) => {
                let courses = self.courses_for(&instructor).await?;
                Ok(Some(InstructorDetails {
                    instructor,
                    courses,
                }))
            }
            None => Ok(None),
        }
    }

    async fn retrieve_all_instructors(&self) -> Result<Vec<InstructorDetails>, Error> {
        let instructors = self
            .instructors
            .find_all()
            .await
            .map_err(map_repository_error)?;
        let mut details = Vec::with_capacity(instructors.len());
        for instructor in instructors {
            let courses = self.courses_for(&instructor).await?;
            details.push(InstructorDetails {
                instructor,
                courses,
            });
        }
        Ok(details)
    }

    async fn remove_instructor(&self, id: i64) -> Result<(), Error> {
        self.instructors
            .delete_by_id(id)
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use mockall::predicate::eq;

    use super::*;
    use crate::domain::course::{CourseType, Support};
    use crate::domain::error::ErrorCode;
    use crate::domain::ports::{MockCourseRepository, MockInstructorRepository};

    fn sample_instructor() -> Instructor {
        Instructor {
            id: None,
            first_name: "Greta".to_owned(),
            last_name: "Lind".to_owned(),
            date_of_hire: NaiveDate::from_ymd_opt(2019, 12, 1).expect("valid date"),
        }
    }

    fn sample_course(id: i64) -> Course {
        Course {
            id: Some(id),
            level: 1,
            course_type: CourseType::CollectiveAdult,
            support: Support::Ski,
            price: 120.0,
            time_slot: 2,
            instructor_id: None,
        }
    }

    #[tokio::test]
    async fn add_and_assign_points_course_at_new_instructor() {
        let mut instructors = MockInstructorRepository::new();
        instructors
            .expect_save()
            .times(1)
            .returning(|mut instructor| {
                instructor.id = Some(3);
                Ok(instructor)
            });
        let mut courses = MockCourseRepository::new();
        courses
            .expect_find_by_id()
            .with(eq(9))
            .times(1)
            .returning(|_| Ok(Some(sample_course(9))));
        courses
            .expect_save()
            .times(1)
            .withf(|course| course.instructor_id == Some(3))
            .returning(Ok);

        let details = InstructorServiceImpl::new(Arc::new(instructors), Arc::new(courses))
            .add_instructor_and_assign_to_course(sample_instructor(), 9)
            .await
            .expect("assignment succeeds");

        assert_eq!(details.instructor.id, Some(3));
        assert_eq!(details.courses.len(), 1);
    }

    #[tokio::test]
    async fn add_and_assign_to_missing_course_is_not_found() {
        let instructors = MockInstructorRepository::new();
        let mut courses = MockCourseRepository::new();
        courses
            .expect_find_by_id()
            .with(eq(77))
            .returning(|_| Ok(None));

        let err = InstructorServiceImpl::new(Arc::new(instructors), Arc::new(courses))
            .add_instructor_and_assign_to_course(sample_instructor(), 77)
            .await
            .expect_err("missing course is an error");

        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn retrieve_instructor_composes_assigned_courses() {
        let mut instructors = MockInstructorRepository::new();
        instructors.expect_find_by_id().with(eq(3)).returning(|_| {
            let mut instructor = sample_instructor();
            instructor.id = Some(3);
            Ok(Some(instructor))
        });
        let mut courses = MockCourseRepository::new();
        courses.expect_find_by_instructor().with(eq(3)).returning(|_| {
            let mut course = sample_course(9);
            course.instructor_id = Some(3);
            Ok(vec![course])
        });

        let details = InstructorServiceImpl::new(Arc::new(instructors), Arc::new(courses))
            .retrieve_instructor(3)
            .await
            .expect("retrieve succeeds")
            .expect("instructor present");

        assert_eq!(details.courses.len(), 1);
    }
}
