//! Course service: plain catalogue CRUD.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::course::Course;
use crate::domain::error::Error;
use crate::domain::ports::CourseRepository;
use crate::domain::services::map_repository_error;

/// Driving port for course use cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseService: Send + Sync {
    async fn add_course(&self, course: Course) -> Result<Course, Error>;

    async fn update_course(&self, course: Course) -> Result<Course, Error>;

    async fn retrieve_course(&self, id: i64) -> Result<Option<Course>, Error>;

    async fn retrieve_all_courses(&self) -> Result<Vec<Course>, Error>;

    async fn remove_course(&self, id: i64) -> Result<(), Error>;
}

/// Default [`CourseService`] over the repository port.
pub struct CourseServiceImpl {
    courses: Arc<dyn CourseRepository>,
}

impl CourseServiceImpl {
    #[must_use]
    pub fn new(courses: Arc<dyn CourseRepository>) -> Self {
        Self { courses }
    }
}

#[async_trait]
impl CourseService for CourseServiceImpl {
    async fn add_course(&self, course: Course) -> Result<Course, Error> {
        self.courses
            .save(course)
            .await
            .map_err(map_repository_error)
    }

    async fn update_course(&self, course: Course) -> Result<Course, Error> {
        self.courses
            .save(course)
            .await
            .map_err(map_repository_error)
    }

    async fn retrieve_course(&self, id: i64) -> Result<Option<Course>, Error> {
        self.courses
            .find_by_id(id)
            .await
            .map_err(map_repository_error)
    }

    async fn retrieve_all_courses(&self) -> Result<Vec<Course>, Error> {
        self.courses.find_all().await.map_err(map_repository_error)
    }

    async fn remove_course(&self, id: i64) -> Result<(), Error> {
        self.courses
            .delete_by_id(id)
            .await
            .map_err(map_repository_error)
    }
}
