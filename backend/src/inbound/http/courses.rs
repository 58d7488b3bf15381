//! Course API handlers.
//!
//! ```text
//! POST /api/v1/courses/add {"level":2,"courseType":"COLLECTIVE_CHILDREN","support":"SKI","price":120.0,"timeSlot":3}
//! GET  /api/v1/courses/get/5
//! ```

use actix_web::{delete, get, post, put, web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::domain::{Course, CourseType, Error, Support};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Course body for `POST add` and `PUT update`.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseRequest {
    #[serde(default)]
    pub id: Option<i64>,
    pub level: i32,
    pub course_type: CourseType,
    pub support: Support,
    pub price: f32,
    pub time_slot: i32,
    #[serde(default)]
    pub instructor_id: Option<i64>,
}

impl From<CourseRequest> for Course {
    fn from(value: CourseRequest) -> Self {
        Self {
            id: value.id,
            level: value.level,
            course_type: value.course_type,
            support: value.support,
            price: value.price,
            time_slot: value.time_slot,
            instructor_id: value.instructor_id,
        }
    }
}

/// Course as returned to clients.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseResponse {
    pub id: Option<i64>,
    pub level: i32,
    pub course_type: CourseType,
    pub support: Support,
    pub price: f32,
    pub time_slot: i32,
    pub instructor_id: Option<i64>,
}

impl From<Course> for CourseResponse {
    fn from(value: Course) -> Self {
        Self {
            id: value.id,
            level: value.level,
            course_type: value.course_type,
            support: value.support,
            price: value.price,
            time_slot: value.time_slot,
            instructor_id: value.instructor_id,
        }
    }
}

/// Create a course.
#[utoipa::path(
    post,
    path = "/api/v1/courses/add",
    request_body = CourseRequest,
    responses(
        (status = 201, description = "Course created", body = CourseResponse),
        (status = 400, description = "Malformed payload", body = Error),
        (status = 503, description = "Backing store unavailable", body = Error)
    ),
    tags = ["courses"],
    operation_id = "addCourse"
)]
#[post("/add")]
pub async fn add_course(
    state: web::Data<HttpState>,
    payload: web::Json<CourseRequest>,
) -> ApiResult<HttpResponse> {
    let created = state
        .courses
        .add_course(payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(CourseResponse::from(created)))
}

/// Persist a full course object exactly as given.
#[utoipa::path(
    put,
    path = "/api/v1/courses/update",
    request_body = CourseRequest,
    responses(
        (status = 200, description = "Course updated", body = CourseResponse),
        (status = 400, description = "Malformed payload", body = Error),
        (status = 503, description = "Backing store unavailable", body = Error)
    ),
    tags = ["courses"],
    operation_id = "updateCourse"
)]
#[put("/update")]
pub async fn update_course(
    state: web::Data<HttpState>,
    payload: web::Json<CourseRequest>,
) -> ApiResult<HttpResponse> {
    let updated = state
        .courses
        .update_course(payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Ok().json(CourseResponse::from(updated)))
}

/// Fetch one course; an unknown id yields an empty 204.
#[utoipa::path(
    get,
    path = "/api/v1/courses/get/{id}",
    params(("id" = i64, Path, description = "Course identifier")),
    responses(
        (status = 200, description = "Course found", body = CourseResponse),
        (status = 204, description = "No course with that id"),
        (status = 503, description = "Backing store unavailable", body = Error)
    ),
    tags = ["courses"],
    operation_id = "getCourseById"
)]
#[get("/get/{id}")]
pub async fn get_course(
    state: web::Data<HttpState>,
    id: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    match state.courses.retrieve_course(id.into_inner()).await? {
        Some(course) => Ok(HttpResponse::Ok().json(CourseResponse::from(course))),
        None => Ok(HttpResponse::NoContent().finish()),
    }
}

/// List every course.
#[utoipa::path(
    get,
    path = "/api/v1/courses/all",
    responses(
        (status = 200, description = "All courses", body = [CourseResponse]),
        (status = 503, description = "Backing store unavailable", body = Error)
    ),
    tags = ["courses"],
    operation_id = "getAllCourses"
)]
#[get("/all")]
pub async fn get_all_courses(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<CourseResponse>>> {
    let courses = state.courses.retrieve_all_courses().await?;
    Ok(web::Json(
        courses.into_iter().map(CourseResponse::from).collect(),
    ))
}

/// Delete a course; enrolments still pointing at it make this a 409.
#[utoipa::path(
    delete,
    path = "/api/v1/courses/delete/{id}",
    params(("id" = i64, Path, description = "Course identifier")),
    responses(
        (status = 204, description = "Course deleted"),
        (status = 409, description = "Course still referenced", body = Error),
        (status = 503, description = "Backing store unavailable", body = Error)
    ),
    tags = ["courses"],
    operation_id = "deleteCourseById"
)]
#[delete("/delete/{id}")]
pub async fn delete_course(
    state: web::Data<HttpState>,
    id: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    state.courses.remove_course(id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Register course routes beneath the caller's scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/courses")
            .service(add_course)
            .service(update_course)
            .service(get_all_courses)
            .service(get_course)
            .service(delete_course),
    );
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{http::StatusCode, test as actix_test};
    use serde_json::{json, Value};

    use super::*;
    use crate::domain::services::MockCourseService;
    use crate::inbound::http::test_utils;

    fn course(id: i64) -> Course {
        Course {
            id: Some(id),
            level: 2,
            course_type: CourseType::CollectiveChildren,
            support: Support::Ski,
            price: 120.0,
            time_slot: 3,
            instructor_id: None,
        }
    }

    #[actix_web::test]
    async fn add_round_trips_the_enum_tokens() {
        let mut courses = MockCourseService::new();
        courses.expect_add_course().return_once(|_| Ok(course(5)));
        let mut state = test_utils::state();
        state.courses = Arc::new(courses);

        let app = actix_test::init_service(test_utils::test_app(state, configure)).await;
        let request = actix_test::TestRequest::post()
            .uri("/api/v1/courses/add")
            .set_json(json!({
                "level": 2,
                "courseType": "COLLECTIVE_CHILDREN",
                "support": "SKI",
                "price": 120.0,
                "timeSlot": 3,
            }))
            .to_request();

        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["courseType"], "COLLECTIVE_CHILDREN");
        assert_eq!(body["support"], "SKI");
    }

    #[actix_web::test]
    async fn add_rejects_an_unknown_course_type_token() {
        let app =
            actix_test::init_service(test_utils::test_app(test_utils::state(), configure)).await;
        let request = actix_test::TestRequest::post()
            .uri("/api/v1/courses/add")
            .set_json(json!({
                "level": 2,
                "courseType": "PRIVATE_LESSON",
                "support": "SKI",
                "price": 120.0,
                "timeSlot": 3,
            }))
            .to_request();

        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn get_on_an_absent_id_is_an_empty_204() {
        let mut courses = MockCourseService::new();
        courses.expect_retrieve_course().return_once(|_| Ok(None));
        let mut state = test_utils::state();
        state.courses = Arc::new(courses);

        let app = actix_test::init_service(test_utils::test_app(state, configure)).await;
        let request = actix_test::TestRequest::get()
            .uri("/api/v1/courses/get/9")
            .to_request();

        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[actix_web::test]
    async fn delete_surfaces_reference_conflicts_as_409() {
        let mut courses = MockCourseService::new();
        courses
            .expect_remove_course()
            .return_once(|_| Err(Error::conflict("operation conflicts with existing references")));
        let mut state = test_utils::state();
        state.courses = Arc::new(courses);

        let app = actix_test::init_service(test_utils::test_app(state, configure)).await;
        let request = actix_test::TestRequest::delete()
            .uri("/api/v1/courses/delete/5")
            .to_request();

        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
