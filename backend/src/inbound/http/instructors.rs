//! Instructor API handlers.
//!
//! ```text
//! POST /api/v1/instructors/add {"firstName":"Luc","lastName":"Favre","dateOfHire":"2019-12-01"}
//! POST /api/v1/instructors/add-and-assign-to-course/5
//! ```

use actix_web::{delete, get, post, put, web, HttpResponse};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{Error, Instructor, InstructorDetails};
use crate::inbound::http::courses::CourseResponse;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Instructor body for `POST add` and `PUT update`.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InstructorRequest {
    #[serde(default)]
    pub id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub date_of_hire: NaiveDate,
}

impl From<InstructorRequest> for Instructor {
    fn from(value: InstructorRequest) -> Self {
        Self {
            id: value.id,
            first_name: value.first_name,
            last_name: value.last_name,
            date_of_hire: value.date_of_hire,
        }
    }
}

/// Instructor as returned from the plain create and update operations.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InstructorResponse {
    pub id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub date_of_hire: NaiveDate,
}

impl From<Instructor> for InstructorResponse {
    fn from(value: Instructor) -> Self {
        Self {
            id: value.id,
            first_name: value.first_name,
            last_name: value.last_name,
            date_of_hire: value.date_of_hire,
        }
    }
}

/// Instructor together with the courses assigned to them.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InstructorDetailResponse {
    pub id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub date_of_hire: NaiveDate,
    pub courses: Vec<CourseResponse>,
}

impl From<InstructorDetails> for InstructorDetailResponse {
    fn from(details: InstructorDetails) -> Self {
        Self {
            id: details.instructor.id,
            first_name: details.instructor.first_name,
            last_name: details.instructor.last_name,
            date_of_hire: details.instructor.date_of_hire,
            courses: details
                .courses
                .into_iter()
                .map(CourseResponse::from)
                .collect(),
        }
    }
}

/// Create an instructor.
#[utoipa::path(
    post,
    path = "/api/v1/instructors/add",
    request_body = InstructorRequest,
    responses(
        (status = 201, description = "Instructor created", body = InstructorResponse),
        (status = 400, description = "Malformed payload", body = Error),
        (status = 503, description = "Backing store unavailable", body = Error)
    ),
    tags = ["instructors"],
    operation_id = "addInstructor"
)]
#[post("/add")]
pub async fn add_instructor(
    state: web::Data<HttpState>,
    payload: web::Json<InstructorRequest>,
) -> ApiResult<HttpResponse> {
    let created = state
        .instructors
        .add_instructor(payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(InstructorResponse::from(created)))
}

/// Create an instructor and point the target course at them.
#[utoipa::path(
    post,
    path = "/api/v1/instructors/add-and-assign-to-course/{course_id}",
    params(("course_id" = i64, Path, description = "Course to hand to the instructor")),
    request_body = InstructorRequest,
    responses(
        (status = 201, description = "Instructor created and assigned", body = InstructorDetailResponse),
        (status = 400, description = "Malformed payload", body = Error),
        (status = 404, description = "No course with that id", body = Error),
        (status = 503, description = "Backing store unavailable", body = Error)
    ),
    tags = ["instructors"],
    operation_id = "addInstructorAndAssignToCourse"
)]
#[post("/add-and-assign-to-course/{course_id}")]
pub async fn add_instructor_and_assign_to_course(
    state: web::Data<HttpState>,
    course_id: web::Path<i64>,
    payload: web::Json<InstructorRequest>,
) -> ApiResult<HttpResponse> {
    let details = state
        .instructors
        .add_instructor_and_assign_to_course(payload.into_inner().into(), course_id.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(InstructorDetailResponse::from(details)))
}

/// Persist a full instructor object exactly as given.
#[utoipa::path(
    put,
    path = "/api/v1/instructors/update",
    request_body = InstructorRequest,
    responses(
        (status = 200, description = "Instructor updated", body = InstructorResponse),
        (status = 400, description = "Malformed payload", body = Error),
        (status = 503, description = "Backing store unavailable", body = Error)
    ),
    tags = ["instructors"],
    operation_id = "updateInstructor"
)]
#[put("/update")]
pub async fn update_instructor(
    state: web::Data<HttpState>,
    payload: web::Json<InstructorRequest>,
) -> ApiResult<HttpResponse> {
    let updated = state
        .instructors
        .update_instructor(payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Ok().json(InstructorResponse::from(updated)))
}

/// Fetch one instructor with their courses; an unknown id yields an empty
/// 204.
#[utoipa::path(
    get,
    path = "/api/v1/instructors/get/{id}",
    params(("id" = i64, Path, description = "Instructor identifier")),
    responses(
        (status = 200, description = "Instructor found", body = InstructorDetailResponse),
        (status = 204, description = "No instructor with that id"),
        (status = 503, description = "Backing store unavailable", body = Error)
    ),
    tags = ["instructors"],
    operation_id = "getInstructorById"
)]
#[get("/get/{id}")]
pub async fn get_instructor(
    state: web::Data<HttpState>,
    id: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    match state.instructors.retrieve_instructor(id.into_inner()).await? {
        Some(details) => Ok(HttpResponse::Ok().json(InstructorDetailResponse::from(details))),
        None => Ok(HttpResponse::NoContent().finish()),
    }
}

/// List every instructor with their courses.
#[utoipa::path(
    get,
    path = "/api/v1/instructors/all",
    responses(
        (status = 200, description = "All instructors", body = [InstructorDetailResponse]),
        (status = 503, description = "Backing store unavailable", body = Error)
    ),
    tags = ["instructors"],
    operation_id = "getAllInstructors"
)]
#[get("/all")]
pub async fn get_all_instructors(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<InstructorDetailResponse>>> {
    let instructors = state.instructors.retrieve_all_instructors().await?;
    Ok(web::Json(
        instructors
            .into_iter()
            .map(InstructorDetailResponse::from)
            .collect(),
    ))
}

/// Delete an instructor; courses still pointing at them make this a 409.
#[utoipa::path(
    delete,
    path = "/api/v1/instructors/delete/{id}",
    params(("id" = i64, Path, description = "Instructor identifier")),
    responses(
        (status = 204, description = "Instructor deleted"),
        (status = 409, description = "Instructor still referenced", body = Error),
        (status = 503, description = "Backing store unavailable", body = Error)
    ),
    tags = ["instructors"],
    operation_id = "deleteInstructorById"
)]
#[delete("/delete/{id}")]
pub async fn delete_instructor(
    state: web::Data<HttpState>,
    id: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    state.instructors.remove_instructor(id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Register instructor routes beneath the caller's scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/instructors")
            .service(add_instructor)
            .service(add_instructor_and_assign_to_course)
            .service(update_instructor)
            .service(get_all_instructors)
            .service(get_instructor)
            .service(delete_instructor),
    );
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{http::StatusCode, test as actix_test};
    use serde_json::{json, Value};

    use super::*;
    use crate::domain::services::MockInstructorService;
    use crate::domain::{Course, CourseType, Support};
    use crate::inbound::http::test_utils;

    fn instructor(id: i64) -> Instructor {
        Instructor {
            id: Some(id),
            first_name: "Luc".into(),
            last_name: "Favre".into(),
            date_of_hire: NaiveDate::from_ymd_opt(2019, 12, 1).expect("valid date"),
        }
    }

    fn details_with_course() -> InstructorDetails {
        InstructorDetails {
            instructor: instructor(2),
            courses: vec![Course {
                id: Some(5),
                level: 2,
                course_type: CourseType::Individual,
                support: Support::Snowboard,
                price: 180.0,
                time_slot: 4,
                instructor_id: Some(2),
            }],
        }
    }

    #[actix_web::test]
    async fn add_and_assign_returns_the_instructor_with_their_course() {
        let mut instructors = MockInstructorService::new();
        instructors
            .expect_add_instructor_and_assign_to_course()
            .withf(|_, course_id| *course_id == 5)
            .return_once(|_, _| Ok(details_with_course()));
        let mut state = test_utils::state();
        state.instructors = Arc::new(instructors);

        let app = actix_test::init_service(test_utils::test_app(state, configure)).await;
        let request = actix_test::TestRequest::post()
            .uri("/api/v1/instructors/add-and-assign-to-course/5")
            .set_json(json!({
                "firstName": "Luc",
                "lastName": "Favre",
                "dateOfHire": "2019-12-01",
            }))
            .to_request();

        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["courses"][0]["id"], 5);
        assert_eq!(body["courses"][0]["instructorId"], 2);
    }

    #[actix_web::test]
    async fn assigning_to_a_missing_course_returns_the_404_envelope() {
        let mut instructors = MockInstructorService::new();
        instructors
            .expect_add_instructor_and_assign_to_course()
            .return_once(|_, course_id| {
                Err(Error::not_found("course not found")
                    .with_details(json!({ "courseId": course_id })))
            });
        let mut state = test_utils::state();
        state.instructors = Arc::new(instructors);

        let app = actix_test::init_service(test_utils::test_app(state, configure)).await;
        let request = actix_test::TestRequest::post()
            .uri("/api/v1/instructors/add-and-assign-to-course/99")
            .set_json(json!({
                "firstName": "Luc",
                "lastName": "Favre",
                "dateOfHire": "2019-12-01",
            }))
            .to_request();

        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["details"]["courseId"], 99);
    }

    #[actix_web::test]
    async fn get_composes_the_course_list() {
        let mut instructors = MockInstructorService::new();
        instructors
            .expect_retrieve_instructor()
            .return_once(|_| Ok(Some(details_with_course())));
        let mut state = test_utils::state();
        state.instructors = Arc::new(instructors);

        let app = actix_test::init_service(test_utils::test_app(state, configure)).await;
        let request = actix_test::TestRequest::get()
            .uri("/api/v1/instructors/get/2")
            .to_request();

        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["firstName"], "Luc");
        assert_eq!(body["courses"].as_array().map(Vec::len), Some(1));
    }
}
