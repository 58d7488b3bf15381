//! Registration API handlers.
//!
//! ```text
//! POST /api/v1/registrations/add-and-assign-to-skier/1 {"numWeek":3}
//! PUT  /api/v1/registrations/assign-to-course/11/5
//! ```

use actix_web::{delete, get, post, put, web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::domain::{Error, Registration, RegistrationDraft};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Registration intake body; the skier comes from the path, the course is
/// attached later.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    pub num_week: i32,
}

impl From<RegistrationRequest> for RegistrationDraft {
    fn from(value: RegistrationRequest) -> Self {
        Self {
            num_week: value.num_week,
        }
    }
}

/// Registration as returned to clients, with both reference scalars.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationResponse {
    pub id: Option<i64>,
    pub num_week: i32,
    pub skier_id: Option<i64>,
    pub course_id: Option<i64>,
}

impl From<Registration> for RegistrationResponse {
    fn from(value: Registration) -> Self {
        Self {
            id: value.id,
            num_week: value.num_week,
            skier_id: value.skier_id,
            course_id: value.course_id,
        }
    }
}

/// Create a registration bound to an existing skier.
#[utoipa::path(
    post,
    path = "/api/v1/registrations/add-and-assign-to-skier/{skier_id}",
    params(("skier_id" = i64, Path, description = "Skier the enrolment belongs to")),
    request_body = RegistrationRequest,
    responses(
        (status = 201, description = "Registration created", body = RegistrationResponse),
        (status = 400, description = "Malformed payload", body = Error),
        (status = 404, description = "No skier with that id", body = Error),
        (status = 503, description = "Backing store unavailable", body = Error)
    ),
    tags = ["registrations"],
    operation_id = "addRegistrationAndAssignToSkier"
)]
#[post("/add-and-assign-to-skier/{skier_id}")]
pub async fn add_registration_and_assign_to_skier(
    state: web::Data<HttpState>,
    skier_id: web::Path<i64>,
    payload: web::Json<RegistrationRequest>,
) -> ApiResult<HttpResponse> {
    let created = state
        .registrations
        .add_registration_and_assign_to_skier(payload.into_inner().into(), skier_id.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(RegistrationResponse::from(created)))
}

/// Point an existing registration at an existing course.
#[utoipa::path(
    put,
    path = "/api/v1/registrations/assign-to-course/{registration_id}/{course_id}",
    params(
        ("registration_id" = i64, Path, description = "Registration identifier"),
        ("course_id" = i64, Path, description = "Course identifier")
    ),
    responses(
        (status = 200, description = "Registration now points at the course", body = RegistrationResponse),
        (status = 404, description = "Registration or course missing", body = Error),
        (status = 503, description = "Backing store unavailable", body = Error)
    ),
    tags = ["registrations"],
    operation_id = "assignRegistrationToCourse"
)]
#[put("/assign-to-course/{registration_id}/{course_id}")]
pub async fn assign_registration_to_course(
    state: web::Data<HttpState>,
    path: web::Path<(i64, i64)>,
) -> ApiResult<HttpResponse> {
    let (registration_id, course_id) = path.into_inner();
    let updated = state
        .registrations
        .assign_registration_to_course(registration_id, course_id)
        .await?;
    Ok(HttpResponse::Ok().json(RegistrationResponse::from(updated)))
}

/// Fetch one registration; an unknown id yields an empty 204.
#[utoipa::path(
    get,
    path = "/api/v1/registrations/get/{id}",
    params(("id" = i64, Path, description = "Registration identifier")),
    responses(
        (status = 200, description = "Registration found", body = RegistrationResponse),
        (status = 204, description = "No registration with that id"),
        (status = 503, description = "Backing store unavailable", body = Error)
    ),
    tags = ["registrations"],
    operation_id = "getRegistrationById"
)]
#[get("/get/{id}")]
pub async fn get_registration(
    state: web::Data<HttpState>,
    id: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    match state
        .registrations
        .retrieve_registration(id.into_inner())
        .await?
    {
        Some(registration) => {
            Ok(HttpResponse::Ok().json(RegistrationResponse::from(registration)))
        }
        None => Ok(HttpResponse::NoContent().finish()),
    }
}

/// List every registration.
#[utoipa::path(
    get,
    path = "/api/v1/registrations/all",
    responses(
        (status = 200, description = "All registrations", body = [RegistrationResponse]),
        (status = 503, description = "Backing store unavailable", body = Error)
    ),
    tags = ["registrations"],
    operation_id = "getAllRegistrations"
)]
#[get("/all")]
pub async fn get_all_registrations(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<RegistrationResponse>>> {
    let registrations = state.registrations.retrieve_all_registrations().await?;
    Ok(web::Json(
        registrations
            .into_iter()
            .map(RegistrationResponse::from)
            .collect(),
    ))
}

/// Delete a registration.
#[utoipa::path(
    delete,
    path = "/api/v1/registrations/delete/{id}",
    params(("id" = i64, Path, description = "Registration identifier")),
    responses(
        (status = 204, description = "Registration deleted"),
        (status = 503, description = "Backing store unavailable", body = Error)
    ),
    tags = ["registrations"],
    operation_id = "deleteRegistrationById"
)]
#[delete("/delete/{id}")]
pub async fn delete_registration(
    state: web::Data<HttpState>,
    id: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    state
        .registrations
        .remove_registration(id.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Register registration routes beneath the caller's scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/registrations")
            .service(add_registration_and_assign_to_skier)
            .service(assign_registration_to_course)
            .service(get_all_registrations)
            .service(get_registration)
            .service(delete_registration),
    );
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{http::StatusCode, test as actix_test};
    use serde_json::{json, Value};

    use super::*;
    use crate::domain::services::MockRegistrationService;
    use crate::inbound::http::test_utils;

    #[actix_web::test]
    async fn add_binds_the_skier_and_leaves_the_course_unset() {
        let mut registrations = MockRegistrationService::new();
        registrations
            .expect_add_registration_and_assign_to_skier()
            .withf(|draft, skier_id| draft.num_week == 3 && *skier_id == 1)
            .return_once(|draft, skier_id| {
                Ok(Registration {
                    id: Some(11),
                    num_week: draft.num_week,
                    skier_id: Some(skier_id),
                    course_id: None,
                })
            });
        let mut state = test_utils::state();
        state.registrations = Arc::new(registrations);

        let app = actix_test::init_service(test_utils::test_app(state, configure)).await;
        let request = actix_test::TestRequest::post()
            .uri("/api/v1/registrations/add-and-assign-to-skier/1")
            .set_json(json!({"numWeek": 3}))
            .to_request();

        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["skierId"], 1);
        assert_eq!(body["courseId"], Value::Null);
    }

    #[actix_web::test]
    async fn assigning_a_missing_registration_returns_the_404_envelope() {
        let mut registrations = MockRegistrationService::new();
        registrations
            .expect_assign_registration_to_course()
            .return_once(|registration_id, _| {
                Err(Error::not_found("registration not found")
                    .with_details(json!({ "registrationId": registration_id })))
            });
        let mut state = test_utils::state();
        state.registrations = Arc::new(registrations);

        let app = actix_test::init_service(test_utils::test_app(state, configure)).await;
        let request = actix_test::TestRequest::put()
            .uri("/api/v1/registrations/assign-to-course/99/5")
            .to_request();

        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["details"]["registrationId"], 99);
    }

    #[actix_web::test]
    async fn get_on_an_absent_id_is_an_empty_204() {
        let mut registrations = MockRegistrationService::new();
        registrations
            .expect_retrieve_registration()
            .return_once(|_| Ok(None));
        let mut state = test_utils::state();
        state.registrations = Arc::new(registrations);

        let app = actix_test::init_service(test_utils::test_app(state, configure)).await;
        let request = actix_test::TestRequest::get()
            .uri("/api/v1/registrations/get/11")
            .to_request();

        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }
}
