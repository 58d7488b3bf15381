//! Skier API handlers.
//!
//! ```text
//! POST /api/v1/skiers/add {"firstName":"Nora","lastName":"Berger","dateOfBirth":"1999-03-14","city":"Chamonix","subscription":{"subscriptionType":"ANNUAL","startDate":"2024-01-10","price":640.0}}
//! POST /api/v1/skiers/add-and-assign-to-course/5
//! PUT  /api/v1/skiers/assign-to-subscription/1/3
//! GET  /api/v1/skiers/by-subscription-type?typeSubscription=ANNUAL
//! ```

use actix_web::{delete, get, post, put, web, HttpResponse};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{Error, SkierDetails, SkierDraft, Subscription};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::subscriptions::{SubscriptionRequest, SubscriptionResponse};
use crate::inbound::http::validation::parse_subscription_type;
use crate::inbound::http::ApiResult;

/// Skier intake body, optionally nesting a new subscription and the weeks
/// to enrol when a target course accompanies the request.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SkierRequest {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub city: String,
    #[serde(default)]
    pub subscription: Option<SubscriptionRequest>,
    #[serde(default)]
    pub registrations: Vec<RegistrationWeekRequest>,
}

/// A single week enrolment inside a skier intake body.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationWeekRequest {
    pub num_week: i32,
}

impl From<SkierRequest> for SkierDraft {
    fn from(value: SkierRequest) -> Self {
        Self {
            first_name: value.first_name,
            last_name: value.last_name,
            date_of_birth: value.date_of_birth,
            city: value.city,
            subscription: value.subscription.map(Subscription::from),
            registration_weeks: value
                .registrations
                .into_iter()
                .map(|week| week.num_week)
                .collect(),
        }
    }
}

/// Composed skier view: the skier row, its subscription and its enrolments.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SkierResponse {
    pub id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub city: String,
    pub subscription: Option<SubscriptionResponse>,
    pub registrations: Vec<SkierRegistrationResponse>,
}

/// Enrolment as shown on a skier; the back-reference to the skier is
/// omitted.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SkierRegistrationResponse {
    pub id: Option<i64>,
    pub num_week: i32,
    pub course_id: Option<i64>,
}

impl From<SkierDetails> for SkierResponse {
    fn from(details: SkierDetails) -> Self {
        Self {
            id: details.skier.id,
            first_name: details.skier.first_name,
            last_name: details.skier.last_name,
            date_of_birth: details.skier.date_of_birth,
            city: details.skier.city,
            subscription: details.subscription.map(SubscriptionResponse::from),
            registrations: details
                .registrations
                .into_iter()
                .map(|registration| SkierRegistrationResponse {
                    id: registration.id,
                    num_week: registration.num_week,
                    course_id: registration.course_id,
                })
                .collect(),
        }
    }
}

/// Query string for the by-subscription-type listing.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct SkierSubscriptionTypeQuery {
    /// Plan token: MONTHLY, SEMESTRIEL or ANNUAL.
    pub type_subscription: String,
}

/// Create a skier; a nested subscription gets its end date derived from the
/// plan before anything is persisted.
#[utoipa::path(
    post,
    path = "/api/v1/skiers/add",
    request_body = SkierRequest,
    responses(
        (status = 201, description = "Skier created", body = SkierResponse),
        (status = 400, description = "Malformed payload", body = Error),
        (status = 503, description = "Backing store unavailable", body = Error)
    ),
    tags = ["skiers"],
    operation_id = "addSkier"
)]
#[post("/add")]
pub async fn add_skier(
    state: web::Data<HttpState>,
    payload: web::Json<SkierRequest>,
) -> ApiResult<HttpResponse> {
    let created = state.skiers.add_skier(payload.into_inner().into()).await?;
    Ok(HttpResponse::Created().json(SkierResponse::from(created)))
}

/// Create a skier and enrol them in the course for each listed week.
#[utoipa::path(
    post,
    path = "/api/v1/skiers/add-and-assign-to-course/{course_id}",
    params(("course_id" = i64, Path, description = "Course to enrol the skier in")),
    request_body = SkierRequest,
    responses(
        (status = 201, description = "Skier created and enrolled", body = SkierResponse),
        (status = 400, description = "Malformed payload", body = Error),
        (status = 404, description = "No course with that id", body = Error),
        (status = 503, description = "Backing store unavailable", body = Error)
    ),
    tags = ["skiers"],
    operation_id = "addSkierAndAssignToCourse"
)]
#[post("/add-and-assign-to-course/{course_id}")]
pub async fn add_skier_and_assign_to_course(
    state: web::Data<HttpState>,
    course_id: web::Path<i64>,
    payload: web::Json<SkierRequest>,
) -> ApiResult<HttpResponse> {
    let created = state
        .skiers
        .add_skier_and_assign_to_course(payload.into_inner().into(), course_id.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(SkierResponse::from(created)))
}

/// Point an existing skier at an existing subscription.
#[utoipa::path(
    put,
    path = "/api/v1/skiers/assign-to-subscription/{skier_id}/{subscription_id}",
    params(
        ("skier_id" = i64, Path, description = "Skier identifier"),
        ("subscription_id" = i64, Path, description = "Subscription identifier")
    ),
    responses(
        (status = 200, description = "Skier now holds the subscription", body = SkierResponse),
        (status = 404, description = "Skier or subscription missing", body = Error),
        (status = 503, description = "Backing store unavailable", body = Error)
    ),
    tags = ["skiers"],
    operation_id = "assignSkierToSubscription"
)]
#[put("/assign-to-subscription/{skier_id}/{subscription_id}")]
pub async fn assign_skier_to_subscription(
    state: web::Data<HttpState>,
    path: web::Path<(i64, i64)>,
) -> ApiResult<HttpResponse> {
    let (skier_id, subscription_id) = path.into_inner();
    let details = state
        .skiers
        .assign_skier_to_subscription(skier_id, subscription_id)
        .await?;
    Ok(HttpResponse::Ok().json(SkierResponse::from(details)))
}

/// Record that an existing skier uses an existing piste.
#[utoipa::path(
    put,
    path = "/api/v1/skiers/assign-to-piste/{skier_id}/{piste_id}",
    params(
        ("skier_id" = i64, Path, description = "Skier identifier"),
        ("piste_id" = i64, Path, description = "Piste identifier")
    ),
    responses(
        (status = 200, description = "Association recorded", body = SkierResponse),
        (status = 404, description = "Skier or piste missing", body = Error),
        (status = 503, description = "Backing store unavailable", body = Error)
    ),
    tags = ["skiers"],
    operation_id = "assignSkierToPiste"
)]
#[put("/assign-to-piste/{skier_id}/{piste_id}")]
pub async fn assign_skier_to_piste(
    state: web::Data<HttpState>,
    path: web::Path<(i64, i64)>,
) -> ApiResult<HttpResponse> {
    let (skier_id, piste_id) = path.into_inner();
    let details = state.skiers.assign_skier_to_piste(skier_id, piste_id).await?;
    Ok(HttpResponse::Ok().json(SkierResponse::from(details)))
}

/// List skiers whose subscription is of the given plan type.
#[utoipa::path(
    get,
    path = "/api/v1/skiers/by-subscription-type",
    params(SkierSubscriptionTypeQuery),
    responses(
        (status = 200, description = "Skiers holding the plan", body = [SkierResponse]),
        (status = 400, description = "Unknown plan token", body = Error),
        (status = 503, description = "Backing store unavailable", body = Error)
    ),
    tags = ["skiers"],
    operation_id = "getSkiersBySubscriptionType"
)]
#[get("/by-subscription-type")]
pub async fn get_skiers_by_subscription_type(
    state: web::Data<HttpState>,
    query: web::Query<SkierSubscriptionTypeQuery>,
) -> ApiResult<web::Json<Vec<SkierResponse>>> {
    let subscription_type = parse_subscription_type("typeSubscription", &query.type_subscription)?;
    let skiers = state
        .skiers
        .retrieve_skiers_by_subscription_type(subscription_type)
        .await?;
    Ok(web::Json(skiers.into_iter().map(SkierResponse::from).collect()))
}

/// Fetch one skier with their subscription and enrolments; an unknown id
/// yields an empty 204.
#[utoipa::path(
    get,
    path = "/api/v1/skiers/get/{id}",
    params(("id" = i64, Path, description = "Skier identifier")),
    responses(
        (status = 200, description = "Skier found", body = SkierResponse),
        (status = 204, description = "No skier with that id"),
        (status = 503, description = "Backing store unavailable", body = Error)
    ),
    tags = ["skiers"],
    operation_id = "getSkierById"
)]
#[get("/get/{id}")]
pub async fn get_skier(
    state: web::Data<HttpState>,
    id: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    match state.skiers.retrieve_skier(id.into_inner()).await? {
        Some(details) => Ok(HttpResponse::Ok().json(SkierResponse::from(details))),
        None => Ok(HttpResponse::NoContent().finish()),
    }
}

/// List every skier with their composed details.
#[utoipa::path(
    get,
    path = "/api/v1/skiers/all",
    responses(
        (status = 200, description = "All skiers", body = [SkierResponse]),
        (status = 503, description = "Backing store unavailable", body = Error)
    ),
    tags = ["skiers"],
    operation_id = "getAllSkiers"
)]
#[get("/all")]
pub async fn get_all_skiers(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<SkierResponse>>> {
    let skiers = state.skiers.retrieve_all_skiers().await?;
    Ok(web::Json(skiers.into_iter().map(SkierResponse::from).collect()))
}

/// Delete a skier together with their enrolments and piste links.
#[utoipa::path(
    delete,
    path = "/api/v1/skiers/delete/{id}",
    params(("id" = i64, Path, description = "Skier identifier")),
    responses(
        (status = 204, description = "Skier deleted"),
        (status = 503, description = "Backing store unavailable", body = Error)
    ),
    tags = ["skiers"],
    operation_id = "deleteSkierById"
)]
#[delete("/delete/{id}")]
pub async fn delete_skier(
    state: web::Data<HttpState>,
    id: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    state.skiers.remove_skier(id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Register skier routes beneath the caller's scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/skiers")
            .service(add_skier)
            .service(add_skier_and_assign_to_course)
            .service(assign_skier_to_subscription)
            .service(assign_skier_to_piste)
            .service(get_skiers_by_subscription_type)
            .service(get_all_skiers)
            .service(get_skier)
            .service(delete_skier),
    );
}
