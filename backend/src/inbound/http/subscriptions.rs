//! Subscription API handlers.
//!
//! ```text
//! POST /api/v1/subscriptions/add {"subscriptionType":"MONTHLY","startDate":"2024-01-10","price":95.0}
//! GET  /api/v1/subscriptions/by-type?typeSubscription=ANNUAL
//! GET  /api/v1/subscriptions/by-dates?start=2024-01-01&end=2024-12-31
//! ```

use actix_web::{delete, get, post, put, web, HttpResponse};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{Error, Subscription, SubscriptionType};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_date, parse_subscription_type};
use crate::inbound::http::ApiResult;

/// Subscription body for `POST add` and `PUT update`.
///
/// `endDate` may be omitted on creation; the service derives it from the
/// plan. Updates persist the body exactly as given.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionRequest {
    #[serde(default)]
    pub id: Option<i64>,
    pub subscription_type: SubscriptionType,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    pub price: f32,
}

impl From<SubscriptionRequest> for Subscription {
    fn from(value: SubscriptionRequest) -> Self {
        Self {
            id: value.id,
            subscription_type: value.subscription_type,
            start_date: value.start_date,
            end_date: value.end_date,
            price: value.price,
        }
    }
}

/// Subscription as returned to clients.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionResponse {
    pub id: Option<i64>,
    pub subscription_type: SubscriptionType,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub price: f32,
}

impl From<Subscription> for SubscriptionResponse {
    fn from(value: Subscription) -> Self {
        Self {
            id: value.id,
            subscription_type: value.subscription_type,
            start_date: value.start_date,
            end_date: value.end_date,
            price: value.price,
        }
    }
}

/// Query string for the by-type listing.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionTypeQuery {
    /// Plan token: MONTHLY, SEMESTRIEL or ANNUAL.
    pub type_subscription: String,
}

/// Query string for the by-dates listing; both bounds are inclusive.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct DateRangeQuery {
    /// First start date of the range, ISO-8601.
    pub start: String,
    /// Last start date of the range, ISO-8601.
    pub end: String,
}

/// Create a subscription, deriving its end date from the plan.
#[utoipa::path(
    post,
    path = "/api/v1/subscriptions/add",
    request_body = SubscriptionRequest,
    responses(
        (status = 201, description = "Subscription created", body = SubscriptionResponse),
        (status = 400, description = "Malformed payload", body = Error),
        (status = 503, description = "Backing store unavailable", body = Error)
    ),
    tags = ["subscriptions"],
    operation_id = "addSubscription"
)]
#[post("/add")]
pub async fn add_subscription(
    state: web::Data<HttpState>,
    payload: web::Json<SubscriptionRequest>,
) -> ApiResult<HttpResponse> {
    let created = state
        .subscriptions
        .add_subscription(payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(SubscriptionResponse::from(created)))
}

/// Persist a full subscription object exactly as given.
#[utoipa::path(
    put,
    path = "/api/v1/subscriptions/update",
    request_body = SubscriptionRequest,
    responses(
        (status = 200, description = "Subscription updated", body = SubscriptionResponse),
        (status = 400, description = "Malformed payload", body = Error),
        (status = 503, description = "Backing store unavailable", body = Error)
    ),
    tags = ["subscriptions"],
    operation_id = "updateSubscription"
)]
#[put("/update")]
pub async fn update_subscription(
    state: web::Data<HttpState>,
    payload: web::Json<SubscriptionRequest>,
) -> ApiResult<HttpResponse> {
    let updated = state
        .subscriptions
        .update_subscription(payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Ok().json(SubscriptionResponse::from(updated)))
}

/// Fetch one subscription; an unknown id yields an empty 204.
#[utoipa::path(
    get,
    path = "/api/v1/subscriptions/get/{id}",
    params(("id" = i64, Path, description = "Subscription identifier")),
    responses(
        (status = 200, description = "Subscription found", body = SubscriptionResponse),
        (status = 204, description = "No subscription with that id"),
        (status = 503, description = "Backing store unavailable", body = Error)
    ),
    tags = ["subscriptions"],
    operation_id = "getSubscriptionById"
)]
#[get("/get/{id}")]
pub async fn get_subscription(
    state: web::Data<HttpState>,
    id: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    match state
        .subscriptions
        .retrieve_subscription(id.into_inner())
        .await?
    {
        Some(subscription) => {
            Ok(HttpResponse::Ok().json(SubscriptionResponse::from(subscription)))
        }
        None => Ok(HttpResponse::NoContent().finish()),
    }
}

/// List every subscription.
#[utoipa::path(
    get,
    path = "/api/v1/subscriptions/all",
    responses(
        (status = 200, description = "All subscriptions", body = [SubscriptionResponse]),
        (status = 503, description = "Backing store unavailable", body = Error)
    ),
    tags = ["subscriptions"],
    operation_id = "getAllSubscriptions"
)]
#[get("/all")]
pub async fn get_all_subscriptions(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<SubscriptionResponse>>> {
    let subscriptions = state.subscriptions.retrieve_all_subscriptions().await?;
    Ok(web::Json(
        subscriptions
            .into_iter()
            .map(SubscriptionResponse::from)
            .collect(),
    ))
}

/// List subscriptions of one plan type, ordered by start date.
#[utoipa::path(
    get,
    path = "/api/v1/subscriptions/by-type",
    params(SubscriptionTypeQuery),
    responses(
        (status = 200, description = "Subscriptions of the given plan", body = [SubscriptionResponse]),
        (status = 400, description = "Unknown plan token", body = Error),
        (status = 503, description = "Backing store unavailable", body = Error)
    ),
    tags = ["subscriptions"],
    operation_id = "getSubscriptionsByType"
)]
#[get("/by-type")]
pub async fn get_subscriptions_by_type(
    state: web::Data<HttpState>,
    query: web::Query<SubscriptionTypeQuery>,
) -> ApiResult<web::Json<Vec<SubscriptionResponse>>> {
    let subscription_type = parse_subscription_type("typeSubscription", &query.type_subscription)?;
    let subscriptions = state
        .subscriptions
        .retrieve_subscriptions_by_type(subscription_type)
        .await?;
    Ok(web::Json(
        subscriptions
            .into_iter()
            .map(SubscriptionResponse::from)
            .collect(),
    ))
}

/// List subscriptions whose start date falls within the inclusive range.
#[utoipa::path(
    get,
    path = "/api/v1/subscriptions/by-dates",
    params(DateRangeQuery),
    responses(
        (status = 200, description = "Subscriptions starting in the range", body = [SubscriptionResponse]),
        (status = 400, description = "Malformed date bound", body = Error),
        (status = 503, description = "Backing store unavailable", body = Error)
    ),
    tags = ["subscriptions"],
    operation_id = "getSubscriptionsByDates"
)]
#[get("/by-dates")]
pub async fn get_subscriptions_by_dates(
    state: web::Data<HttpState>,
    query: web::Query<DateRangeQuery>,
) -> ApiResult<web::Json<Vec<SubscriptionResponse>>> {
    let start = parse_date("start", &query.start)?;
    let end = parse_date("end", &query.end)?;
    let subscriptions = state
        .subscriptions
        .retrieve_subscriptions_by_dates(start, end)
        .await?;
    Ok(web::Json(
        subscriptions
            .into_iter()
            .map(SubscriptionResponse::from)
            .collect(),
    ))
}

/// Delete a subscription; skiers still pointing at it make this a 409.
#[utoipa::path(
    delete,
    path = "/api/v1/subscriptions/delete/{id}",
    params(("id" = i64, Path, description = "Subscription identifier")),
    responses(
        (status = 204, description = "Subscription deleted"),
        (status = 409, description = "Subscription still referenced", body = Error),
        (status = 503, description = "Backing store unavailable", body = Error)
    ),
    tags = ["subscriptions"],
    operation_id = "deleteSubscriptionById"
)]
#[delete("/delete/{id}")]
pub async fn delete_subscription(
    state: web::Data<HttpState>,
    id: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    state
        .subscriptions
        .remove_subscription(id.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Register subscription routes beneath the caller's scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/subscriptions")
            .service(add_subscription)
            .service(update_subscription)
            .service(get_subscriptions_by_type)
            .service(get_subscriptions_by_dates)
            .service(get_all_subscriptions)
            .service(get_subscription)
            .service(delete_subscription),
    );
}
