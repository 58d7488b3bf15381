//! Piste API handlers.
//!
//! ```text
//! POST /api/v1/pistes/add {"name":"Kandahar","color":"BLACK","length":3300,"slope":35}
//! GET  /api/v1/pistes/all
//! ```

use actix_web::{delete, get, post, web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::domain::{Color, Error, Piste};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Piste body for `POST add`.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PisteRequest {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    pub color: Color,
    pub length: i32,
    pub slope: i32,
}

impl From<PisteRequest> for Piste {
    fn from(value: PisteRequest) -> Self {
        Self {
            id: value.id,
            name: value.name,
            color: value.color,
            length: value.length,
            slope: value.slope,
        }
    }
}

/// Piste as returned to clients.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PisteResponse {
    pub id: Option<i64>,
    pub name: String,
    pub color: Color,
    pub length: i32,
    pub slope: i32,
}

impl From<Piste> for PisteResponse {
    fn from(value: Piste) -> Self {
        Self {
            id: value.id,
            name: value.name,
            color: value.color,
            length: value.length,
            slope: value.slope,
        }
    }
}

/// Create a piste.
#[utoipa::path(
    post,
    path = "/api/v1/pistes/add",
    request_body = PisteRequest,
    responses(
        (status = 201, description = "Piste created", body = PisteResponse),
        (status = 400, description = "Malformed payload", body = Error),
        (status = 503, description = "Backing store unavailable", body = Error)
    ),
    tags = ["pistes"],
    operation_id = "addPiste"
)]
#[post("/add")]
pub async fn add_piste(
    state: web::Data<HttpState>,
    payload: web::Json<PisteRequest>,
) -> ApiResult<HttpResponse> {
    let created = state.pistes.add_piste(payload.into_inner().into()).await?;
    Ok(HttpResponse::Created().json(PisteResponse::from(created)))
}

/// Fetch one piste; an unknown id yields an empty 204.
#[utoipa::path(
    get,
    path = "/api/v1/pistes/get/{id}",
    params(("id" = i64, Path, description = "Piste identifier")),
    responses(
        (status = 200, description = "Piste found", body = PisteResponse),
        (status = 204, description = "No piste with that id"),
        (status = 503, description = "Backing store unavailable", body = Error)
    ),
    tags = ["pistes"],
    operation_id = "getPisteById"
)]
#[get("/get/{id}")]
pub async fn get_piste(
    state: web::Data<HttpState>,
    id: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    match state.pistes.retrieve_piste(id.into_inner()).await? {
        Some(piste) => Ok(HttpResponse::Ok().json(PisteResponse::from(piste))),
        None => Ok(HttpResponse::NoContent().finish()),
    }
}

/// List every piste.
#[utoipa::path(
    get,
    path = "/api/v1/pistes/all",
    responses(
        (status = 200, description = "All pistes", body = [PisteResponse]),
        (status = 503, description = "Backing store unavailable", body = Error)
    ),
    tags = ["pistes"],
    operation_id = "getAllPistes"
)]
#[get("/all")]
pub async fn get_all_pistes(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<PisteResponse>>> {
    let pistes = state.pistes.retrieve_all_pistes().await?;
    Ok(web::Json(
        pistes.into_iter().map(PisteResponse::from).collect(),
    ))
}

/// Delete a piste; skiers still linked to it make this a 409.
#[utoipa::path(
    delete,
    path = "/api/v1/pistes/delete/{id}",
    params(("id" = i64, Path, description = "Piste identifier")),
    responses(
        (status = 204, description = "Piste deleted"),
        (status = 409, description = "Piste still referenced", body = Error),
        (status = 503, description = "Backing store unavailable", body = Error)
    ),
    tags = ["pistes"],
    operation_id = "deletePisteById"
)]
#[delete("/delete/{id}")]
pub async fn delete_piste(
    state: web::Data<HttpState>,
    id: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    state.pistes.remove_piste(id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Register piste routes beneath the caller's scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/pistes")
            .service(add_piste)
            .service(get_all_pistes)
            .service(get_piste)
            .service(delete_piste),
    );
}
