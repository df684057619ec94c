use axum::{
    extract::State,
    http::StatusCode,
    Extension,
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;
use validator::Validate;

use crate::{
    api::{
        extract::{ApiJson, ApiPath},
        middleware::auth::CurrentUser,
        state::AppState,
    },
    domain::{AddResponseRequest, CreateTicketRequest, UpdateTicketStatusRequest},
    error::Result,
};

pub async fn list(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<Json<Value>> {
    let tickets = state
        .service_context
        .ticket_service
        .list(&current.viewer())
        .await?;

    Ok(Json(json!({ "tickets": tickets })))
}

pub async fn create(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    ApiJson(request): ApiJson<CreateTicketRequest>,
) -> Result<(StatusCode, Json<Value>)> {
    request.validate()?;

    let ticket = state
        .service_context
        .ticket_service
        .create(&current.user, request)
        .await?;

    Ok((StatusCode::CREATED, Json(json!({ "ticket": ticket }))))
}

pub async fn get(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Value>> {
    let ticket = state
        .service_context
        .ticket_service
        .get(&current.viewer(), id)
        .await?;

    Ok(Json(json!({ "ticket": ticket })))
}

pub async fn respond(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<AddResponseRequest>,
) -> Result<Json<Value>> {
    request.validate()?;

    let ticket = state
        .service_context
        .ticket_service
        .respond(&current.user, id, request)
        .await?;

    Ok(Json(json!({ "ticket": ticket })))
}

pub async fn update_status(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<UpdateTicketStatusRequest>,
) -> Result<Json<Value>> {
    let ticket = state
        .service_context
        .ticket_service
        .update_status(&current.viewer(), id, request.status)
        .await?;

    Ok(Json(json!({ "ticket": ticket })))
}
