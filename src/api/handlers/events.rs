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
        extract::{ApiJson, ApiPath, ApiQuery},
        middleware::auth::CurrentUser,
        state::AppState,
    },
    domain::{CreateEventRequest, EventFilter, UpdateEventRequest},
    error::Result,
};

pub async fn list(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    ApiQuery(filter): ApiQuery<EventFilter>,
) -> Result<Json<Value>> {
    let events = state
        .service_context
        .event_service
        .list(&current.viewer(), &filter)
        .await?;

    Ok(Json(json!({ "events": events })))
}

pub async fn get(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Value>> {
    let event = state
        .service_context
        .event_service
        .get(&current.viewer(), id)
        .await?;

    Ok(Json(json!({ "event": event })))
}

pub async fn create(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    ApiJson(request): ApiJson<CreateEventRequest>,
) -> Result<(StatusCode, Json<Value>)> {
    request.validate()?;

    let event = state
        .service_context
        .event_service
        .create(&current.user, request)
        .await?;

    Ok((StatusCode::CREATED, Json(json!({ "event": event }))))
}

pub async fn update(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<UpdateEventRequest>,
) -> Result<Json<Value>> {
    request.validate()?;

    let event = state
        .service_context
        .event_service
        .update(&current.viewer(), id, request)
        .await?;

    Ok(Json(json!({ "event": event })))
}

pub async fn delete(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Value>> {
    state
        .service_context
        .event_service
        .delete(&current.viewer(), id)
        .await?;

    Ok(Json(json!({ "success": true })))
}
