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
    domain::{AnnouncementFilter, CreateAnnouncementRequest, UpdateAnnouncementRequest},
    error::Result,
};

pub async fn list(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    ApiQuery(filter): ApiQuery<AnnouncementFilter>,
) -> Result<Json<Value>> {
    let announcements = state
        .service_context
        .announcement_service
        .list(&current.viewer(), &filter)
        .await?;

    Ok(Json(json!({ "announcements": announcements })))
}

pub async fn get(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Value>> {
    let announcement = state
        .service_context
        .announcement_service
        .get(&current.viewer(), id)
        .await?;

    Ok(Json(json!({ "announcement": announcement })))
}

pub async fn create(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    ApiJson(request): ApiJson<CreateAnnouncementRequest>,
) -> Result<(StatusCode, Json<Value>)> {
    request.validate()?;

    let announcement = state
        .service_context
        .announcement_service
        .create(&current.user, request)
        .await?;

    Ok((StatusCode::CREATED, Json(json!({ "announcement": announcement }))))
}

pub async fn update(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<UpdateAnnouncementRequest>,
) -> Result<Json<Value>> {
    request.validate()?;

    let announcement = state
        .service_context
        .announcement_service
        .update(&current.viewer(), id, request)
        .await?;

    Ok(Json(json!({ "announcement": announcement })))
}

pub async fn delete(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Value>> {
    state
        .service_context
        .announcement_service
        .delete(&current.viewer(), id)
        .await?;

    Ok(Json(json!({ "success": true })))
}

pub async fn approve(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Value>> {
    let announcement = state
        .service_context
        .announcement_service
        .approve(&current.viewer(), id)
        .await?;

    Ok(Json(json!({ "announcement": announcement })))
}

pub async fn reject(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Value>> {
    let announcement = state
        .service_context
        .announcement_service
        .reject(&current.viewer(), id)
        .await?;

    Ok(Json(json!({ "announcement": announcement })))
}
