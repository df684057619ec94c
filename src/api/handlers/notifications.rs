use axum::{extract::State, Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;
use validator::Validate;

use crate::{
    api::{
        extract::{ApiJson, ApiPath, ApiQuery},
        middleware::auth::CurrentUser,
        state::AppState,
    },
    domain::{DispatchStatus, SendNotificationRequest},
    error::Result,
};

#[derive(Debug, Deserialize, Default)]
pub struct InboxQuery {
    #[serde(default)]
    pub unread: bool,
}

pub async fn list(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    ApiQuery(query): ApiQuery<InboxQuery>,
) -> Result<Json<Value>> {
    let (notifications, unread_count) = state
        .service_context
        .notification_service
        .inbox(current.user.id, query.unread)
        .await?;

    Ok(Json(json!({
        "notifications": notifications,
        "unreadCount": unread_count,
    })))
}

pub async fn mark_read(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Value>> {
    state
        .service_context
        .notification_service
        .mark_read(current.user.id, id)
        .await?;

    Ok(Json(json!({ "success": true })))
}

pub async fn mark_all_read(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<Json<Value>> {
    let updated = state
        .service_context
        .notification_service
        .mark_all_read(current.user.id)
        .await?;

    Ok(Json(json!({ "success": true, "updated": updated })))
}

pub async fn delete(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Value>> {
    state
        .service_context
        .notification_service
        .delete(current.user.id, id)
        .await?;

    Ok(Json(json!({ "success": true })))
}

pub async fn send(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    ApiJson(request): ApiJson<SendNotificationRequest>,
) -> Result<Json<Value>> {
    request.validate()?;

    let dispatch = state
        .service_context
        .notification_service
        .send(&current.viewer(), request)
        .await?;

    let note = match dispatch.status {
        DispatchStatus::Scheduled => "Notification scheduled; delivery happens outside this service",
        DispatchStatus::Sent => "Notification would be sent via configured channels in production",
    };

    Ok(Json(json!({
        "success": true,
        "notification": dispatch,
        "note": note,
    })))
}
