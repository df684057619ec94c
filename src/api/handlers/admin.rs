use axum::{extract::State, Json};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    api::{extract::ApiQuery, state::AppState},
    domain::AnnouncementStatus,
    error::Result,
    service::insights_service::AdminStats,
};

#[derive(Debug, Deserialize, Default)]
pub struct QueueQuery {
    pub status: Option<AnnouncementStatus>,
}

pub async fn stats(State(state): State<AppState>) -> Result<Json<AdminStats>> {
    let stats = state.service_context.insights_service.admin_stats().await?;
    Ok(Json(stats))
}

/// Moderation queue, pending submissions unless another status is asked for.
pub async fn announcements(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<QueueQuery>,
) -> Result<Json<Value>> {
    let status = query.status.unwrap_or(AnnouncementStatus::Pending);

    let announcements = state
        .service_context
        .announcement_service
        .list_by_status(status)
        .await?;

    Ok(Json(json!({ "announcements": announcements })))
}

pub async fn send_reminders(State(state): State<AppState>) -> Result<Json<Value>> {
    let reminded = state
        .service_context
        .event_service
        .send_reminders(Utc::now())
        .await?;

    Ok(Json(json!({ "remindedEvents": reminded })))
}
