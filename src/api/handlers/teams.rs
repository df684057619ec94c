use axum::{extract::State, Extension, Json};
use serde_json::{json, Value};
use validator::Validate;

use crate::{
    api::{
        extract::{ApiJson, ApiQuery},
        middleware::auth::CurrentUser,
        state::AppState,
    },
    domain::{ChannelMessageQuery, PostChannelMessageRequest},
    error::Result,
};

pub async fn list_teams(State(state): State<AppState>) -> Result<Json<Value>> {
    let teams = state.service_context.teams_service.list_teams().await?;

    Ok(Json(json!({ "teams": teams })))
}

/// Microsoft Graph channel feed, served from the local store.
pub async fn list_messages(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ChannelMessageQuery>,
) -> Result<Json<Value>> {
    let messages = state
        .service_context
        .teams_service
        .recent_messages(&query)
        .await?;

    Ok(Json(json!({
        "messages": messages,
        "metadata": {
            "source": "mock",
            "note": "This is placeholder data. Connect Microsoft Graph API for real Teams integration.",
        },
    })))
}

pub async fn post_message(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    ApiJson(request): ApiJson<PostChannelMessageRequest>,
) -> Result<Json<Value>> {
    request.validate()?;

    let message = state
        .service_context
        .teams_service
        .post_message(&current.user, request)
        .await?;

    Ok(Json(json!({
        "success": true,
        "messageId": message.id,
        "note": "Message would be sent to Teams in production",
    })))
}
