use axum::{extract::State, Extension, Json};
use serde_json::{json, Value};
use validator::Validate;

use crate::{
    api::{extract::ApiJson, middleware::auth::CurrentUser, state::AppState},
    domain::{UpdatePreferencesRequest, UpdateProfileRequest},
    error::Result,
};

pub async fn update_profile(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    ApiJson(request): ApiJson<UpdateProfileRequest>,
) -> Result<Json<Value>> {
    request.validate()?;

    let user = state
        .service_context
        .user_service
        .update_profile(current.user.id, request)
        .await?;

    Ok(Json(json!({ "user": user })))
}

pub async fn update_preferences(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    ApiJson(request): ApiJson<UpdatePreferencesRequest>,
) -> Result<Json<Value>> {
    let user = state
        .service_context
        .user_service
        .update_preferences(current.user.id, request)
        .await?;

    Ok(Json(json!({ "user": user })))
}
