use axum::{
    extract::State,
    Extension,
    Json,
};
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    api::{extract::ApiJson, middleware::auth::CurrentUser, state::AppState},
    auth::{AuthService, SESSION_COOKIE},
    error::Result,
};

#[derive(Debug, Deserialize, Default)]
pub struct LoginRequest {
    /// Omitted to sign in as the demo account.
    #[serde(default)]
    pub email: Option<String>,
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<(CookieJar, Json<Value>)> {
    let auth_service = &state.service_context.auth_service;

    let (user, token) = auth_service.sign_in(req.email.as_deref()).await?;
    let cookie = auth_service.create_session_cookie(&token);

    Ok((jar.add(cookie), Json(json!({ "user": user }))))
}

pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<Value>)> {
    if let Some(session_cookie) = jar.get(SESSION_COOKIE) {
        state
            .service_context
            .auth_service
            .invalidate_session(session_cookie.value())
            .await?;
    }

    let jar = jar.add(AuthService::create_logout_cookie());

    Ok((jar, Json(json!({ "success": true }))))
}

pub async fn me(Extension(current): Extension<CurrentUser>) -> Json<Value> {
    Json(json!({ "user": current.user }))
}
