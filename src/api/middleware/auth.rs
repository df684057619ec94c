use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;

use crate::{
    api::state::AppState,
    auth::SESSION_COOKIE,
    domain::User,
    error::{AppError, Result},
    policy::{self, Viewer},
};

#[derive(Clone)]
pub struct CurrentUser {
    pub user: User,
}

impl CurrentUser {
    pub fn viewer(&self) -> Viewer {
        Viewer::from(&self.user)
    }
}

async fn authenticate(state: &AppState, jar: &CookieJar) -> Result<User> {
    let session_cookie = jar
        .get(SESSION_COOKIE)
        .ok_or(AppError::Unauthorized)?;

    state
        .service_context
        .auth_service
        .current_user(session_cookie.value())
        .await?
        .ok_or(AppError::Unauthorized)
}

pub async fn require_auth(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response> {
    let user = authenticate(&state, &jar).await?;

    request.extensions_mut().insert(CurrentUser { user });

    Ok(next.run(request).await)
}

/// Admin and CEO accounts only.
pub async fn require_moderator(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response> {
    let user = authenticate(&state, &jar).await?;

    if !policy::can_moderate(user.role) {
        tracing::debug!("Denied admin route to {}", user.email);
        return Err(AppError::Forbidden);
    }

    request.extensions_mut().insert(CurrentUser { user });

    Ok(next.run(request).await)
}
