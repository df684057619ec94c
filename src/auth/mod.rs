use std::sync::Arc;

use chrono::{Duration, Utc};
use cookie::{Cookie, SameSite};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::{
    config::AuthConfig,
    domain::User,
    error::{AppError, Result},
    repository::UserRepository,
};

pub mod session;

use session::{Session, SessionStore};

pub const SESSION_COOKIE: &str = "session";

/// Mock single sign-on. Entra ID is not wired up, so signing in picks a
/// directory user by email (or the configured demo account) and always
/// succeeds for known users.
pub struct AuthService {
    session_store: SessionStore,
    user_repo: Arc<dyn UserRepository>,
    config: AuthConfig,
}

impl AuthService {
    pub fn new(pool: SqlitePool, user_repo: Arc<dyn UserRepository>, config: AuthConfig) -> Self {
        Self {
            session_store: SessionStore::new(pool),
            user_repo,
            config,
        }
    }

    pub async fn sign_in(&self, email: Option<&str>) -> Result<(User, String)> {
        let email = email
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .unwrap_or(&self.config.demo_user_email);

        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or(AppError::Unauthorized)?;

        let (_session, token) = self.create_session(user.id).await?;
        tracing::info!("User {} signed in", user.email);

        Ok((user, token))
    }

    pub async fn create_session(&self, user_id: Uuid) -> Result<(Session, String)> {
        let token = generate_token();
        let expires_at = Utc::now() + Duration::hours(self.config.session_duration_hours);

        let session = self.session_store
            .create(user_id, &token, expires_at)
            .await?;

        Ok((session, token))
    }

    pub async fn validate_session(&self, token: &str) -> Result<Option<Session>> {
        self.session_store.find_by_token(token).await
    }

    /// Resolve a session token to its user.
    pub async fn current_user(&self, token: &str) -> Result<Option<User>> {
        match self.validate_session(token).await? {
            Some(session) => self.user_repo.find_by_id(session.user_id).await,
            None => Ok(None),
        }
    }

    pub async fn invalidate_session(&self, token: &str) -> Result<()> {
        self.session_store.delete_by_token(token).await
    }

    pub async fn cleanup_expired_sessions(&self) -> Result<u64> {
        self.session_store.cleanup_expired().await
    }

    pub fn create_session_cookie(&self, token: &str) -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE, token.to_string()))
            .path("/")
            .same_site(SameSite::Lax)
            .http_only(true)
            .secure(self.config.secure_cookies)
            .max_age(cookie::time::Duration::hours(self.config.session_duration_hours))
            .build()
    }

    pub fn create_logout_cookie() -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE, ""))
            .path("/")
            .same_site(SameSite::Lax)
            .http_only(true)
            .max_age(cookie::time::Duration::seconds(0))
            .build()
    }
}

fn generate_token() -> String {
    use rand::RngCore;
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_token_is_random_hex() {
        let a = generate_token();
        let b = generate_token();
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }

    #[test]
    fn test_logout_cookie_expires_immediately() {
        let cookie = AuthService::create_logout_cookie();
        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(cookie::time::Duration::seconds(0)));
    }
}
