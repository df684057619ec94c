#![allow(dead_code)]

use std::sync::Arc;

use atrium::{
    api,
    config::{DatabaseConfig, Settings},
    db,
    integrations::IntegrationManager,
    seed,
    service::ServiceContext,
};
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

pub const ADMIN: &str = "john.smith@company.com";
pub const CEO: &str = "akiko.tanaka@company.com";
pub const MARKETING: &str = "maria.garcia@company.com";
pub const ENGINEER: &str = "kenji.sato@company.com";

pub fn test_settings() -> Settings {
    let mut settings = Settings::default();
    settings.database = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        seed_demo_data: false,
    };
    settings.ai.simulated_delay_ms = 0;
    settings
}

/// Fresh in-memory store with the demo data loaded.
pub async fn seeded_context() -> anyhow::Result<Arc<ServiceContext>> {
    let settings = test_settings();
    let pool = db::connect(&settings.database).await?;
    let ctx = Arc::new(ServiceContext::new(
        pool,
        Arc::new(IntegrationManager::new()),
        &settings,
    ));
    seed::seed_demo_data(&ctx).await?;
    Ok(ctx)
}

pub async fn test_app() -> anyhow::Result<(Router, Arc<ServiceContext>)> {
    let ctx = seeded_context().await?;
    let app = api::create_app(ctx.clone(), Arc::new(test_settings()));
    Ok((app, ctx))
}

/// Sign in through the mock login and return the `session=...` pair.
pub async fn login(app: &Router, email: &str) -> anyhow::Result<String> {
    let body = serde_json::json!({ "email": email }).to_string();
    let response = app
        .clone()
        .oneshot(
            Request::post("/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .ok_or_else(|| anyhow::anyhow!("login did not set a cookie"))?
        .to_str()?;

    Ok(set_cookie.split(';').next().unwrap_or_default().to_string())
}

/// Send a request and decode the JSON body. Empty bodies decode to `Null`.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    cookie: Option<&str>,
    body: Option<Value>,
) -> anyhow::Result<(StatusCode, Value)> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))?,
        None => builder.body(Body::empty())?,
    };

    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };

    Ok((status, json))
}
