pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod state;

use axum::{
    Router,
    routing::{get, patch, post},
};
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    trace::TraceLayer,
};
use std::sync::Arc;

use crate::{
    config::Settings,
    service::ServiceContext,
};
use state::AppState;

pub fn create_app(service_context: Arc<ServiceContext>, settings: Arc<Settings>) -> Router {
    let app_state = AppState::new(service_context, settings);

    Router::new()
        // Root and health endpoints
        .route("/", get(handlers::root::root))
        .route("/health", get(handlers::root::health_check))

        // Mock sign-in
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/logout", post(handlers::auth::logout))

        .merge(portal_routes(app_state.clone()))
        .nest("/admin", admin_routes(app_state.clone()))

        .with_state(app_state)

        // Middleware
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Everything a signed-in employee can reach. Role checks beyond that live
/// in the services.
fn portal_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/auth/me", get(handlers::auth::me))
        .route("/profile", patch(handlers::profile::update_profile))
        .route("/profile/preferences", patch(handlers::profile::update_preferences))

        .route(
            "/announcements",
            get(handlers::announcements::list).post(handlers::announcements::create),
        )
        .route(
            "/announcements/:id",
            get(handlers::announcements::get)
                .patch(handlers::announcements::update)
                .delete(handlers::announcements::delete),
        )
        .route("/announcements/:id/approve", post(handlers::announcements::approve))
        .route("/announcements/:id/reject", post(handlers::announcements::reject))

        .route("/events", get(handlers::events::list).post(handlers::events::create))
        .route(
            "/events/:id",
            get(handlers::events::get)
                .patch(handlers::events::update)
                .delete(handlers::events::delete),
        )

        .route("/notifications", get(handlers::notifications::list))
        .route("/notifications/read-all", post(handlers::notifications::mark_all_read))
        .route("/notifications/send", post(handlers::notifications::send))
        .route("/notifications/:id", axum::routing::delete(handlers::notifications::delete))
        .route("/notifications/:id/read", post(handlers::notifications::mark_read))

        .route(
            "/documents",
            get(handlers::documents::list).post(handlers::documents::create),
        )
        .route(
            "/documents/:id",
            get(handlers::documents::get).delete(handlers::documents::delete),
        )

        .route("/tickets", get(handlers::tickets::list).post(handlers::tickets::create))
        .route("/tickets/:id", get(handlers::tickets::get))
        .route("/tickets/:id/responses", post(handlers::tickets::respond))
        .route("/tickets/:id/status", patch(handlers::tickets::update_status))

        .route("/teams", get(handlers::teams::list_teams))
        .route(
            "/graph/teams",
            get(handlers::teams::list_messages).post(handlers::teams::post_message),
        )

        .route("/chatbot", post(handlers::assistant::chatbot))
        .route("/ai/generate", post(handlers::assistant::generate))
        .route("/ai/prioritize", post(handlers::assistant::prioritize))

        .route("/search", get(handlers::search::search))
        .route("/departments", get(handlers::search::departments))

        .route_layer(axum::middleware::from_fn_with_state(
            state,
            middleware::auth::require_auth,
        ))
}

fn admin_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/stats", get(handlers::admin::stats))
        .route("/announcements", get(handlers::admin::announcements))
        .route("/events/send-reminders", post(handlers::admin::send_reminders))
        .route_layer(axum::middleware::from_fn_with_state(
            state,
            middleware::auth::require_moderator,
        ))
}
