use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use atrium::{
    api,
    config::Settings,
    db,
    integrations::{IntegrationManager, teams::TeamsIntegration},
    seed,
    service::ServiceContext,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "atrium=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let settings = Settings::new().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config: {}. Using defaults.", e);
        Settings::default()
    });

    tracing::info!("Starting Atrium server on {}:{}", settings.server.host, settings.server.port);

    if settings.database.is_in_memory() {
        tracing::info!("Using in-memory store; data is discarded on restart");
    }

    // Initialize database and run migrations
    let db_pool = db::connect(&settings.database).await?;

    // Initialize integration manager
    let integration_manager = Arc::new(IntegrationManager::new());

    if let Some(teams) = TeamsIntegration::new(settings.integrations.teams.clone()) {
        integration_manager.register(Arc::new(teams)).await;
    }

    // Check integration health
    let health_results = integration_manager.health_check_all().await;
    for (name, result) in health_results {
        match result {
            Ok(_) => tracing::info!("Integration {} is healthy", name),
            Err(e) => tracing::warn!("Integration {} health check failed: {:?}", name, e),
        }
    }

    let service_context = Arc::new(ServiceContext::new(
        db_pool.clone(),
        integration_manager,
        &settings,
    ));

    if settings.database.seed_demo_data {
        let summary = seed::seed_demo_data(&service_context).await?;
        tracing::debug!("Demo data: {:?}", summary);
    }

    let expired = service_context.auth_service.cleanup_expired_sessions().await?;
    if expired > 0 {
        tracing::info!("Removed {} expired sessions", expired);
    }

    let app = api::create_app(service_context, Arc::new(settings.clone()));

    let listener = tokio::net::TcpListener::bind(
        format!("{}:{}", settings.server.host, settings.server.port)
    ).await?;

    tracing::info!("Server listening on http://{}:{}", settings.server.host, settings.server.port);

    axum::serve(listener, app).await?;

    Ok(())
}
