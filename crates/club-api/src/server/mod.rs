//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use club_common::{AppConfig, AppError, IdentityClient, TokenVerifier};
use club_core::SnowflakeGenerator;
use club_db::{
    create_pool, PgApplicationRepository, PgBlogRepository, PgBugRepository, PgEventRepository,
    PgMemberRepository, PgUserRepository,
};
use club_service::ServiceContextBuilder;
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::apply_middleware;
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
///
/// Health routes are merged outside the rate limiter so probes never get
/// throttled.
pub fn create_app(state: AppState) -> Router {
    let config = state.config().clone();
    let router = apply_middleware(
        create_router(),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    );
    router.merge(health_routes()).with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    // Create database pool
    info!("Connecting to PostgreSQL...");
    let db_config = club_db::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        min_connections: config.database.min_connections,
        ..Default::default()
    };
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    // Token verifier for identity-provider tokens; a missing secret
    // leaves the server up with authenticated routes rejecting 401
    let token_verifier = Arc::new(TokenVerifier::from_secret(config.identity.secret.as_deref()));

    // Profile API client, optional
    let identity_client = Arc::new(IdentityClient::new(
        config.identity.api_url.clone(),
        config.identity.api_key.clone(),
    )?);

    // Create Snowflake generator
    let snowflake_generator = Arc::new(SnowflakeGenerator::new(config.snowflake.worker_id));

    // Create repositories
    let user_repo = Arc::new(PgUserRepository::new(pool.clone()));
    let member_repo = Arc::new(PgMemberRepository::new(pool.clone()));
    let application_repo = Arc::new(PgApplicationRepository::new(pool.clone()));
    let blog_repo = Arc::new(PgBlogRepository::new(pool.clone()));
    let bug_repo = Arc::new(PgBugRepository::new(pool.clone()));
    let event_repo = Arc::new(PgEventRepository::new(pool.clone()));

    // Build service context
    let service_context = ServiceContextBuilder::new()
        .pool(pool)
        .user_repo(user_repo)
        .member_repo(member_repo)
        .application_repo(application_repo)
        .blog_repo(blog_repo)
        .bug_repo(bug_repo)
        .event_repo(event_repo)
        .token_verifier(token_verifier)
        .identity_client(identity_client)
        .membership(config.membership.clone())
        .snowflake_generator(snowflake_generator)
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("Shutdown signal received");
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr: SocketAddr = config
        .api
        .address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid listen address: {e}")))?;

    let state = create_app_state(config).await?;
    let app = create_app(state);
    run_server(app, addr).await
}
