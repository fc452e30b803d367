//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors; request errors render through
//! `auth::AuthError`.

mod config;

use std::sync::Arc;

use auth::{
    AuthConfig, AuthStore, MemoryAuthRepository, PgAuthRepository, SweepExpiredUseCase,
    api_router, spawn_sweeper,
};
use axum::{
    Json, Router, http,
    http::{Method, header},
    routing::get,
};
use chrono::Utc;
use serde_json::{Value, json};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "accounts_api=info,auth=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;
    tracing::debug!(auth = ?config.auth, "Loaded configuration");

    match config.database_url.as_deref() {
        Some(database_url) => {
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(database_url)
                .await?;

            tracing::info!("Connected to database");

            // Run migrations
            sqlx::migrate!("../../../database/migrations")
                .run(&pool)
                .await?;

            tracing::info!("Migrations completed");

            serve(Arc::new(PgAuthRepository::new(pool)), config).await
        }
        None => {
            tracing::warn!("DATABASE_URL not set, accounts are kept in memory only");
            serve(Arc::new(MemoryAuthRepository::new()), config).await
        }
    }
}

async fn serve<R>(repo: Arc<R>, config: ServerConfig) -> anyhow::Result<()>
where
    R: AuthStore,
{
    let auth_config = Arc::new(config.auth);

    // Startup cleanup: remove expired sessions and revocations
    // Errors here should not prevent server startup
    match SweepExpiredUseCase::new(repo.clone(), auth_config.clone())
        .execute(Utc::now())
        .await
    {
        Ok(report) => {
            tracing::info!(
                sessions_deleted = report.sessions_deleted,
                revocations_deleted = report.revocations_deleted,
                "Auth cleanup completed"
            );
        }
        Err(e) => {
            tracing::warn!(
                error = %e,
                "Auth cleanup failed, continuing anyway"
            );
        }
    }

    let sweeper = spawn_sweeper(repo.clone(), auth_config.clone());

    let app = build_app(repo, auth_config, &config.frontend_origins);

    // Start server
    tracing::info!("Listening on {}", config.bind_addr);

    let listener = TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    sweeper.abort();
    tracing::info!("Server stopped");

    Ok(())
}

/// Full application router: `/health` plus the accounts API under `/api`
fn build_app<R>(repo: Arc<R>, auth_config: Arc<AuthConfig>, frontend_origins: &[String]) -> Router
where
    R: AuthStore,
{
    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    Router::new()
        .route("/health", get(health))
        .nest("/api", api_router(repo, auth_config))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// GET /health
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
