//! wyr server entry point.

use std::{net::SocketAddr, sync::Arc, time::Duration};

use anyhow::Context;
use axum::{Router, http::StatusCode};
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wyr_api::{AppState, router as api_router};
use wyr_common::Config;
use wyr_core::{AdminGuard, PollLifecycleService, PollQueryService, VotingService};
use wyr_db::repositories::PollRepository;

/// Waits for a shutdown signal (SIGINT or SIGTERM).
///
/// On Unix systems, this listens for both SIGINT (Ctrl+C) and SIGTERM.
/// On Windows, this only listens for Ctrl+C.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received SIGINT, initiating graceful shutdown...");
        },
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wyr=debug,tower_http=debug".into()),
        )
        .init();

    info!("Starting wyr server...");

    // Fail closed: nothing is connected or bound until configuration holds.
    let config = match std::env::var("WYR_CONFIG") {
        Ok(path) => Config::from_file(&path)
            .with_context(|| format!("failed to load configuration from {path}"))?,
        Err(_) => Config::load().context("failed to load configuration")?,
    };
    config.validate()?;
    let admin_guard = AdminGuard::from_config(&config)?;
    info!("Configuration validated");

    let db = wyr_db::init(&config).await?;
    info!("Connected to database");

    info!("Running database migrations...");
    wyr_db::migrate(&db).await?;
    info!("Migrations completed");

    let poll_repo = PollRepository::new(Arc::new(db));
    let state = AppState {
        lifecycle_service: PollLifecycleService::new(poll_repo.clone()),
        voting_service: VotingService::new(poll_repo.clone()),
        query_service: PollQueryService::new(poll_repo),
        admin_guard,
    };

    let app = Router::new()
        .merge(api_router(&state))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.server.request_timeout_secs),
        ))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .with_context(|| format!("invalid listen address {}", config.server.host))?;
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
