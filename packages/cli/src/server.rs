// ABOUTME: HTTP server bootstrap for the TaskFlow API
// ABOUTME: Opens the database, layers CORS and request tracing, and serves the router

use std::net::SocketAddr;

use axum::http::{HeaderValue, Method};
use axum::Router;
use taskflow_storage::DbState;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::{Config, ConfigError};

/// API router with CORS and tracing layers applied
pub fn build_app(db: DbState, config: &Config) -> Result<Router, ConfigError> {
    let origin = config
        .cors_origin
        .parse::<HeaderValue>()
        .map_err(|_| ConfigError::InvalidCorsOrigin(config.cors_origin.clone()))?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    Ok(taskflow_api::create_router(db)
        .layer(cors)
        .layer(TraceLayer::new_for_http()))
}

pub async fn run_server(config: Config) -> anyhow::Result<()> {
    let db = DbState::init_with_path(config.database_path.clone()).await?;
    let app = build_app(db, &config)?;

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    info!("TaskFlow API listening on http://{}/api", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
