//! Development endpoint HTTP server

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::error::Result;

use super::routes;

/// Application state shared across handlers
pub struct AppState {
    pub config: Config,
}

pub type SharedState = Arc<AppState>;

/// Run the development authentication endpoint
pub async fn run_server(config: Config, host: &str, port: u16) -> Result<()> {
    let app = create_router(config);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Development endpoint listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the router with all routes
pub fn create_router(config: Config) -> Router {
    let state = Arc::new(AppState { config });

    Router::new()
        .route("/health", get(routes::health))
        .route("/authenticate", post(routes::authenticate))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
