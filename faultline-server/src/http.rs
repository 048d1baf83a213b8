//! Demo host wiring.
//!
//! Faultline is a middleware, not an application; this module stands up the
//! smallest host it can be observed in: a router with a `/health` endpoint
//! and the dashboard middleware layered over everything.

use std::sync::Arc;

use anyhow::Result;
use axum::http::StatusCode;
use axum::middleware::from_fn_with_state;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use faultline_core::config::HttpConfig;
use tokio::net::TcpListener;
use tokio::sync::broadcast;

use crate::dashboard::{dashboard_middleware, DashboardState};

/// Build the demo host router with the dashboard middleware applied.
pub fn build_router(state: Arc<DashboardState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .layer(from_fn_with_state(state, dashboard_middleware))
}

/// Start the HTTP server on the configured address.
/// Gracefully shuts down when the broadcast shutdown signal fires.
pub async fn start_http_server(
    http: &HttpConfig,
    state: Arc<DashboardState>,
    mut shutdown: broadcast::Receiver<()>,
) -> Result<()> {
    let addr = format!("{}:{}", http.host, http.port);
    let dashboard_route = state.route.clone();

    let app = build_router(state);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(
        "Faultline listening on http://{} (dashboard at {})",
        addr,
        dashboard_route
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown.recv().await;
            tracing::info!("HTTP server shutting down...");
        })
        .await?;

    Ok(())
}

pub async fn health_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "status": "healthy",
            "version": env!("CARGO_PKG_VERSION"),
        })),
    )
}
