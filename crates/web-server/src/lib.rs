//! # Superstore Web Server
//!
//! Exposes the dashboard's charts and control dispatch table over HTTP and a
//! WebSocket, so any browser front end can render the figures.

use axum::{routing::{get, post}, Router};
use dashboard::DashboardContext;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer, ExposeHeaders},
    trace::TraceLayer,
};

pub mod error;
pub mod handlers;
pub mod messages;

pub use error::AppError;
pub use messages::{ClientMessage, ControlChange, ServerMessage};

/// The shared application state that all handlers can access.
pub struct AppState {
    pub dashboard: Arc<DashboardContext>,
}

/// Builds the router with every route and middleware, without binding a socket.
pub fn build_router(dashboard: Arc<DashboardContext>) -> Router {
    let app_state = Arc::new(AppState { dashboard });
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any())
        .expose_headers(ExposeHeaders::any());

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/layout", get(handlers::get_layout))
        .route("/api/years", get(handlers::get_years))
        .route("/api/controls/:control", post(handlers::post_control))
        .route("/api/charts/world-map", get(handlers::get_world_map))
        .route("/api/charts/top-products", get(handlers::get_top_products))
        .route("/api/charts/category", get(handlers::get_category_pie))
        .route("/api/charts/sub-category", get(handlers::get_sub_category_pie))
        .route("/ws", get(handlers::websocket_handler))
        .with_state(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Binds the listener, resolving `host` first so names like `localhost` work.
pub async fn bind(host: &str, port: u16) -> std::io::Result<TcpListener> {
    TcpListener::bind((host, port)).await
}

/// Serves the dashboard until the process is stopped.
pub async fn run_server(host: &str, port: u16, dashboard: Arc<DashboardContext>) -> anyhow::Result<()> {
    let app = build_router(dashboard);

    let listener = bind(host, port).await?;
    tracing::info!("Web server listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
