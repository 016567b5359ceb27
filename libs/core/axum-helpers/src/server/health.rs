use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::get};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub name: &'static str,
    pub version: &'static str,
}

async fn health_handler(State(info): State<HealthResponse>) -> impl IntoResponse {
    (StatusCode::OK, Json(info))
}

/// Creates a router with the /health endpoint.
///
/// The handler always answers 200 while the process is serving requests.
///
/// # Example
/// ```ignore
/// let app = Router::new()
///     .merge(health_router(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")));
/// ```
pub fn health_router(name: &'static str, version: &'static str) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(HealthResponse {
            status: "healthy",
            name,
            version,
        })
}
