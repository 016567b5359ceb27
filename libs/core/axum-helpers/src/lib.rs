//! # Axum Helpers
//!
//! Shared HTTP plumbing for the catalog services.
//!
//! ## Modules
//!
//! - **[`errors`]**: Structured error responses with error codes
//! - **[`extractors`]**: JSON body and query extractors that reject with [`AppError`]
//! - **[`server`]**: Router assembly, liveness endpoint and graceful shutdown
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum_helpers::{health_router, shutdown_signal};
//!
//! let app = api_routes.merge(health_router("catalog_api", env!("CARGO_PKG_VERSION")));
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//! axum::serve(listener, app)
//!     .with_graceful_shutdown(shutdown_signal())
//!     .await?;
//! ```

pub mod errors;
pub mod extractors;
pub mod server;

// Re-export server types
pub use server::{HealthResponse, create_router, health_router, serve, shutdown_signal};

// Re-export error types
pub use errors::{AppError, ErrorCode, ErrorResponse};

// Re-export extractors
pub use extractors::{JsonBody, QueryParams};
