//! Server infrastructure module.
//!
//! - Router assembly with docs, tracing and request timeout
//! - Liveness endpoint
//! - Graceful shutdown signal

pub mod app;
pub mod health;
pub mod shutdown;

pub use app::{create_router, serve};
pub use health::{HealthResponse, health_router};
pub use shutdown::shutdown_signal;
