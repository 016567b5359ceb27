//! Custom extractors for Axum handlers.
//!
//! Both turn their rejections into [`AppError`](crate::AppError), so a bad
//! body or query string answers with the shared `ErrorResponse` shape.

pub mod json;
pub mod query;

pub use json::JsonBody;
pub use query::QueryParams;
