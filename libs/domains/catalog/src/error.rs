use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use sea_orm::DbErr;
use strum::Display;
use thiserror::Error;

use crate::validation::FieldErrors;

/// Entity kind named in a not-found failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Resource {
    Product,
    Category,
    User,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{resource} {id} not found")]
    NotFound { resource: Resource, id: i64 },

    #[error("Validation failed: {0}")]
    ValidationFailed(FieldErrors),

    #[error("{0}")]
    Conflict(String),

    #[error("Store unavailable: {0}")]
    Store(String),

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

impl CatalogError {
    pub fn product_not_found(id: i64) -> Self {
        Self::NotFound {
            resource: Resource::Product,
            id,
        }
    }

    pub fn category_not_found(id: i64) -> Self {
        Self::NotFound {
            resource: Resource::Category,
            id,
        }
    }

    pub fn user_not_found(id: i64) -> Self {
        Self::NotFound {
            resource: Resource::User,
            id,
        }
    }

    /// Single-field validation failure
    pub fn invalid(field: &str, message: impl Into<String>) -> Self {
        let mut errors = FieldErrors::new();
        errors.add(field, message);
        Self::ValidationFailed(errors)
    }

    pub fn referenced(resource: Resource, id: i64) -> Self {
        Self::Conflict(format!("{} {} is referenced by other records", resource, id))
    }
}

impl From<DbErr> for CatalogError {
    fn from(err: DbErr) -> Self {
        tracing::error!(error = %err, "Database error");
        CatalogError::Store(err.to_string())
    }
}

/// Convert CatalogError to AppError for standardized error responses
impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound { .. } => AppError::NotFound(err.to_string()),
            CatalogError::ValidationFailed(errors) => AppError::Validation {
                message: "Request validation failed".to_string(),
                details: errors.to_json(),
            },
            CatalogError::Conflict(msg) => AppError::Conflict(msg),
            CatalogError::Store(msg) | CatalogError::PasswordHash(msg) => {
                AppError::InternalServerError(msg)
            }
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
