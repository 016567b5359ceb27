//! Catalog Domain
//!
//! Products, their categories, and the user accounts that manage them.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← axum routers per resource
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← paging, validation, association resolution
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← traits + in-memory and PostgreSQL stores
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← entities, write/read shapes, mapper
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use core_config::catalog::CatalogConfig;
//! use domain_catalog::{handlers, InMemoryCatalogStore, ProductService};
//!
//! let store = Arc::new(InMemoryCatalogStore::seeded().unwrap());
//! let service = ProductService::new(store.clone(), store, &CatalogConfig::default());
//!
//! let router = axum::Router::new().nest("/products", handlers::products_router(service));
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod mapper;
pub mod models;
pub mod pagination;
pub mod password;
pub mod postgres;
pub mod repository;
pub mod seed;
pub mod service;
pub mod validation;

// Re-export commonly used types
pub use error::{CatalogError, CatalogResult, Resource};
pub use models::{
    Category, CategoryDto, CategorySortField, Product, ProductCategoryDto, ProductDto,
    ProductSortField, ProductWriteDto, Role, User, UserDto, UserSortField, UserWriteDto,
};
pub use pagination::{Direction, Page, PageLimits, PageParams, PageRequest};
pub use postgres::PgCatalogStore;
pub use repository::{
    CategoryRepository, DeleteOutcome, InMemoryCatalogStore, ProductRepository, UserRepository,
};
pub use service::{CategoryService, ProductService, UserService};
pub use validation::{FieldErrors, Operation};
