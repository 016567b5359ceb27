//! axum routers for the catalog resources.
//!
//! Each resource router owns its service as state and is meant to be nested
//! under its own prefix (`/products`, `/categories`, `/users`).

pub mod categories;
pub mod products;
pub mod users;

pub use categories::router as categories_router;
pub use products::router as products_router;
pub use users::router as users_router;

pub const PRODUCTS_TAG: &str = "Products";
pub const CATEGORIES_TAG: &str = "Categories";
pub const USERS_TAG: &str = "Users";
