use axum::Router;
use axum_helpers::{create_router, health_router};
use core_config::catalog::CatalogConfig;
use domain_catalog::handlers::{categories_router, products_router, users_router};
use domain_catalog::{
    CategoryRepository, CategoryService, ProductRepository, ProductService, UserRepository,
    UserService,
};
use std::sync::Arc;

use crate::openapi::ApiDoc;

/// Resource routers nested under their prefixes, all backed by one store.
pub fn routes<S>(store: Arc<S>, config: &CatalogConfig) -> Router
where
    S: ProductRepository + CategoryRepository + UserRepository + 'static,
{
    let products = ProductService::new(store.clone(), store.clone(), config);
    let categories = CategoryService::new(store.clone(), config);
    let users = UserService::new(store, config);

    Router::new()
        .nest("/products", products_router(products))
        .nest("/categories", categories_router(categories))
        .nest("/users", users_router(users))
}

/// Full application: resource routes, docs, middleware and `/health`.
pub fn build<S>(store: Arc<S>, config: &CatalogConfig) -> Router
where
    S: ProductRepository + CategoryRepository + UserRepository + 'static,
{
    create_router::<ApiDoc>(routes(store, config), config.request_timeout).merge(health_router(
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use domain_catalog::InMemoryCatalogStore;
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    fn app() -> Router {
        let store = Arc::new(InMemoryCatalogStore::seeded().unwrap());
        build(store, &CatalogConfig::default())
    }

    async fn get(uri: &str) -> (StatusCode, Value) {
        let response = app()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get("/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "catalog_api");
    }

    #[tokio::test]
    async fn test_resources_are_nested() {
        let (status, body) = get("/products?size=5&sort=price,desc").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["content"].as_array().unwrap().len(), 5);
        assert_eq!(body["total_elements"], 25);

        let (status, body) = get("/categories").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_elements"], 3);

        let (status, body) = get("/users/2").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["email"], "maria@gmail.com");
    }

    #[tokio::test]
    async fn test_openapi_lists_every_resource() {
        let (status, body) = get("/api-docs/openapi.json").await;
        assert_eq!(status, StatusCode::OK);
        for path in ["/products", "/products/{id}", "/categories", "/users/{id}"] {
            assert!(body["paths"][path].is_object(), "missing {path}");
        }
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let (status, body) = get("/orders").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "NOT_FOUND");
    }
}
