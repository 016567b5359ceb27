use axum::{
    Json, Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{JsonBody, QueryParams};
use axum_helpers::errors::responses::{
    BadRequestResponse, InternalServerErrorResponse, NotFoundResponse, ValidationErrorResponse,
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::{IntoParams, OpenApi};

use super::PRODUCTS_TAG;
use crate::error::CatalogResult;
use crate::models::{ProductCategoryDto, ProductDto, ProductWriteDto};
use crate::pagination::{Page, PageParams};
use crate::repository::{CategoryRepository, ProductRepository};
use crate::service::ProductService;

/// OpenAPI documentation for the products resource
#[derive(OpenApi)]
#[openapi(
    paths(list_products, get_product, create_product, update_product, delete_product),
    components(
        schemas(ProductDto, ProductCategoryDto, ProductWriteDto),
        responses(
            NotFoundResponse,
            ValidationErrorResponse,
            BadRequestResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = PRODUCTS_TAG, description = "Product catalog endpoints")
    )
)]
pub struct ApiDoc;

type SharedService<P, C> = State<Arc<ProductService<P, C>>>;

/// Create the products router
pub fn router<P, C>(service: ProductService<P, C>) -> Router
where
    P: ProductRepository + 'static,
    C: CategoryRepository + 'static,
{
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .with_state(Arc::new(service))
}

/// Listing filters plus paging parameters
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductQuery {
    /// Only products in this category; 0 means any
    #[serde(default)]
    pub category_id: i64,
    /// Case-insensitive name substring; empty means any
    #[serde(default)]
    pub name: String,
    /// Zero-based page number (default 0)
    pub page: Option<u64>,
    /// Page size (default from configuration)
    pub size: Option<u64>,
    /// Sort keys as `field` or `field,asc|desc`: id, name, price, date
    #[serde(default)]
    pub sort: Vec<String>,
}

impl ProductQuery {
    fn split(self) -> (PageParams, Option<i64>, Option<String>) {
        let params = PageParams {
            page: self.page,
            size: self.size,
            sort: self.sort,
        };
        (params, Some(self.category_id), Some(self.name))
    }
}

/// List products, optionally filtered by category and name
#[utoipa::path(
    get,
    path = "",
    tag = PRODUCTS_TAG,
    params(ProductQuery),
    responses(
        (status = 200, description = "One page of products", body = Page<ProductDto>),
        (status = 422, response = ValidationErrorResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<P: ProductRepository, C: CategoryRepository>(
    State(service): SharedService<P, C>,
    QueryParams(query): QueryParams<ProductQuery>,
) -> CatalogResult<Json<Page<ProductDto>>> {
    let (params, category_id, name) = query.split();
    let page = params.into_request(service.limits())?;
    let products = service.find_page(page, category_id, name).await?;
    Ok(Json(products))
}

/// Get a product by id
#[utoipa::path(
    get,
    path = "/{id}",
    tag = PRODUCTS_TAG,
    params(("id" = i64, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product found", body = ProductDto),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<P: ProductRepository, C: CategoryRepository>(
    State(service): SharedService<P, C>,
    Path(id): Path<i64>,
) -> CatalogResult<Json<ProductDto>> {
    let product = service.find_by_id(id).await?;
    Ok(Json(product))
}

/// Create a product
#[utoipa::path(
    post,
    path = "",
    tag = PRODUCTS_TAG,
    request_body = ProductWriteDto,
    responses(
        (status = 201, description = "Product created", body = ProductDto),
        (status = 404, response = NotFoundResponse),
        (status = 422, response = ValidationErrorResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<P: ProductRepository, C: CategoryRepository>(
    State(service): SharedService<P, C>,
    JsonBody(input): JsonBody<ProductWriteDto>,
) -> CatalogResult<impl IntoResponse> {
    let product = service.insert(input).await?;
    let location = format!("/products/{}", product.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(product),
    ))
}

/// Replace a product
#[utoipa::path(
    put,
    path = "/{id}",
    tag = PRODUCTS_TAG,
    params(("id" = i64, Path, description = "Product id")),
    request_body = ProductWriteDto,
    responses(
        (status = 200, description = "Product updated", body = ProductDto),
        (status = 404, response = NotFoundResponse),
        (status = 422, response = ValidationErrorResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<P: ProductRepository, C: CategoryRepository>(
    State(service): SharedService<P, C>,
    Path(id): Path<i64>,
    JsonBody(input): JsonBody<ProductWriteDto>,
) -> CatalogResult<Json<ProductDto>> {
    let product = service.update(id, input).await?;
    Ok(Json(product))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = PRODUCTS_TAG,
    params(("id" = i64, Path, description = "Product id")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<P: ProductRepository, C: CategoryRepository>(
    State(service): SharedService<P, C>,
    Path(id): Path<i64>,
) -> CatalogResult<StatusCode> {
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
