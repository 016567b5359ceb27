use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use axum_helpers::QueryParams;
use axum_helpers::errors::responses::{
    InternalServerErrorResponse, NotFoundResponse, ValidationErrorResponse,
};
use std::sync::Arc;
use utoipa::OpenApi;

use super::CATEGORIES_TAG;
use crate::error::CatalogResult;
use crate::models::CategoryDto;
use crate::pagination::{Page, PageParams};
use crate::repository::CategoryRepository;
use crate::service::CategoryService;

#[derive(OpenApi)]
#[openapi(
    paths(list_categories, get_category),
    components(
        schemas(CategoryDto),
        responses(NotFoundResponse, ValidationErrorResponse, InternalServerErrorResponse)
    ),
    tags(
        (name = CATEGORIES_TAG, description = "Read-only category endpoints")
    )
)]
pub struct ApiDoc;

pub fn router<C: CategoryRepository + 'static>(service: CategoryService<C>) -> Router {
    Router::new()
        .route("/", get(list_categories))
        .route("/{id}", get(get_category))
        .with_state(Arc::new(service))
}

/// List categories
#[utoipa::path(
    get,
    path = "",
    tag = CATEGORIES_TAG,
    params(PageParams),
    responses(
        (status = 200, description = "One page of categories", body = Page<CategoryDto>),
        (status = 422, response = ValidationErrorResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_categories<C: CategoryRepository>(
    State(service): State<Arc<CategoryService<C>>>,
    QueryParams(params): QueryParams<PageParams>,
) -> CatalogResult<Json<Page<CategoryDto>>> {
    let page = params.into_request(service.limits())?;
    Ok(Json(service.find_page(page).await?))
}

/// Get a category by id
#[utoipa::path(
    get,
    path = "/{id}",
    tag = CATEGORIES_TAG,
    params(("id" = i64, Path, description = "Category id")),
    responses(
        (status = 200, description = "Category found", body = CategoryDto),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_category<C: CategoryRepository>(
    State(service): State<Arc<CategoryService<C>>>,
    Path(id): Path<i64>,
) -> CatalogResult<Json<CategoryDto>> {
    Ok(Json(service.find_by_id(id).await?))
}
