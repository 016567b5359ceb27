use axum::{
    Json, Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{JsonBody, QueryParams};
use axum_helpers::errors::responses::{
    InternalServerErrorResponse, NotFoundResponse, ValidationErrorResponse,
};
use std::sync::Arc;
use utoipa::OpenApi;

use super::USERS_TAG;
use crate::error::CatalogResult;
use crate::models::{Role, UserDto, UserWriteDto};
use crate::pagination::{Page, PageParams};
use crate::repository::UserRepository;
use crate::service::UserService;

#[derive(OpenApi)]
#[openapi(
    paths(list_users, get_user, create_user, update_user, delete_user),
    components(
        schemas(UserDto, UserWriteDto, Role),
        responses(NotFoundResponse, ValidationErrorResponse, InternalServerErrorResponse)
    ),
    tags(
        (name = USERS_TAG, description = "User account endpoints")
    )
)]
pub struct ApiDoc;

pub fn router<U: UserRepository + 'static>(service: UserService<U>) -> Router {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/{id}", get(get_user).put(update_user).delete(delete_user))
        .with_state(Arc::new(service))
}

/// List users
#[utoipa::path(
    get,
    path = "",
    tag = USERS_TAG,
    params(PageParams),
    responses(
        (status = 200, description = "One page of users", body = Page<UserDto>),
        (status = 422, response = ValidationErrorResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_users<U: UserRepository>(
    State(service): State<Arc<UserService<U>>>,
    QueryParams(params): QueryParams<PageParams>,
) -> CatalogResult<Json<Page<UserDto>>> {
    let page = params.into_request(service.limits())?;
    Ok(Json(service.find_page(page).await?))
}

/// Get a user by id
#[utoipa::path(
    get,
    path = "/{id}",
    tag = USERS_TAG,
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User found", body = UserDto),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_user<U: UserRepository>(
    State(service): State<Arc<UserService<U>>>,
    Path(id): Path<i64>,
) -> CatalogResult<Json<UserDto>> {
    Ok(Json(service.find_by_id(id).await?))
}

/// Register a user; `password` is required
#[utoipa::path(
    post,
    path = "",
    tag = USERS_TAG,
    request_body = UserWriteDto,
    responses(
        (status = 201, description = "User created", body = UserDto),
        (status = 422, response = ValidationErrorResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_user<U: UserRepository>(
    State(service): State<Arc<UserService<U>>>,
    JsonBody(input): JsonBody<UserWriteDto>,
) -> CatalogResult<impl IntoResponse> {
    let user = service.insert(input).await?;
    let location = format!("/users/{}", user.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(user)))
}

/// Replace a user; omit `password` to keep the current one
#[utoipa::path(
    put,
    path = "/{id}",
    tag = USERS_TAG,
    params(("id" = i64, Path, description = "User id")),
    request_body = UserWriteDto,
    responses(
        (status = 200, description = "User updated", body = UserDto),
        (status = 404, response = NotFoundResponse),
        (status = 422, response = ValidationErrorResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_user<U: UserRepository>(
    State(service): State<Arc<UserService<U>>>,
    Path(id): Path<i64>,
    JsonBody(input): JsonBody<UserWriteDto>,
) -> CatalogResult<Json<UserDto>> {
    Ok(Json(service.update(id, input).await?))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = USERS_TAG,
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_user<U: UserRepository>(
    State(service): State<Arc<UserService<U>>>,
    Path(id): Path<i64>,
) -> CatalogResult<StatusCode> {
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
