use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    info(
        title = "Catalog API",
        version = "0.1.0",
        description = "Product catalog with categories and the user accounts that manage it"
    ),
    nest(
        (path = "/products", api = domain_catalog::handlers::products::ApiDoc),
        (path = "/categories", api = domain_catalog::handlers::categories::ApiDoc),
        (path = "/users", api = domain_catalog::handlers::users::ApiDoc)
    )
)]
pub struct ApiDoc;
