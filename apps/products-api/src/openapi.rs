use utoipa::OpenApi;

use crate::api::health;

/// Root OpenAPI document; the products domain is mounted under `/products`.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Products API",
        version = "0.1.0",
        description = "CRUD over products stored in SQLite, plus an inventory balance"
    ),
    paths(health::root, health::ready),
    nest(
        (path = "/products", api = domain_products::ApiDoc)
    ),
    tags(
        (name = "health", description = "Liveness and readiness checks")
    )
)]
pub struct ApiDoc;
