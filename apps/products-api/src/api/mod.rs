//! API routes module

pub mod health;

use axum::Router;
use domain_products::{ProductService, SqliteProductRepository, handlers};

use crate::state::AppState;

/// Create all API routes
pub fn routes(state: &AppState) -> Router {
    let repository = SqliteProductRepository::new(state.db.clone());
    let service = ProductService::new(repository);

    Router::new()
        .nest("/products", handlers::router(service))
        .merge(health::router(state.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Environment};
    use crate::openapi::ApiDoc;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use axum_helpers::{create_permissive_cors_layer, create_router};
    use core_config::{app_info, server::ServerConfig};
    use database::sqlite::SqliteConfig;
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use test_utils::TestDatabase;
    use tower::ServiceExt;

    async fn app() -> Router {
        let db = TestDatabase::new().await;
        let state = AppState {
            config: Config {
                app: app_info!(),
                database: SqliteConfig::in_memory(),
                server: ServerConfig::new("127.0.0.1".to_string(), 0),
                environment: Environment::Development,
                cors_allowed_origins: Vec::new(),
            },
            db: db.connection(),
        };
        create_router::<ApiDoc>(routes(&state), create_permissive_cors_layer())
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_root_reports_healthy() {
        let app = app().await;

        let (status, body) = send(&app, "GET", "/", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "message": "Healthy" }));
    }

    #[tokio::test]
    async fn test_ready_checks_database() {
        let app = app().await;

        let (status, body) = send(&app, "GET", "/ready", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ready");
        assert_eq!(body["database"], "connected");
    }

    #[tokio::test]
    async fn test_health_reports_app_info() {
        let app = app().await;

        let (status, body) = send(&app, "GET", "/health", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "products_api");
    }

    #[tokio::test]
    async fn test_product_lifecycle() {
        let app = app().await;

        let (status, created) = send(
            &app,
            "POST",
            "/products",
            Some(json!({ "name": "Widget", "price": 19.99, "quantity": 10 })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(
            created,
            json!({ "id": 1, "name": "Widget", "price": 19.99, "quantity": 10 })
        );

        let (status, balance) = send(&app, "GET", "/products/balance", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(balance, json!({ "total_balance": 199.9 }));

        let (status, updated) =
            send(&app, "PUT", "/products/1", Some(json!({ "price": 24.99 }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["price"], 24.99);
        assert_eq!(updated["quantity"], 10);

        let (status, _) = send(&app, "DELETE", "/products/1", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, body) = send(&app, "GET", "/products/1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "NOT_FOUND");

        let (_, balance) = send(&app, "GET", "/products/balance", None).await;
        assert_eq!(balance, json!({ "total_balance": 0.0 }));
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_404() {
        let app = app().await;

        let (status, body) = send(&app, "GET", "/orders", None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_openapi_lists_product_paths() {
        let app = app().await;

        let (status, doc) = send(&app, "GET", "/api-docs/openapi.json", None).await;

        assert_eq!(status, StatusCode::OK);
        assert!(doc["paths"]["/products/balance"].is_object());
        assert!(doc["paths"]["/products/{id}"].is_object());
        assert!(doc["paths"]["/"].is_object());
    }
}
