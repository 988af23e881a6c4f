use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use axum_helpers::{HealthCheckFuture, health_router, run_health_checks};
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::state::AppState;

#[derive(Serialize, ToSchema)]
pub struct RootResponse {
    pub message: &'static str,
}

/// Liveness greeting
#[utoipa::path(
    get,
    path = "/",
    tag = "health",
    responses((status = 200, description = "Service is up", body = RootResponse))
)]
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse { message: "Healthy" })
}

/// Readiness: the database answers a trivial query
#[utoipa::path(
    get,
    path = "/ready",
    tag = "health",
    responses(
        (status = 200, description = "Database reachable"),
        (status = 503, description = "Database unreachable")
    )
)]
pub async fn ready(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    let checks: Vec<(&str, HealthCheckFuture)> = vec![(
        "database",
        Box::pin(async {
            database::sqlite::check_health(&state.db)
                .await
                .map_err(|e| e.to_string())
        }),
    )];

    run_health_checks(checks).await
}

pub fn router(state: AppState) -> Router {
    let app_info = state.config.app;

    Router::new()
        .route("/", get(root))
        .route("/ready", get(ready))
        .with_state(state)
        .merge(health_router(app_info))
}
