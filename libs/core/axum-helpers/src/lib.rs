//! # Axum Helpers
//!
//! Utilities shared by the HTTP services in this workspace.
//!
//! - **[`server`]**: Router assembly with OpenAPI docs, health checks, graceful shutdown
//! - **[`http`]**: CORS and security header middleware
//! - **[`errors`]**: Structured error responses with error codes
//! - **[`extractors`]**: Positive integer id path and validated JSON extractors
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::{create_permissive_cors_layer, create_production_app, create_router};
//! use core_config::server::ServerConfig;
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! #[tokio::main]
//! async fn main() -> std::io::Result<()> {
//!     let router = create_router::<ApiDoc>(Router::new(), create_permissive_cors_layer());
//!     let config = ServerConfig::default();
//!     create_production_app(router, &config, std::time::Duration::from_secs(30), async {}).await
//! }
//! ```

pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app, create_router,
    health_router, run_health_checks,
};

pub use http::{create_cors_layer, create_permissive_cors_layer, parse_origins, security_headers};

pub use errors::{AppError, ErrorCode, ErrorResponse};

pub use extractors::{IdPath, ValidatedJson};
