use axum::http::{HeaderValue, Method, header, header::InvalidHeaderValue};
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Creates a CORS layer restricted to the given origins.
///
/// Allows GET, POST, PUT, DELETE and OPTIONS with `Content-Type` and `Accept`
/// headers, cached by browsers for one hour.
pub fn create_cors_layer(allowed_origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(3600))
}

/// Creates a permissive CORS layer that allows any origin.
pub fn create_permissive_cors_layer() -> CorsLayer {
    CorsLayer::permissive()
}

/// Parse a comma-separated origin list such as
/// `"http://localhost:3000, https://shop.example.com"`. Blank entries are skipped.
pub fn parse_origins(raw: &str) -> Result<Vec<HeaderValue>, InvalidHeaderValue> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(HeaderValue::from_str)
        .collect()
}
