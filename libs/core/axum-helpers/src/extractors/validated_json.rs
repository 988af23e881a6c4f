//! JSON extractor with automatic validation using the validator crate.

use crate::errors::AppError;
use axum::extract::{FromRequest, Json, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON extractor with automatic validation.
///
/// Body type errors (wrong field types, missing required fields) and failed
/// `Validate` rules both answer 422 with `VALIDATION_ERROR`; malformed JSON
/// answers 400 and a wrong content type 415.
///
/// # Example
/// ```ignore
/// use axum_helpers::extractors::ValidatedJson;
/// use serde::Deserialize;
/// use validator::Validate;
///
/// #[derive(Deserialize, Validate)]
/// struct CreateProduct {
///     #[validate(length(min = 1, max = 255))]
///     name: String,
/// }
///
/// async fn create(ValidatedJson(payload): ValidatedJson<CreateProduct>) -> String {
///     payload.name
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state).await?;
        data.validate()?;
        Ok(ValidatedJson(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorResponse;
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode, header},
        routing::post,
    };
    use http_body_util::BodyExt;
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize, Validate)]
    struct Payload {
        #[validate(length(min = 1))]
        name: String,
        #[validate(range(min = 0))]
        count: Option<i64>,
    }

    async fn post_json(body: &str) -> (StatusCode, Option<ErrorResponse>) {
        let app = Router::new().route(
            "/",
            post(|ValidatedJson(p): ValidatedJson<Payload>| async move {
                format!("{}:{:?}", p.name, p.count)
            }),
        );
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).ok())
    }

    #[tokio::test]
    async fn test_valid_body_passes() {
        let (status, _) = post_json(r#"{"name":"a","count":2}"#).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_rule_violation_is_422_with_details() {
        let (status, body) = post_json(r#"{"name":"","count":-1}"#).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let body = body.unwrap();
        assert_eq!(body.error, "VALIDATION_ERROR");
        let details = body.details.unwrap();
        assert!(details.get("name").is_some());
        assert!(details.get("count").is_some());
    }

    #[tokio::test]
    async fn test_type_mismatch_is_422() {
        let (status, body) = post_json(r#"{"name":"a","count":"many"}"#).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body.unwrap().error, "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_malformed_json_is_400() {
        let (status, _) = post_json(r#"{"name":"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
