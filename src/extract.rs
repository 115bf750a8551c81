use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use tracing::debug;

use crate::error::ApiError;

/// `Json<T>` whose rejections render as a 400 `{"message"}` body.
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        debug!(status = %rejection.status(), "request body rejected");
        ApiError::Validation(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::StatusCode};
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Payload {
        #[allow(dead_code)]
        name: String,
    }

    async fn extract(body: &str, content_type: Option<&str>) -> Result<ApiJson<Payload>, ApiError> {
        let mut builder = axum::http::Request::builder().method("POST").uri("/");
        if let Some(ct) = content_type {
            builder = builder.header("content-type", ct);
        }
        let req = builder.body(Body::from(body.to_owned())).unwrap();
        ApiJson::<Payload>::from_request(req, &()).await
    }

    #[tokio::test]
    async fn well_formed_body_passes() {
        assert!(extract(r#"{"name":"x"}"#, Some("application/json")).await.is_ok());
    }

    #[tokio::test]
    async fn wrong_type_syntax_and_content_type_are_all_400() {
        for (body, ct) in [
            (r#"{"name":1}"#, Some("application/json")),
            (r#"{"name":"#, Some("application/json")),
            (r#"{"name":"x"}"#, None),
            (r#"{"name":"x"}"#, Some("text/plain")),
        ] {
            let err = extract(body, ct).await.err().expect("rejected");
            assert!(matches!(err, ApiError::Validation(_)));
            assert_eq!(err.status(), StatusCode::BAD_REQUEST);
            assert!(!err.to_string().is_empty());
        }
    }
}
