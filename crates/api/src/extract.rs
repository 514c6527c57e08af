//! Request extractors whose rejections use the `{"detail": "..."}` body.
//!
//! Wrap axum's `Json` and `Query` so a malformed body or query string is
//! answered with 422 and an [`AppError`] instead of axum's plain-text
//! rejection.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// JSON request body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);

/// Query string parameters.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct QueryParams<T>(pub T);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::{
        Router,
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
        routing::{get, post},
    };
    use serde::Deserialize;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct Form {
        name: String,
    }

    #[derive(Debug, Deserialize)]
    struct Params {
        limit: Option<u32>,
    }

    fn app() -> Router {
        Router::new()
            .route(
                "/form",
                post(|JsonBody(form): JsonBody<Form>| async move { form.name }),
            )
            .route(
                "/params",
                get(|QueryParams(params): QueryParams<Params>| async move {
                    params.limit.unwrap_or_default().to_string()
                }),
            )
    }

    async fn send(request: Request<Body>) -> (StatusCode, Value) {
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn post_json(body: &str) -> Request<Body> {
        Request::post("/form")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_owned()))
            .unwrap()
    }

    fn detail(body: &Value) -> &str {
        body["detail"].as_str().unwrap()
    }

    #[tokio::test]
    async fn test_missing_field_is_json_detail() {
        let (status, body) = send(post_json(r#"{"email":"a@b.co"}"#)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(detail(&body).contains("missing field `name`"));
    }

    #[tokio::test]
    async fn test_malformed_body_is_json_detail() {
        let (status, body) = send(post_json("{not json")).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(!detail(&body).is_empty());
    }

    #[tokio::test]
    async fn test_missing_content_type_is_json_detail() {
        let request = Request::post("/form")
            .body(Body::from(json!({ "name": "x" }).to_string()))
            .unwrap();
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(detail(&body).contains("Content-Type"));
    }

    #[tokio::test]
    async fn test_bad_query_is_json_detail() {
        let request = Request::get("/params?limit=-1").body(Body::empty()).unwrap();
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(detail(&body).contains("query string"));
    }
}
