//! Request extractors that report rejections in the API error format.
//!
//! Thin wrappers around `axum::Json` and `axum::extract::Query`. Axum's own
//! rejections are plain text; these turn them into `AppError::Rejected` so every
//! error a client sees is `{"error": {"code", "message"}}`.

use axum::{
    extract::{FromRequest, FromRequestParts, Request, rejection},
    http::request::Parts,
    response::{IntoResponse, Response},
};
use serde::{Serialize, de::DeserializeOwned};

use crate::error::AppError;

/// JSON body extractor and response type.
#[derive(Debug, Clone, Copy, Default)]
pub struct Json<T>(pub T);

impl<S, T> FromRequest<S> for Json<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(Json(value)),
            Err(rejection) => Err(AppError::Rejected {
                status: rejection.status(),
                message: json_rejection_message(&rejection),
            }),
        }
    }
}

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

fn json_rejection_message(rejection: &rejection::JsonRejection) -> String {
    use rejection::JsonRejection::*;

    match rejection {
        JsonDataError(err) => format!("Invalid JSON data: {}", err.body_text()),
        JsonSyntaxError(err) => format!("Invalid JSON syntax: {}", err.body_text()),
        MissingJsonContentType(_) => {
            "Missing Content-Type header. Expected 'application/json'.".to_string()
        }
        BytesRejection(err) => format!("Failed to read request body: {}", err.body_text()),
        _ => "Invalid JSON request".to_string(),
    }
}

/// Query string extractor.
#[derive(Debug, Clone, Copy, Default)]
pub struct Query<T>(pub T);

impl<S, T> FromRequestParts<S> for Query<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match axum::extract::Query::<T>::from_request_parts(parts, state).await {
            Ok(axum::extract::Query(value)) => Ok(Query(value)),
            Err(rejection) => Err(AppError::Rejected {
                status: rejection.status(),
                message: format!("Invalid query string: {}", rejection.body_text()),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::StatusCode};
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Payload {
        name: String,
    }

    #[derive(Debug, Deserialize)]
    struct Paging {
        limit: Option<i64>,
    }

    fn json_request(content_type: Option<&str>, body: &str) -> Request {
        let mut builder = axum::http::Request::builder().method("POST").uri("/");
        if let Some(content_type) = content_type {
            builder = builder.header("content-type", content_type);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    #[tokio::test]
    async fn accepts_valid_json() {
        let req = json_request(Some("application/json"), r#"{"name":"sensor-1"}"#);
        let Json(payload) = Json::<Payload>::from_request(req, &()).await.unwrap();
        assert_eq!(payload.name, "sensor-1");
    }

    #[tokio::test]
    async fn wrong_field_type_keeps_axum_status() {
        let req = json_request(Some("application/json"), r#"{"name":5}"#);
        let err = Json::<Payload>::from_request(req, &()).await.unwrap_err();

        match err {
            AppError::Rejected { status, message } => {
                assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
                assert!(message.starts_with("Invalid JSON data"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_content_type_is_rejected() {
        let req = json_request(None, r#"{"name":"x"}"#);
        let err = Json::<Payload>::from_request(req, &()).await.unwrap_err();

        assert!(matches!(
            err,
            AppError::Rejected { status, .. } if status == StatusCode::UNSUPPORTED_MEDIA_TYPE
        ));
    }

    #[tokio::test]
    async fn bad_query_value_is_rejected() {
        let (mut parts, _) = axum::http::Request::builder()
            .uri("/?limit=abc")
            .body(())
            .unwrap()
            .into_parts();

        let err = Query::<Paging>::from_request_parts(&mut parts, &())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            AppError::Rejected { status, .. } if status == StatusCode::BAD_REQUEST
        ));
    }

    #[tokio::test]
    async fn absent_query_value_is_none() {
        let (mut parts, _) = axum::http::Request::builder()
            .uri("/")
            .body(())
            .unwrap()
            .into_parts();

        let Query(paging) = Query::<Paging>::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(paging.limit, None);
    }
}
