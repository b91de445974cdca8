//! Request extractors whose rejections use the `{success: false, message}` body.
//!
//! Drop-in replacements for axum's `Json`, `Query` and `Path`: a malformed body,
//! query string or path segment becomes `AppError::BadRequest`.

use axum::{
    extract::{FromRequest, FromRequestParts},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::server::error::AppError;

#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct Json<T>(pub T);

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct Query<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct Path<T>(pub T);

#[cfg(test)]
mod test {
    use axum::{
        body::{to_bytes, Body},
        http::{header::CONTENT_TYPE, Request, StatusCode},
    };

    use super::*;
    use crate::model::{
        api::ErrorDto,
        order::{OrderQuery, PlaceOrderDto},
    };

    async fn error_body(err: AppError) -> (StatusCode, ErrorDto) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

        (status, serde_json::from_slice(&bytes).unwrap())
    }

    /// Tests a request body that is not valid JSON.
    ///
    /// Expected: 400 with the error envelope
    #[tokio::test]
    async fn malformed_json_uses_envelope() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/orders")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from("{\"items\": ["))
            .unwrap();

        let Err(err) = Json::<PlaceOrderDto>::from_request(request, &()).await else {
            panic!("malformed body was accepted");
        };
        let (status, body) = error_body(err).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!body.success);
        assert!(!body.message.is_empty());
    }

    /// Tests a query string naming an unknown enum value.
    ///
    /// Expected: 400 with the error envelope
    #[tokio::test]
    async fn unknown_query_enum_uses_envelope() {
        let (mut parts, _) = Request::builder()
            .uri("/api/orders?status=misplaced")
            .body(())
            .unwrap()
            .into_parts();

        let Err(err) = Query::<OrderQuery>::from_request_parts(&mut parts, &()).await else {
            panic!("unknown status was accepted");
        };
        let (status, body) = error_body(err).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!body.success);
    }

    /// Tests a well-formed query string.
    ///
    /// Expected: Ok with the parsed values
    #[tokio::test]
    async fn valid_query_parses() {
        let (mut parts, _) = Request::builder()
            .uri("/api/orders?status=pending&page=2")
            .body(())
            .unwrap()
            .into_parts();

        let Ok(Query(query)) = Query::<OrderQuery>::from_request_parts(&mut parts, &()).await
        else {
            panic!("valid query was rejected");
        };

        assert_eq!(query.page, Some(2));
        assert!(query.status.is_some());
    }
}
