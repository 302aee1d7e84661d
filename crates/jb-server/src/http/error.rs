use axum::http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use jb_app::BlobServiceError;
use serde_json::json;
use std::time::Duration;
use tracing::{error, warn};

pub const RATE_LIMIT_LIMIT: HeaderName = HeaderName::from_static("ratelimit-limit");
pub const RATE_LIMIT_REMAINING: HeaderName = HeaderName::from_static("ratelimit-remaining");
pub const RATE_LIMIT_RESET: HeaderName = HeaderName::from_static("ratelimit-reset");

/// Every failure the HTTP layer can answer with. Serialized as
/// `{"error": "<message>"}`.
#[derive(Debug)]
pub enum ApiError {
    Service(BlobServiceError),
    InvalidJson,
    PayloadTooLarge,
    NotFound,
    MethodNotAllowed,
}

impl From<BlobServiceError> for ApiError {
    fn from(err: BlobServiceError) -> Self {
        Self::Service(err)
    }
}

/// Whole seconds, rounded up
pub fn ceil_secs(duration: Duration) -> u64 {
    let millis = duration.as_millis().div_ceil(1000);
    u64::try_from(millis).unwrap_or(u64::MAX)
}

pub fn set_header(headers: &mut HeaderMap, name: HeaderName, value: u64) {
    headers.insert(name, HeaderValue::from(value));
}

fn error_body(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "error": message.into() }))).into_response()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::InvalidJson => error_body(StatusCode::BAD_REQUEST, "Invalid JSON format"),
            ApiError::PayloadTooLarge => {
                error_body(StatusCode::PAYLOAD_TOO_LARGE, "Payload too large")
            }
            ApiError::NotFound => error_body(StatusCode::NOT_FOUND, "Not found"),
            ApiError::MethodNotAllowed => {
                error_body(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
            }
            ApiError::Service(err) => service_error_response(err),
        }
    }
}

fn service_error_response(err: BlobServiceError) -> Response {
    let message = err.public_message();

    match err {
        BlobServiceError::BadRequest(_) => error_body(StatusCode::BAD_REQUEST, message),
        BlobServiceError::NotFound(_) => error_body(StatusCode::NOT_FOUND, message),
        BlobServiceError::Forbidden(_) => {
            warn!(%message, "Rejected by bot verification");
            error_body(StatusCode::FORBIDDEN, message)
        }
        BlobServiceError::RateLimited {
            limit, retry_after, ..
        } => {
            let seconds = ceil_secs(retry_after);
            let mut response = error_body(StatusCode::TOO_MANY_REQUESTS, message);
            let headers = response.headers_mut();
            set_header(headers, header::RETRY_AFTER, seconds);
            set_header(headers, RATE_LIMIT_LIMIT, u64::from(limit));
            set_header(headers, RATE_LIMIT_REMAINING, 0);
            set_header(headers, RATE_LIMIT_RESET, seconds);
            response
        }
        BlobServiceError::Internal { detail, .. } => {
            error!(error = %detail, "{message}");
            error_body(StatusCode::INTERNAL_SERVER_ERROR, message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ceil_secs_rounds_up() {
        assert_eq!(ceil_secs(Duration::from_millis(0)), 0);
        assert_eq!(ceil_secs(Duration::from_millis(1)), 1);
        assert_eq!(ceil_secs(Duration::from_millis(1000)), 1);
        assert_eq!(ceil_secs(Duration::from_millis(1001)), 2);
    }

    #[test]
    fn test_status_codes() {
        let cases = [
            (ApiError::InvalidJson, StatusCode::BAD_REQUEST),
            (ApiError::PayloadTooLarge, StatusCode::PAYLOAD_TOO_LARGE),
            (ApiError::NotFound, StatusCode::NOT_FOUND),
            (ApiError::MethodNotAllowed, StatusCode::METHOD_NOT_ALLOWED),
            (
                BlobServiceError::Forbidden("reCAPTCHA verification failed".into()).into(),
                StatusCode::FORBIDDEN,
            ),
            (
                BlobServiceError::internal("Failed to create blob", "disk full").into(),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn test_rate_limited_sets_retry_headers() {
        let response = ApiError::from(BlobServiceError::RateLimited {
            message: "Too many requests, please try again later".into(),
            limit: 100,
            retry_after: Duration::from_millis(4_500),
        })
        .into_response();

        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers()[header::RETRY_AFTER], "5");
        assert_eq!(response.headers()["ratelimit-limit"], "100");
        assert_eq!(response.headers()["ratelimit-remaining"], "0");
    }
}
