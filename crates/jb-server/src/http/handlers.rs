use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::Json;
use jb_app::models::{BlobView, CreatedBlob, HealthStatus, PublicConfig};
use jb_app::usecases::{CreateBlobInput, INVALID_BLOB_ID};
use jb_app::BlobServiceError;
use serde_json::Value;
use tracing::debug;

use crate::http::client::request_origin;
use crate::http::error::ApiError;
use crate::http::state::AppState;

/// `POST /api/blobs` with body `{"json": <document>, "recaptchaToken": "..."}`
pub async fn create_blob(
    State(state): State<AppState>,
    headers: HeaderMap,
    uri: Uri,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedBlob>), ApiError> {
    let body = match payload {
        Ok(Json(body)) => Some(body),
        // Non-JSON content types are read as an empty body
        Err(JsonRejection::MissingJsonContentType(_)) => None,
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            return Err(ApiError::PayloadTooLarge);
        }
        Err(rejection) => {
            debug!(error = %rejection.body_text(), "Rejected request body");
            return Err(ApiError::InvalidJson);
        }
    };

    let (document, verification_token) = split_body(body);
    let input = CreateBlobInput {
        document,
        verification_token,
        origin: request_origin(&headers, &uri, state.trust_proxy_hops),
    };

    let created = state.app.create_blob().execute(input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Pull the document and the token out of the request envelope. Anything
/// that is not an object carries neither.
fn split_body(body: Option<Value>) -> (Option<Value>, Option<String>) {
    let Some(Value::Object(mut fields)) = body else {
        return (None, None);
    };

    let token = match fields.remove("recaptchaToken") {
        Some(Value::String(token)) => Some(token),
        _ => None,
    };

    (fields.remove("json"), token)
}

/// `GET /api/blobs/:id`
pub async fn get_blob(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<BlobView>, ApiError> {
    // A segment that does not decode to UTF-8 cannot be a blob id
    let Path(id) = id.map_err(|rejection| {
        debug!(error = %rejection.body_text(), "Rejected blob id segment");
        BlobServiceError::bad_request(INVALID_BLOB_ID)
    })?;

    let view = state.app.get_blob().execute(&id).await?;
    Ok(Json(view))
}

pub async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(state.app.check_health().execute())
}

pub async fn public_config(State(state): State<AppState>) -> Json<PublicConfig> {
    Json(state.app.get_public_config().execute())
}

pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_split_body_extracts_document_and_token() {
        let (document, token) = split_body(Some(json!({
            "json": {"a": 1},
            "recaptchaToken": "tok"
        })));
        assert_eq!(document, Some(json!({"a": 1})));
        assert_eq!(token.as_deref(), Some("tok"));
    }

    #[test]
    fn test_split_body_ignores_non_objects_and_non_string_tokens() {
        assert_eq!(split_body(Some(json!([1, 2]))), (None, None));
        assert_eq!(split_body(None), (None, None));

        let (document, token) = split_body(Some(json!({"json": false, "recaptchaToken": 7})));
        assert_eq!(document, Some(json!(false)));
        assert_eq!(token, None);
    }
}
