//! Mapping of core errors onto HTTP responses.

use api_shared::ErrorRes;
use axum::{http::StatusCode, response::Json};
use medform_core::FormError;

/// Error half of every JSON handler result.
pub type ApiError = (StatusCode, Json<ErrorRes>);

pub type ApiResult<T> = Result<Json<T>, ApiError>;

pub fn status_of(err: &FormError) -> StatusCode {
    match err {
        FormError::InvalidInput(_) | FormError::UnsupportedImageType(_) | FormError::Text(_) => {
            StatusCode::BAD_REQUEST
        }
        FormError::NotFound(_) => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Logs `err` under `context` and turns it into a `{success: false, error}` response.
pub fn reject(context: &str, err: FormError) -> ApiError {
    let status = status_of(&err);
    if status.is_server_error() {
        tracing::error!("{} error: {:?}", context, err);
    } else {
        tracing::warn!("{} rejected: {}", context, err);
    }
    (status, Json(ErrorRes::new(err.to_string())))
}

/// Like [`reject`], but not-found errors carry `not_found_message` instead.
pub fn reject_with(context: &str, err: FormError, not_found_message: &str) -> ApiError {
    match err {
        FormError::NotFound(_) => {
            tracing::warn!("{} rejected: {}", context, err);
            (StatusCode::NOT_FOUND, Json(ErrorRes::new(not_found_message)))
        }
        other => reject(context, other),
    }
}

pub fn bad_request(message: &str) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(ErrorRes::new(message)))
}
