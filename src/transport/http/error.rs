//! Mapping from domain and store failures to HTTP responses.

use crate::domain::{ValidationError, MAX_BATCH_LEN};
use crate::storage::StoreError;
use crate::transport::http::types::ErrorResponse;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    #[error("invalid id: {0:?}")]
    InvalidId(String),

    #[error("invalid review data: {0}")]
    Validation(#[from] ValidationError),

    #[error("invalid review data at index {index}: {source}")]
    InvalidBatchItem {
        index: usize,
        #[source]
        source: ValidationError,
    },

    #[error("batch of {len} reviews exceeds the limit of {max}", max = MAX_BATCH_LEN)]
    BatchTooLarge { len: usize },

    #[error("review not found")]
    NotFound,

    #[error("{0}")]
    Store(StoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidBody(_)
            | ApiError::InvalidId(_)
            | ApiError::Validation(_)
            | ApiError::InvalidBatchItem { .. }
            | ApiError::BatchTooLarge { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => ApiError::NotFound,
            other => ApiError::Store(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ApiError::Store(err) => tracing::error!(error = %err, "review store failure"),
            ApiError::NotFound => tracing::debug!("review not found"),
            other => tracing::debug!(error = %other, "rejected request"),
        }
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::InvalidId("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::Validation(ValidationError::EmptyField { field: "name" }).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::BatchTooLarge { len: 5000 }.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::from(StoreError::NotFound { id: 3 }).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(StoreError::Constraint {
                message: "check".into()
            })
            .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_not_found_is_matched_structurally() {
        let err = ApiError::from(StoreError::NotFound { id: 3 });
        assert!(matches!(err, ApiError::NotFound));
        assert_eq!(err.to_string(), "review not found");
    }

    #[test]
    fn test_batch_item_message_names_index() {
        let err = ApiError::InvalidBatchItem {
            index: 2,
            source: ValidationError::EmptyField { field: "email" },
        };
        assert_eq!(
            err.to_string(),
            "invalid review data at index 2: email must not be empty"
        );
    }
}
