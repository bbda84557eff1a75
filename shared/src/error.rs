use aws_sdk_dynamodb::error::{DisplayErrorContext, SdkError};
use http::StatusCode;
use thiserror::Error;

use crate::types::ResponseDescriptor;

/// Faults raised by a [`StudentStore`](crate::store::StudentStore) call
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing table rejected or failed the call
    #[error("{0}")]
    Backend(String),
    /// The item's `studentid` is missing or not a string
    #[error("invalid key: {0}")]
    InvalidKey(String),
    /// A stored attribute has no JSON representation
    #[error("unsupported attribute value: {0}")]
    UnsupportedAttribute(String),
}

impl<E, R> From<SdkError<E, R>> for StoreError
where
    E: std::error::Error + 'static,
    R: std::fmt::Debug + 'static,
{
    fn from(err: SdkError<E, R>) -> Self {
        StoreError::Backend(DisplayErrorContext(&err).to_string())
    }
}

/// Outcome of a failed request. The message becomes the `error` field of the response body.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn into_response(self) -> ResponseDescriptor {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }
        ResponseDescriptor::json(status, &serde_json::json!({ "error": self.to_string() }))
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Internal(err.to_string())
    }
}

/// Startup configuration that cannot be used
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown STUDENT_STORE backend: {0} (expected `dynamodb` or `memory`)")]
    UnknownBackend(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_each_kind_to_its_status() {
        assert_eq!(ApiError::BadRequest("x".into()).status_code(), 400);
        assert_eq!(ApiError::NotFound("x".into()).status_code(), 404);
        assert_eq!(ApiError::Internal("x".into()).status_code(), 500);
    }

    #[test]
    fn error_body_carries_the_raw_message() {
        let resp = ApiError::NotFound("Student not found".into()).into_response();
        assert_eq!(resp.status_code, 404);
        let body: serde_json::Value = serde_json::from_str(&resp.body).unwrap();
        assert_eq!(body, serde_json::json!({ "error": "Student not found" }));
    }

    #[test]
    fn store_faults_become_internal() {
        let err: ApiError = StoreError::Backend("table unavailable".into()).into();
        assert_eq!(err, ApiError::Internal("table unavailable".into()));
    }
}
