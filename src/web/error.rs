//! API error handling for the retromail web layer.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// API error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Bad request (400).
    BadRequest,
    /// Unauthorized (401).
    Unauthorized,
    /// Forbidden (403).
    Forbidden,
    /// Not found (404).
    NotFound,
    /// Conflict (409).
    Conflict,
    /// Unprocessable entity (422).
    UnprocessableEntity,
    /// Internal server error (500).
    InternalError,
}

impl ErrorCode {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorCode::BadRequest => StatusCode::BAD_REQUEST,
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::Forbidden => StatusCode::FORBIDDEN,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::Conflict => StatusCode::CONFLICT,
            ErrorCode::UnprocessableEntity => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// API error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Error details.
    pub error: ErrorDetail,
}

/// Error detail.
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    /// Error code.
    pub code: ErrorCode,
    /// Human-readable message.
    pub message: String,
}

/// API error type.
#[derive(Debug)]
pub struct ApiError {
    code: ErrorCode,
    message: String,
}

impl ApiError {
    /// Create a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Create a bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::BadRequest, message)
    }

    /// Create an unauthorized error.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// Create a forbidden error.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, message)
    }

    /// Create a not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Create a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, message)
    }

    /// Create an unprocessable entity error.
    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::UnprocessableEntity, message)
    }

    /// Create an internal server error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.code.status_code();
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (status, Json(body)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<crate::RetromailError> for ApiError {
    fn from(err: crate::RetromailError) -> Self {
        use crate::RetromailError;
        match &err {
            RetromailError::Unauthenticated => ApiError::unauthorized(err.to_string()),
            RetromailError::RegistrationRequired => ApiError::forbidden(err.to_string()),
            RetromailError::Unauthorized(msg) => ApiError::forbidden(msg.clone()),
            RetromailError::NotFound(_) => ApiError::not_found(err.to_string()),
            RetromailError::RecipientNotFound(_) => ApiError::not_found(err.to_string()),
            RetromailError::DuplicateAddress(_) => ApiError::conflict(err.to_string()),
            RetromailError::AccountExists => ApiError::conflict(err.to_string()),
            RetromailError::ProvisioningExhausted(_) => ApiError::conflict(err.to_string()),
            RetromailError::IdentityIncomplete => ApiError::unprocessable(err.to_string()),
            RetromailError::InvalidAddress(_) => ApiError::bad_request(err.to_string()),
            _ => {
                tracing::error!("Internal error: {}", err);
                ApiError::internal("An internal error occurred")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RetromailError;

    #[test]
    fn test_error_code_status() {
        assert_eq!(ErrorCode::BadRequest.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ErrorCode::Unauthorized.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ErrorCode::Forbidden.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(ErrorCode::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorCode::Conflict.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            ErrorCode::UnprocessableEntity.status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ErrorCode::InternalError.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_api_error_constructors() {
        let err = ApiError::bad_request("bad");
        assert_eq!(err.code, ErrorCode::BadRequest);

        let err = ApiError::unauthorized("unauth");
        assert_eq!(err.code, ErrorCode::Unauthorized);

        let err = ApiError::forbidden("forbid");
        assert_eq!(err.code, ErrorCode::Forbidden);

        let err = ApiError::not_found("missing");
        assert_eq!(err.code, ErrorCode::NotFound);

        let err = ApiError::conflict("dup");
        assert_eq!(err.code, ErrorCode::Conflict);

        let err = ApiError::unprocessable("invalid");
        assert_eq!(err.code, ErrorCode::UnprocessableEntity);

        let err = ApiError::internal("error");
        assert_eq!(err.code, ErrorCode::InternalError);
    }

    #[test]
    fn test_status_mapping_from_domain_errors() {
        let err: ApiError = RetromailError::Unauthenticated.into();
        assert_eq!(err.code, ErrorCode::Unauthorized);

        let err: ApiError = RetromailError::RegistrationRequired.into();
        assert_eq!(err.code, ErrorCode::Forbidden);

        let err: ApiError = RetromailError::Unauthorized("nope".to_string()).into();
        assert_eq!(err.code, ErrorCode::Forbidden);

        let err: ApiError = RetromailError::NotFound("mail".to_string()).into();
        assert_eq!(err.code, ErrorCode::NotFound);

        let err: ApiError = RetromailError::RecipientNotFound("ghost@x".to_string()).into();
        assert_eq!(err.code, ErrorCode::NotFound);

        let err: ApiError = RetromailError::DuplicateAddress("a@b".to_string()).into();
        assert_eq!(err.code, ErrorCode::Conflict);

        let err: ApiError = RetromailError::AccountExists.into();
        assert_eq!(err.code, ErrorCode::Conflict);

        let err: ApiError = RetromailError::ProvisioningExhausted(100).into();
        assert_eq!(err.code, ErrorCode::Conflict);

        let err: ApiError = RetromailError::IdentityIncomplete.into();
        assert_eq!(err.code, ErrorCode::UnprocessableEntity);

        let err: ApiError = RetromailError::InvalidAddress("nope".to_string()).into();
        assert_eq!(err.code, ErrorCode::BadRequest);

        let err: ApiError = RetromailError::Database("boom".to_string()).into();
        assert_eq!(err.code, ErrorCode::InternalError);
    }
}
