/// Error handling for the API server
///
/// Unified error type mapping service errors to HTTP responses. Handlers
/// return `Result<T, ApiError>`, which converts to the right status code and
/// a JSON body automatically.
///
/// The mapping keeps the information-hiding properties of the services
/// intact: `InvalidCredentials` and `AccessDenied` carry a single fixed
/// message each, and internal failures are logged but surfaced opaquely.

use accredia_shared::auth::jwt::JwtError;
use accredia_shared::services::accreditations::AccreditationError;
use accredia_shared::services::auth::AuthError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// Bad request (400)
    BadRequest(String),

    /// Unauthorized (401)
    Unauthorized(String),

    /// Forbidden (403)
    Forbidden(String),

    /// Not found (404)
    NotFound(String),

    /// Conflict (409) - e.g., duplicate email
    Conflict(String),

    /// Unprocessable entity (422) - validation errors
    ValidationError(Vec<ValidationErrorDetail>),

    /// Internal server error (500)
    InternalError(String),
}

/// Validation error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationErrorDetail {
    /// Field that failed validation
    pub field: String,

    /// Error message
    pub message: String,
}

/// Error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code (e.g., "unauthorized", "conflict")
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Optional validation errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<ValidationErrorDetail>>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::ValidationError(errors) => {
                write!(f, "Validation failed: {} errors", errors.len())
            }
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message, details) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg, None),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg, None),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", msg, None),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg, None),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg, None),
            ApiError::ValidationError(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_error",
                "Request validation failed".to_string(),
                Some(errors),
            ),
            ApiError::InternalError(msg) => {
                // Log internal errors but don't expose details to clients
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_code.to_string(),
            message,
            details,
        });

        (status, body).into_response()
    }
}

/// Converts `validator` failures into a 422 with per-field details
pub fn validation_error(errors: validator::ValidationErrors) -> ApiError {
    let details: Vec<ValidationErrorDetail> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| ValidationErrorDetail {
                field: field.to_string(),
                message: error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "Validation failed".to_string()),
            })
        })
        .collect();

    ApiError::ValidationError(details)
}

/// Convert auth service errors to API errors
///
/// The service's fixed messages travel through unchanged, so e.g. every
/// credential failure reads identically on the wire.
impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::DuplicateEmail => ApiError::Conflict(err.to_string()),
            AuthError::InvalidCredentials => ApiError::Unauthorized(err.to_string()),
            AuthError::AccessDenied => ApiError::Forbidden(err.to_string()),
            AuthError::Unexpected(detail) => ApiError::InternalError(detail),
        }
    }
}

/// Convert accreditation service errors to API errors
///
/// The lifecycle guard (`InvalidState`) maps to 403 like an ownership
/// violation, but keeps its own message.
impl From<AccreditationError> for ApiError {
    fn from(err: AccreditationError) -> Self {
        match err {
            AccreditationError::NotFound => ApiError::NotFound(err.to_string()),
            AccreditationError::Forbidden => ApiError::Forbidden(err.to_string()),
            AccreditationError::InvalidState => ApiError::Forbidden(err.to_string()),
            AccreditationError::Unexpected(detail) => ApiError::InternalError(detail),
        }
    }
}

/// Convert token errors to API errors
impl From<JwtError> for ApiError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::Expired => ApiError::Unauthorized("Token expired".to_string()),
            JwtError::InvalidToken(_) => ApiError::Unauthorized("Invalid token".to_string()),
            JwtError::CreateError(detail) => ApiError::InternalError(detail),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ApiError::BadRequest("Invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: Invalid input");

        let err = ApiError::NotFound("Accreditation not found".to_string());
        assert_eq!(err.to_string(), "Not found: Accreditation not found");
    }

    #[test]
    fn test_auth_error_mapping_keeps_messages() {
        let unauthorized = ApiError::from(AuthError::InvalidCredentials);
        assert!(matches!(unauthorized, ApiError::Unauthorized(ref msg) if msg == "Invalid credentials"));

        let denied = ApiError::from(AuthError::AccessDenied);
        assert!(matches!(denied, ApiError::Forbidden(ref msg) if msg == "Access denied"));

        let conflict = ApiError::from(AuthError::DuplicateEmail);
        assert!(matches!(conflict, ApiError::Conflict(ref msg) if msg == "Email already in use"));
    }

    #[test]
    fn test_accreditation_error_mapping() {
        let forbidden = ApiError::from(AccreditationError::Forbidden);
        let invalid_state = ApiError::from(AccreditationError::InvalidState);

        // Both are 403, but with distinct messages
        assert!(matches!(forbidden, ApiError::Forbidden(_)));
        assert!(matches!(invalid_state, ApiError::Forbidden(_)));

        let ApiError::Forbidden(ownership_msg) = forbidden else {
            unreachable!()
        };
        let ApiError::Forbidden(state_msg) = invalid_state else {
            unreachable!()
        };
        assert_ne!(ownership_msg, state_msg);
    }

    #[test]
    fn test_validation_error() {
        let errors = vec![
            ValidationErrorDetail {
                field: "email".to_string(),
                message: "Invalid email format".to_string(),
            },
            ValidationErrorDetail {
                field: "password".to_string(),
                message: "Password too short".to_string(),
            },
        ];

        let err = ApiError::ValidationError(errors);
        assert_eq!(err.to_string(), "Validation failed: 2 errors");
    }
}
