/// Authentication endpoints
///
/// Register, login, and refresh. All three return the same token pair shape.
/// Refresh is deliberately public: the presented refresh token itself is the
/// credential, checked against the stored hash by the auth service. The
/// subject is read from the token without signature verification, purely to
/// locate the user record; a forged subject fails the hash comparison.

use crate::app::AppState;
use crate::error::{validation_error, ApiError};
use accredia_shared::services::auth::{NewUser, TokenPair};
use axum::{extract::State, Json};
use serde::Deserialize;
use validator::Validate;

/// Request body for user registration
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Email address, must be unique
    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    /// Plaintext password, hashed server-side
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    /// Given name
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,

    /// Family name
    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,
}

/// Request body for login
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Request body for token refresh
#[derive(Debug, Deserialize, Validate)]
pub struct RefreshRequest {
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

/// POST /auth/register
///
/// Creates a user and opens a session in one step.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<Json<TokenPair>, ApiError> {
    body.validate().map_err(validation_error)?;

    let tokens = state
        .auth
        .register(NewUser {
            email: body.email,
            password: body.password,
            first_name: body.first_name,
            last_name: body.last_name,
        })
        .await?;

    Ok(Json(tokens))
}

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<TokenPair>, ApiError> {
    body.validate().map_err(validation_error)?;

    let tokens = state.auth.login(&body.email, &body.password).await?;

    Ok(Json(tokens))
}

/// POST /auth/refresh
///
/// Rotates the refresh token. The subject is extracted from the presented
/// token without verifying its signature. A token that does not even decode
/// is rejected with its own message; the indistinguishability guarantee
/// covers only the service-level failures (unknown subject, no stored
/// token, hash mismatch), where a structurally valid token probes state.
pub async fn refresh(
    State(state): State<AppState>,
    Json(body): Json<RefreshRequest>,
) -> Result<Json<TokenPair>, ApiError> {
    body.validate().map_err(validation_error)?;

    let subject = state
        .codec()
        .decode_subject_unverified(&body.refresh_token)
        .ok_or_else(|| ApiError::Forbidden("Invalid token".to_string()))?;

    let tokens = state.auth.refresh(subject, &body.refresh_token).await?;

    Ok(Json(tokens))
}
