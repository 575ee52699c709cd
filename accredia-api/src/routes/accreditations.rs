/// Accreditation endpoints
///
/// Every handler reads the authenticated caller from the [`CurrentUser`]
/// request extension installed by the auth middleware, then delegates the
/// ownership and lifecycle checks to the accreditation service. Status and
/// expiration date are server-managed; the request bodies cannot touch them.

use crate::app::{AppState, CurrentUser};
use crate::error::{validation_error, ApiError};
use accredia_shared::models::accreditation::{
    Accreditation, AccreditationStatus, UpdateAccreditation,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Request body for creating an accreditation
#[derive(Debug, Deserialize, Validate)]
pub struct CreateAccreditationRequest {
    /// Display name of the accreditation
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,
}

/// Request body for partially updating an accreditation
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateAccreditationRequest {
    /// New display name, unchanged when absent
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: Option<String>,
}

/// Accreditation representation returned to clients
#[derive(Debug, Serialize)]
pub struct AccreditationResponse {
    pub id: Uuid,
    pub name: String,
    pub status: AccreditationStatus,
    pub expiration_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<Accreditation> for AccreditationResponse {
    fn from(a: Accreditation) -> Self {
        Self {
            id: a.id,
            name: a.name,
            status: a.status,
            expiration_date: a.expiration_date,
            created_at: a.created_at,
        }
    }
}

/// GET /accreditations
///
/// Lists the caller's accreditations, newest first. Other users' records can
/// never appear here, whatever their status.
pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<Vec<AccreditationResponse>>, ApiError> {
    let accreditations = state.accreditations.list_for_user(user.user_id).await?;

    Ok(Json(
        accreditations
            .into_iter()
            .map(AccreditationResponse::from)
            .collect(),
    ))
}

/// POST /accreditations
///
/// Creates a PENDING accreditation owned by the caller.
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(body): Json<CreateAccreditationRequest>,
) -> Result<Json<AccreditationResponse>, ApiError> {
    body.validate().map_err(validation_error)?;

    let accreditation = state
        .accreditations
        .create_for_user(user.user_id, body.name)
        .await?;

    Ok(Json(accreditation.into()))
}

/// PATCH /accreditations/:id
///
/// Partially updates an accreditation the caller owns.
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateAccreditationRequest>,
) -> Result<Json<AccreditationResponse>, ApiError> {
    body.validate().map_err(validation_error)?;

    let accreditation = state
        .accreditations
        .update_for_user(user.user_id, id, UpdateAccreditation { name: body.name })
        .await?;

    Ok(Json(accreditation.into()))
}

/// DELETE /accreditations/:id
///
/// Deletes an accreditation the caller owns while it is still PENDING.
/// Returns 204 with no body on success.
pub async fn remove(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.accreditations.delete_for_user(user.user_id, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
