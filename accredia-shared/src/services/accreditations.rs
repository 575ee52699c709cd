/// Accreditation guard service
///
/// Enforces ownership and lifecycle-state rules in front of the
/// [`AccreditationStore`] collaborator. Every mutation goes through the same
/// guard order:
///
/// 1. existence: `NotFound` if the id does not resolve
/// 2. ownership: `Forbidden` if the caller does not own the record
/// 3. lifecycle (deletion only): `InvalidState` if the status is no longer
///    `PENDING`
///
/// Existence is checked before ownership, so a non-owner referencing a real
/// id receives `Forbidden`, not `NotFound`. That reveals existence to
/// non-owners; it is the behavior this API has always had and is kept
/// deliberately.

use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::accreditation::{Accreditation, CreateAccreditation, UpdateAccreditation};
use crate::store::{AccreditationStore, StoreError};

/// Error type surfaced by the accreditation service
#[derive(Debug, thiserror::Error)]
pub enum AccreditationError {
    /// No accreditation with the given id
    #[error("Accreditation not found")]
    NotFound,

    /// The caller does not own the accreditation
    #[error("You cannot modify this accreditation")]
    Forbidden,

    /// Deletion attempted on a record that left the PENDING status
    ///
    /// Distinct from `Forbidden`: this is a lifecycle-state guard, not an
    /// ownership check, even though both map to the same access-denial
    /// category at the HTTP boundary.
    #[error("Only pending accreditations can be deleted")]
    InvalidState,

    /// Storage infrastructure failure
    #[error("Unexpected failure: {0}")]
    Unexpected(String),
}

impl From<StoreError> for AccreditationError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => AccreditationError::NotFound,
            other => AccreditationError::Unexpected(other.to_string()),
        }
    }
}

/// Guard service over an accreditation store
pub struct AccreditationsService {
    store: Arc<dyn AccreditationStore>,
}

impl AccreditationsService {
    /// Creates the service with its collaborator
    pub fn new(store: Arc<dyn AccreditationStore>) -> Self {
        Self { store }
    }

    /// Lists the caller's accreditations, newest first
    ///
    /// The owner filter is applied inside the store, so no ownership
    /// ambiguity is possible here.
    pub async fn list_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<Accreditation>, AccreditationError> {
        Ok(self.store.list_by_owner(user_id).await?)
    }

    /// Creates an accreditation owned by the caller
    ///
    /// New records start as `PENDING` with no expiration date.
    pub async fn create_for_user(
        &self,
        user_id: Uuid,
        name: String,
    ) -> Result<Accreditation, AccreditationError> {
        let accreditation = self
            .store
            .create(CreateAccreditation { user_id, name })
            .await?;

        info!(
            user_id = %user_id,
            accreditation_id = %accreditation.id,
            name = %accreditation.name,
            "New accreditation created"
        );

        Ok(accreditation)
    }

    /// Applies a partial update to an accreditation the caller owns
    ///
    /// Only the fields present in `changes` are written.
    ///
    /// # Errors
    ///
    /// - `AccreditationError::NotFound` when the id does not exist (checked
    ///   before any ownership consideration)
    /// - `AccreditationError::Forbidden` when the caller is not the owner
    pub async fn update_for_user(
        &self,
        user_id: Uuid,
        id: Uuid,
        changes: UpdateAccreditation,
    ) -> Result<Accreditation, AccreditationError> {
        let accreditation = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(AccreditationError::NotFound)?;

        if accreditation.user_id != user_id {
            warn!(
                user_id = %user_id,
                accreditation_id = %id,
                "Update rejected: caller is not the owner"
            );
            return Err(AccreditationError::Forbidden);
        }

        Ok(self.store.update(id, changes).await?)
    }

    /// Deletes an accreditation the caller owns, while it is still PENDING
    ///
    /// # Errors
    ///
    /// - `AccreditationError::NotFound` when the id does not exist
    /// - `AccreditationError::Forbidden` when the caller is not the owner,
    ///   regardless of status
    /// - `AccreditationError::InvalidState` when the owner matches but the
    ///   status has left `PENDING`, since irrevocable states are not deletable
    pub async fn delete_for_user(
        &self,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<(), AccreditationError> {
        let accreditation = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(AccreditationError::NotFound)?;

        if accreditation.user_id != user_id {
            warn!(
                user_id = %user_id,
                accreditation_id = %id,
                "Delete rejected: caller is not the owner"
            );
            return Err(AccreditationError::Forbidden);
        }

        if !accreditation.status.is_deletable() {
            warn!(
                user_id = %user_id,
                accreditation_id = %id,
                status = accreditation.status.as_str(),
                "Delete rejected: accreditation is no longer pending"
            );
            return Err(AccreditationError::InvalidState);
        }

        self.store.delete(id).await?;

        info!(
            user_id = %user_id,
            accreditation_id = %id,
            "Accreditation deleted"
        );

        Ok(())
    }
}
