/// PostgreSQL implementations of the storage collaborators
///
/// Thin adapters over the model CRUD functions that translate sqlx errors
/// into the tagged [`StoreError`] outcome. The unique-violation check is the
/// only place in the codebase that looks at a driver-specific error shape;
/// everything above it switches on the tag.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{AccreditationStore, StoreError, UserDirectory};
use crate::models::accreditation::{Accreditation, CreateAccreditation, UpdateAccreditation};
use crate::models::user::{CreateUser, User};

/// Maps a sqlx error to the tagged store outcome
///
/// Unique constraint violations become `Conflict`, missing rows become
/// `NotFound`, everything else is carried as opaque detail.
fn map_sqlx_error(err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::RowNotFound => StoreError::NotFound,
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => StoreError::Conflict,
        other => StoreError::Other(format!("Database error: {}", other)),
    }
}

/// User directory backed by PostgreSQL
#[derive(Clone)]
pub struct PgUserDirectory {
    pool: PgPool,
}

impl PgUserDirectory {
    /// Creates a directory over the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserDirectory for PgUserDirectory {
    async fn create(&self, data: CreateUser) -> Result<User, StoreError> {
        User::create(&self.pool, data).await.map_err(map_sqlx_error)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        User::find_by_email(&self.pool, email)
            .await
            .map_err(map_sqlx_error)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        User::find_by_id(&self.pool, id)
            .await
            .map_err(map_sqlx_error)
    }

    async fn set_refresh_hash(&self, id: Uuid, hash: &str) -> Result<(), StoreError> {
        let updated = User::set_refresh_hash(&self.pool, id, hash)
            .await
            .map_err(map_sqlx_error)?;

        if updated {
            Ok(())
        } else {
            Err(StoreError::NotFound)
        }
    }
}

/// Accreditation store backed by PostgreSQL
#[derive(Clone)]
pub struct PgAccreditationStore {
    pool: PgPool,
}

impl PgAccreditationStore {
    /// Creates a store over the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccreditationStore for PgAccreditationStore {
    async fn create(&self, data: CreateAccreditation) -> Result<Accreditation, StoreError> {
        Accreditation::create(&self.pool, data)
            .await
            .map_err(map_sqlx_error)
    }

    async fn list_by_owner(&self, user_id: Uuid) -> Result<Vec<Accreditation>, StoreError> {
        Accreditation::list_by_owner(&self.pool, user_id)
            .await
            .map_err(map_sqlx_error)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Accreditation>, StoreError> {
        Accreditation::find_by_id(&self.pool, id)
            .await
            .map_err(map_sqlx_error)
    }

    async fn update(
        &self,
        id: Uuid,
        data: UpdateAccreditation,
    ) -> Result<Accreditation, StoreError> {
        Accreditation::update(&self.pool, id, data)
            .await
            .map_err(map_sqlx_error)?
            .ok_or(StoreError::NotFound)
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let deleted = Accreditation::delete(&self.pool, id)
            .await
            .map_err(map_sqlx_error)?;

        if deleted {
            Ok(())
        } else {
            Err(StoreError::NotFound)
        }
    }
}
