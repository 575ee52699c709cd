/// Storage collaborators consumed by the services
///
/// The services never talk to a database driver directly. They go through two
/// narrow async traits, [`UserDirectory`] and [`AccreditationStore`], whose
/// outcomes are tagged with [`StoreError`] instead of driver-specific error
/// shapes. The services switch on the tag (conflict, not found, other) and
/// never inspect vendor error codes.
///
/// # Implementations
///
/// - [`postgres`]: sqlx-backed production implementation
/// - [`memory`]: in-memory implementation for the test suites
///
/// # Example
///
/// ```no_run
/// use accredia_shared::store::{postgres::PgUserDirectory, UserDirectory};
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> anyhow::Result<()> {
/// let users = PgUserDirectory::new(pool);
/// let found = users.find_by_email("user@example.com").await?;
/// # Ok(())
/// # }
/// ```

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::accreditation::{Accreditation, CreateAccreditation, UpdateAccreditation};
use crate::models::user::{CreateUser, User};

/// Tagged storage outcome
///
/// Every storage failure the services care about collapses into one of three
/// tags. Anything driver-specific travels inside `Other` as opaque detail.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A unique constraint was violated (e.g. duplicate email)
    #[error("Unique constraint violated")]
    Conflict,

    /// The referenced record does not exist
    #[error("Record not found")]
    NotFound,

    /// Any other storage failure
    #[error("Storage failure: {0}")]
    Other(String),
}

/// Directory of user identity records
///
/// The four operations here are the only ways the auth flow touches user
/// persistence.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Creates a user; fails with `StoreError::Conflict` on duplicate email
    async fn create(&self, data: CreateUser) -> Result<User, StoreError>;

    /// Looks up a user by email, exactly as stored
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Looks up a user by id
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    /// Overwrites the stored refresh-token hash for a user
    ///
    /// This single write is what rotates refresh tokens: once it commits the
    /// previously stored hash, and with it the previous token, is gone.
    async fn set_refresh_hash(&self, id: Uuid, hash: &str) -> Result<(), StoreError>;
}

/// Store of user-owned accreditations
#[async_trait]
pub trait AccreditationStore: Send + Sync {
    /// Creates an accreditation in status `PENDING` with no expiration date
    async fn create(&self, data: CreateAccreditation) -> Result<Accreditation, StoreError>;

    /// Lists a user's accreditations, newest first
    async fn list_by_owner(&self, user_id: Uuid) -> Result<Vec<Accreditation>, StoreError>;

    /// Looks up an accreditation by id
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Accreditation>, StoreError>;

    /// Applies a partial update; fails with `StoreError::NotFound` if absent
    async fn update(
        &self,
        id: Uuid,
        data: UpdateAccreditation,
    ) -> Result<Accreditation, StoreError>;

    /// Deletes an accreditation; fails with `StoreError::NotFound` if absent
    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;
}
