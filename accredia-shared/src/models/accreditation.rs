/// Accreditation model and database operations
///
/// An accreditation is a user-owned resource with a lifecycle status. The
/// owner is set at creation and immutable; only the owner may read, mutate,
/// or delete the record, and deletion is allowed only while the status is
/// still `PENDING`.
///
/// # State Machine
///
/// ```text
/// PENDING → APPROVED
///         → REJECTED
/// APPROVED → EXPIRED
/// ```
///
/// Transitions out of `PENDING` are performed by an external review process,
/// not by this service. The only status this service inspects is `PENDING`,
/// as the precondition for deletion.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE accreditation_status AS ENUM (
///     'PENDING', 'APPROVED', 'REJECTED', 'EXPIRED'
/// );
///
/// CREATE TABLE accreditations (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     name VARCHAR(255) NOT NULL,
///     status accreditation_status NOT NULL DEFAULT 'PENDING',
///     expiration_date TIMESTAMPTZ,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Accreditation lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "accreditation_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum AccreditationStatus {
    /// Awaiting review; the only status in which deletion is allowed
    Pending,

    /// Granted by the review process
    Approved,

    /// Denied by the review process
    Rejected,

    /// Was approved, validity window has passed
    Expired,
}

impl AccreditationStatus {
    /// Converts status to its stored string form
    pub fn as_str(&self) -> &'static str {
        match self {
            AccreditationStatus::Pending => "PENDING",
            AccreditationStatus::Approved => "APPROVED",
            AccreditationStatus::Rejected => "REJECTED",
            AccreditationStatus::Expired => "EXPIRED",
        }
    }

    /// Checks whether a record in this status may still be deleted
    pub fn is_deletable(&self) -> bool {
        matches!(self, AccreditationStatus::Pending)
    }
}

/// Accreditation record owned by exactly one user
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Accreditation {
    /// Unique accreditation ID
    pub id: Uuid,

    /// Owning user, set at creation and immutable
    pub user_id: Uuid,

    /// Human-readable accreditation name
    pub name: String,

    /// Current lifecycle status
    pub status: AccreditationStatus,

    /// When the accreditation expires (null until set by the review process)
    pub expiration_date: Option<DateTime<Utc>>,

    /// When the record was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new accreditation
///
/// New records always start as `PENDING` with no expiration date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAccreditation {
    /// Owning user
    pub user_id: Uuid,

    /// Accreditation name
    pub name: String,
}

/// Input for partially updating an accreditation
///
/// Only non-None fields are applied; everything else is untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateAccreditation {
    /// New name
    pub name: Option<String>,
}

impl Accreditation {
    /// Creates a new accreditation in status `PENDING`
    pub async fn create(pool: &PgPool, data: CreateAccreditation) -> Result<Self, sqlx::Error> {
        let accreditation = sqlx::query_as::<_, Accreditation>(
            r#"
            INSERT INTO accreditations (user_id, name, status, expiration_date)
            VALUES ($1, $2, 'PENDING', NULL)
            RETURNING id, user_id, name, status, expiration_date, created_at
            "#,
        )
        .bind(data.user_id)
        .bind(data.name)
        .fetch_one(pool)
        .await?;

        Ok(accreditation)
    }

    /// Finds an accreditation by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let accreditation = sqlx::query_as::<_, Accreditation>(
            r#"
            SELECT id, user_id, name, status, expiration_date, created_at
            FROM accreditations
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(accreditation)
    }

    /// Lists all accreditations owned by a user, newest first
    ///
    /// The owner filter is applied server-side; there is no way to reach
    /// another user's records through this query.
    pub async fn list_by_owner(pool: &PgPool, user_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        let accreditations = sqlx::query_as::<_, Accreditation>(
            r#"
            SELECT id, user_id, name, status, expiration_date, created_at
            FROM accreditations
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(accreditations)
    }

    /// Applies a partial update to an accreditation
    ///
    /// Only the fields present in `data` are written. Returns the updated
    /// record, or None if the id does not exist.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        data: UpdateAccreditation,
    ) -> Result<Option<Self>, sqlx::Error> {
        let accreditation = sqlx::query_as::<_, Accreditation>(
            r#"
            UPDATE accreditations
            SET name = COALESCE($2, name)
            WHERE id = $1
            RETURNING id, user_id, name, status, expiration_date, created_at
            "#,
        )
        .bind(id)
        .bind(data.name)
        .fetch_optional(pool)
        .await?;

        Ok(accreditation)
    }

    /// Deletes an accreditation by ID
    ///
    /// Ownership and lifecycle guards live in the service layer; the store
    /// itself deletes unconditionally.
    ///
    /// # Returns
    ///
    /// True if a record was deleted, false if the id did not exist.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM accreditations WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
