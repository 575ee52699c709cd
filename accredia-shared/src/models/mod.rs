/// Database models for Accredia
///
/// This module contains the persisted records and their CRUD operations.
///
/// # Models
///
/// - `user`: identity records with password and refresh-token hashes
/// - `accreditation`: user-owned accreditations with a lifecycle status
///
/// # Example
///
/// ```no_run
/// use accredia_shared::models::user::{User, CreateUser};
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
/// let user = User::create(&pool, CreateUser {
///     email: "user@example.com".to_string(),
///     password_hash: "$argon2id$...".to_string(),
///     first_name: "John".to_string(),
///     last_name: "Doe".to_string(),
/// }).await?;
/// # Ok(())
/// # }
/// ```

pub mod accreditation;
pub mod user;
