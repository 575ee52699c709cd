/// Authentication primitives for Accredia
///
/// This module provides the low-level building blocks the auth service is
/// composed from:
///
/// # Modules
///
/// - [`password`]: Argon2id hashing for passwords and refresh tokens
/// - [`jwt`]: signed claim-set codec for access/refresh token pairs
///
/// # Security Features
///
/// - **Secret Hashing**: Argon2id with 64 MB memory, 3 iterations
/// - **JWT Tokens**: HS256 signing with per-token lifetimes
/// - **Constant-time Comparison**: all verification uses constant-time operations
///
/// # Example
///
/// ```
/// use accredia_shared::auth::password::{hash_secret, verify_secret};
/// use accredia_shared::auth::jwt::TokenCodec;
/// use chrono::Duration;
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// // Password authentication
/// let hash = hash_secret("user_password")?;
/// assert!(verify_secret("user_password", &hash));
///
/// // Token issuance
/// let codec = TokenCodec::new("secret-key-at-least-32-bytes-long!!");
/// let token = codec.issue(Uuid::new_v4(), "user@example.com", Duration::minutes(10))?;
/// # Ok(())
/// # }
/// ```

pub mod jwt;
pub mod password;
