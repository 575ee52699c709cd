/// Authentication service
///
/// Orchestrates register, login, and token refresh over the
/// [`UserDirectory`] collaborator, the Argon2id secret hasher, and the JWT
/// [`TokenCodec`].
///
/// # Session model
///
/// Per user, not per request:
///
/// ```text
/// NoSession -> (register | login) -> ActiveSession -> (refresh)* -> ActiveSession
/// ```
///
/// `ActiveSession` means a hashed refresh token is stored on the user record.
/// Every successful register, login, and refresh overwrites that hash with
/// the hash of the newly issued refresh token, so the previous refresh token
/// stops working even though its signature stays valid, because the directory
/// no longer matches it. Refresh tokens are single-use by hash comparison,
/// not by signature.
///
/// # Error taxonomy
///
/// - `DuplicateEmail`: registration against an existing email
/// - `InvalidCredentials`: login failure; deliberately identical for unknown
///   email and wrong password so accounts cannot be enumerated
/// - `AccessDenied`: refresh failure; deliberately identical for unknown
///   subject, no stored token, and hash mismatch
/// - `Unexpected`: storage/crypto infrastructure failures, surfaced opaquely

use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::jwt::TokenCodec;
use crate::auth::password;
use crate::models::user::CreateUser;
use crate::store::{StoreError, UserDirectory};

/// Error type surfaced by the authentication service
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Registration hit the email uniqueness constraint
    #[error("Email already in use")]
    DuplicateEmail,

    /// Login failed; unknown email and wrong password are indistinguishable
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Refresh failed; unknown subject, missing stored token, and hash
    /// mismatch are indistinguishable
    #[error("Access denied")]
    AccessDenied,

    /// Storage or crypto infrastructure failure
    #[error("Unexpected failure: {0}")]
    Unexpected(String),
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        AuthError::Unexpected(err.to_string())
    }
}

/// Access/refresh token pair returned by register, login, and refresh
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    /// Short-lived access token
    pub access_token: String,

    /// Long-lived refresh token; also stored hashed on the user record
    pub refresh_token: String,
}

/// Lifetimes for the two halves of a token pair
#[derive(Debug, Clone, Copy)]
pub struct TokenLifetimes {
    /// Access token lifetime (short)
    pub access: Duration,

    /// Refresh token lifetime (long)
    pub refresh: Duration,
}

impl Default for TokenLifetimes {
    fn default() -> Self {
        Self {
            access: Duration::minutes(10),
            refresh: Duration::days(7),
        }
    }
}

/// Input for registering a new user
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Email address (uniqueness enforced by the directory)
    pub email: String,

    /// Plaintext password; hashed before it reaches storage
    pub password: String,

    /// Given name
    pub first_name: String,

    /// Family name
    pub last_name: String,
}

/// Well-formed Argon2id hash that matches no secret
///
/// The unknown-email login path verifies against this so both credential
/// failures pay the same hashing cost; without it, a fast rejection would
/// betray that the email does not exist. The parameters mirror the ones
/// `hash_secret` uses for real records.
const UNKNOWN_USER_HASH: &str =
    "$argon2id$v=19$m=65536,t=3,p=4$c29tZXNhbHRzb21lc2FsdA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

/// Authentication service over a user directory
pub struct AuthService {
    users: Arc<dyn UserDirectory>,
    codec: TokenCodec,
    lifetimes: TokenLifetimes,
}

impl AuthService {
    /// Creates the service with its collaborators
    pub fn new(
        users: Arc<dyn UserDirectory>,
        codec: TokenCodec,
        lifetimes: TokenLifetimes,
    ) -> Self {
        Self {
            users,
            codec,
            lifetimes,
        }
    }

    /// Registers a new user and opens a session
    ///
    /// Hashes the password, creates the user record, then issues a token pair
    /// and persists the hashed refresh token.
    ///
    /// # Errors
    ///
    /// - `AuthError::DuplicateEmail` when the directory reports a uniqueness
    ///   violation (the tagged conflict outcome, never a raw storage error)
    /// - `AuthError::Unexpected` for hashing or storage failures
    pub async fn register(&self, data: NewUser) -> Result<TokenPair, AuthError> {
        let password_hash = hash_blocking(data.password).await?;

        let user = self
            .users
            .create(CreateUser {
                email: data.email,
                password_hash,
                first_name: data.first_name,
                last_name: data.last_name,
            })
            .await
            .map_err(|err| match err {
                StoreError::Conflict => {
                    warn!("Registration failed: email already exists");
                    AuthError::DuplicateEmail
                }
                other => AuthError::Unexpected(other.to_string()),
            })?;

        let tokens = self.issue_token_pair(user.id, &user.email).await?;

        info!(user_id = %user.id, "New user registered");
        Ok(tokens)
    }

    /// Authenticates a user by email and password
    ///
    /// # Errors
    ///
    /// Fails with `AuthError::InvalidCredentials` for an unknown email or a
    /// wrong password. Same kind, same message, and comparable hashing cost
    /// on both paths, so the two cases cannot be told apart by a caller
    /// probing for accounts.
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenPair, AuthError> {
        let Some(user) = self.users.find_by_email(email).await? else {
            // Burn the same verification cost as the known-email path
            let _ = verify_blocking(password.to_string(), UNKNOWN_USER_HASH.to_string()).await;
            warn!("Login failed: user not found");
            return Err(AuthError::InvalidCredentials);
        };

        let matches = verify_blocking(password.to_string(), user.password_hash.clone()).await?;
        if !matches {
            warn!(user_id = %user.id, "Login failed: wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        let tokens = self.issue_token_pair(user.id, &user.email).await?;

        info!(user_id = %user.id, "User logged in");
        Ok(tokens)
    }

    /// Exchanges a refresh token for a new token pair, rotating the stored hash
    ///
    /// `claimed_subject` comes from decoding the presented token without
    /// verification; it is trusted for nothing but the directory lookup. The
    /// presented token must match the hash currently stored for that user.
    ///
    /// On success a brand-new pair is issued and the stored hash overwritten,
    /// making the presented token permanently unusable regardless of its
    /// remaining signature validity.
    ///
    /// # Errors
    ///
    /// Fails with `AuthError::AccessDenied` when the subject is unknown, no
    /// hash is stored, or the presented token does not match, never
    /// revealing which.
    pub async fn refresh(
        &self,
        claimed_subject: Uuid,
        presented_token: &str,
    ) -> Result<TokenPair, AuthError> {
        let user = self.users.find_by_id(claimed_subject).await?;

        let Some(user) = user else {
            warn!(user_id = %claimed_subject, "Refresh failed: no such user");
            return Err(AuthError::AccessDenied);
        };

        let Some(stored_hash) = user.hashed_refresh_token.clone() else {
            warn!(user_id = %user.id, "Refresh failed: no token stored");
            return Err(AuthError::AccessDenied);
        };

        let matches = verify_blocking(presented_token.to_string(), stored_hash).await?;
        if !matches {
            warn!(user_id = %user.id, "Refresh failed: token mismatch");
            return Err(AuthError::AccessDenied);
        }

        let tokens = self.issue_token_pair(user.id, &user.email).await?;

        info!(user_id = %user.id, "Refresh token rotated");
        Ok(tokens)
    }

    /// Issues an access/refresh pair and persists the new refresh hash
    ///
    /// The two issuance calls are independent; both tokens exist before the
    /// hash write, and the write is the single commit point. A caller that
    /// abandons the request mid-flight leaves either the old hash or the new
    /// one, never an in-between state.
    async fn issue_token_pair(&self, user_id: Uuid, email: &str) -> Result<TokenPair, AuthError> {
        let access_token = self
            .codec
            .issue(user_id, email, self.lifetimes.access)
            .map_err(|e| AuthError::Unexpected(e.to_string()))?;
        let refresh_token = self
            .codec
            .issue(user_id, email, self.lifetimes.refresh)
            .map_err(|e| AuthError::Unexpected(e.to_string()))?;

        let refresh_hash = hash_blocking(refresh_token.clone()).await?;
        self.users.set_refresh_hash(user_id, &refresh_hash).await?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }
}

/// Runs Argon2id hashing on the blocking pool
///
/// Hashing is CPU-bound by design; keeping it off the async workers stops a
/// burst of registrations from stalling unrelated requests.
async fn hash_blocking(secret: String) -> Result<String, AuthError> {
    tokio::task::spawn_blocking(move || password::hash_secret(&secret))
        .await
        .map_err(|e| AuthError::Unexpected(format!("Hashing task failed: {}", e)))?
        .map_err(|e| AuthError::Unexpected(e.to_string()))
}

/// Runs Argon2id verification on the blocking pool
async fn verify_blocking(secret: String, hash: String) -> Result<bool, AuthError> {
    tokio::task::spawn_blocking(move || password::verify_secret(&secret, &hash))
        .await
        .map_err(|e| AuthError::Unexpected(format!("Verification task failed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use argon2::password_hash::PasswordHash;

    #[test]
    fn test_unknown_user_hash_is_well_formed() {
        // Must parse as a PHC string: a malformed hash would make
        // verify_secret bail before doing any Argon2 work, and the
        // unknown-email path would be fast again
        let parsed = PasswordHash::new(UNKNOWN_USER_HASH);
        assert!(parsed.is_ok());
    }

    #[test]
    fn test_unknown_user_hash_matches_nothing() {
        assert!(!password::verify_secret("", UNKNOWN_USER_HASH));
        assert!(!password::verify_secret("password-1", UNKNOWN_USER_HASH));
    }
}
