/// JWT token codec for authentication
///
/// This module creates and parses the signed, time-bounded claim sets the
/// service hands out as access and refresh tokens. Tokens are signed with
/// HS256 (HMAC-SHA256) and carry the subject id, email, and lifetimes.
///
/// # Token Types
///
/// Access and refresh tokens are structurally identical, encoding
/// `{sub, email, iat, exp, jti}`, and differ only in lifetime (short-lived access,
/// long-lived refresh). A refresh token additionally has to match the hash
/// the server stores for its subject, which is enforced by the auth service,
/// not here.
///
/// # Security
///
/// - **Algorithm**: HS256 (HMAC with SHA-256)
/// - **Secret Management**: the signing secret is injected at construction;
///   there is no ambient/static key. Secrets should be at least 32 bytes.
/// - **Validation**: signature and expiration checks
///
/// # Example
///
/// ```
/// use accredia_shared::auth::jwt::TokenCodec;
/// use chrono::Duration;
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let codec = TokenCodec::new("test-secret-key-at-least-32-bytes-long");
/// let user_id = Uuid::new_v4();
///
/// let token = codec.issue(user_id, "user@example.com", Duration::minutes(10))?;
/// let claims = codec.verify(&token)?;
/// assert_eq!(claims.sub, user_id);
/// # Ok(())
/// # }
/// ```

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Error type for token operations
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    /// Failed to create a token
    #[error("Failed to create token: {0}")]
    CreateError(String),

    /// Token has expired
    #[error("Token has expired")]
    Expired,

    /// Signature invalid, claims malformed, or any other validation failure
    #[error("Invalid token: {0}")]
    InvalidToken(String),
}

/// Signed claim set carried by access and refresh tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - user ID
    pub sub: Uuid,

    /// Email address of the subject
    pub email: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Token ID
    ///
    /// `iat` has second granularity, so without this two tokens issued for
    /// the same subject within a second would be byte-identical. The id
    /// keeps every issued token distinct, which refresh rotation relies on.
    pub jti: Uuid,
}

impl Claims {
    /// Creates claims for `subject` expiring `lifetime` from now
    pub fn new(subject: Uuid, email: &str, lifetime: Duration) -> Self {
        let now = Utc::now();

        Self {
            sub: subject,
            email: email.to_string(),
            iat: now.timestamp(),
            exp: (now + lifetime).timestamp(),
            jti: Uuid::new_v4(),
        }
    }

    /// Checks if the claim set has expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// Codec for issuing and verifying signed tokens
///
/// Holds the process-wide signing secret as an explicit value. Clone is cheap
/// and every clone shares the same key material.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenCodec {
    /// Creates a codec from the signing secret
    ///
    /// The secret should be at least 32 bytes (256 bits) for HS256, randomly
    /// generated, and supplied via configuration, never hard-coded.
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Issues a signed token for `subject` with the given lifetime
    ///
    /// Two calls with different lifetimes produce the access and refresh
    /// tokens of a pair; they are otherwise structurally identical.
    ///
    /// # Errors
    ///
    /// Returns `JwtError::CreateError` if encoding fails.
    pub fn issue(
        &self,
        subject: Uuid,
        email: &str,
        lifetime: Duration,
    ) -> Result<String, JwtError> {
        let claims = Claims::new(subject, email, lifetime);
        let header = Header::new(Algorithm::HS256);

        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| JwtError::CreateError(format!("Token encoding failed: {}", e)))
    }

    /// Verifies a token and extracts its claims
    ///
    /// Checks the HS256 signature and the expiration time.
    ///
    /// # Errors
    ///
    /// - `JwtError::Expired` when the token is past its `exp`
    /// - `JwtError::InvalidToken` for a bad signature or malformed token
    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
                    _ => JwtError::InvalidToken(format!("Token validation failed: {}", e)),
                }
            })?;

        Ok(token_data.claims)
    }

    /// Extracts the subject claim without verifying signature or expiry
    ///
    /// Used only to look up which user a refresh attempt claims to be. The
    /// result is NEVER trusted for authorization; the presented token still
    /// has to match the refresh-token hash stored for that user.
    ///
    /// Returns `None` when the token cannot be parsed at all.
    pub fn decode_subject_unverified(&self, token: &str) -> Option<Uuid> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation)
            .ok()
            .map(|data| data.claims.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-at-least-32-bytes-long";

    #[test]
    fn test_claims_creation() {
        let user_id = Uuid::new_v4();
        let claims = Claims::new(user_id, "a@x.com", Duration::minutes(10));

        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.email, "a@x.com");
        assert!(!claims.is_expired());
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_issue_and_verify() {
        let codec = TokenCodec::new(SECRET);
        let user_id = Uuid::new_v4();

        let token = codec
            .issue(user_id, "user@example.com", Duration::minutes(10))
            .expect("Should issue token");

        let claims = codec.verify(&token).expect("Should verify token");
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.email, "user@example.com");
    }

    #[test]
    fn test_verify_with_wrong_secret() {
        let codec = TokenCodec::new(SECRET);
        let other = TokenCodec::new("a-completely-different-signing-secret!!");

        let token = codec
            .issue(Uuid::new_v4(), "a@x.com", Duration::minutes(10))
            .unwrap();

        let result = other.verify(&token);
        assert!(matches!(result, Err(JwtError::InvalidToken(_))));
    }

    #[test]
    fn test_verify_expired_token() {
        let codec = TokenCodec::new(SECRET);

        // Negative lifetime = already expired
        let token = codec
            .issue(Uuid::new_v4(), "a@x.com", Duration::seconds(-3600))
            .unwrap();

        let result = codec.verify(&token);
        assert!(matches!(result, Err(JwtError::Expired)));
    }

    #[test]
    fn test_verify_garbage_token() {
        let codec = TokenCodec::new(SECRET);
        assert!(matches!(
            codec.verify("not-a-jwt"),
            Err(JwtError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_access_and_refresh_differ_only_in_lifetime() {
        let codec = TokenCodec::new(SECRET);
        let user_id = Uuid::new_v4();

        let access = codec
            .issue(user_id, "a@x.com", Duration::minutes(10))
            .unwrap();
        let refresh = codec.issue(user_id, "a@x.com", Duration::days(7)).unwrap();

        let access_claims = codec.verify(&access).unwrap();
        let refresh_claims = codec.verify(&refresh).unwrap();

        assert_eq!(access_claims.sub, refresh_claims.sub);
        assert_eq!(access_claims.email, refresh_claims.email);
        assert!(refresh_claims.exp > access_claims.exp);
    }

    #[test]
    fn test_tokens_are_never_identical() {
        let codec = TokenCodec::new(SECRET);
        let user_id = Uuid::new_v4();

        // Same subject, same lifetime, same second: the token id still makes
        // the two distinct
        let first = codec.issue(user_id, "a@x.com", Duration::days(7)).unwrap();
        let second = codec.issue(user_id, "a@x.com", Duration::days(7)).unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn test_decode_subject_unverified() {
        let codec = TokenCodec::new(SECRET);
        let user_id = Uuid::new_v4();

        // Subject is recoverable even when the verifying codec has a
        // different secret and the token is expired
        let other = TokenCodec::new("a-completely-different-signing-secret!!");
        let token = codec
            .issue(user_id, "a@x.com", Duration::seconds(-60))
            .unwrap();

        assert_eq!(other.decode_subject_unverified(&token), Some(user_id));
    }

    #[test]
    fn test_decode_subject_unverified_garbage() {
        let codec = TokenCodec::new(SECRET);
        assert_eq!(codec.decode_subject_unverified("invalid-token"), None);
        assert_eq!(codec.decode_subject_unverified(""), None);
    }
}
