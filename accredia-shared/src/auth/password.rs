/// Secret hashing module using Argon2id
///
/// This module provides one-way hashing for every secret the service stores:
/// user passwords and refresh tokens alike. Hashes are produced with Argon2id,
/// the recommended algorithm for password hashing (winner of the Password
/// Hashing Competition).
///
/// # Security
///
/// - **Algorithm**: Argon2id (hybrid of Argon2i and Argon2d)
/// - **Memory**: 64 MB (65536 KB)
/// - **Iterations**: 3 passes
/// - **Parallelism**: 4 lanes
/// - **Output**: 32-byte hash
///
/// The PHC string output encodes the algorithm, parameters, and salt, so a
/// stored hash is self-contained for later verification.
///
/// # Example
///
/// ```
/// use accredia_shared::auth::password::{hash_secret, verify_secret};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_secret("super_secret_password_123")?;
///
/// assert!(verify_secret("super_secret_password_123", &hash));
/// assert!(!verify_secret("wrong_password", &hash));
/// # Ok(())
/// # }
/// ```

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, ParamsBuilder, Version,
};

/// Error type for secret hashing operations
///
/// Only hashing can fail. Verification never fails the caller: a malformed
/// or mismatched hash simply verifies as `false`.
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    /// Failed to hash the secret
    #[error("Failed to hash secret: {0}")]
    HashError(String),
}

/// Hashes a secret using Argon2id with a fresh random salt
///
/// The same function covers passwords and refresh tokens; the work factor is
/// adjustable through the parameters below.
///
/// # Arguments
///
/// * `secret` - The plaintext secret to hash
///
/// # Returns
///
/// PHC string format hash (includes algorithm, parameters, salt, and hash):
///
/// ```text
/// $argon2id$v=19$m=65536,t=3,p=4$c2FsdHNhbHRzYWx0$hash...
/// ```
///
/// # Errors
///
/// Returns `PasswordError::HashError` if hashing fails. Hashing failures are
/// infrastructure failures and propagate to the caller.
pub fn hash_secret(secret: &str) -> Result<String, PasswordError> {
    // Fresh random salt per hash, so identical secrets never share output
    let salt = SaltString::generate(&mut OsRng);

    let params = ParamsBuilder::new()
        .m_cost(65536) // 64 MB
        .t_cost(3)
        .p_cost(4)
        .output_len(32)
        .build()
        .map_err(|e| PasswordError::HashError(format!("Invalid parameters: {}", e)))?;

    let argon2 = Argon2::new(argon2::Algorithm::Argon2id, Version::V0x13, params);

    let hash = argon2
        .hash_password(secret.as_bytes(), &salt)
        .map_err(|e| PasswordError::HashError(format!("Hash generation failed: {}", e)))?;

    Ok(hash.to_string())
}

/// Verifies a secret against a stored hash
///
/// Recomputes the hash using the salt and parameters embedded in the PHC
/// string and compares in constant time.
///
/// Verification never errors: a malformed hash, a wrong secret, or any other
/// failure all yield `false`. Callers decide what a `false` means (invalid
/// credentials, access denied) without seeing the underlying cause.
///
/// # Example
///
/// ```
/// use accredia_shared::auth::password::verify_secret;
///
/// // Malformed stored hash is a plain mismatch, never a panic or error
/// assert!(!verify_secret("anything", "not-a-phc-string"));
/// ```
pub fn verify_secret(secret: &str, hash: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(hash) else {
        return false;
    };

    // Parameters are embedded in the hash, the default instance reads them
    Argon2::default()
        .verify_password(secret.as_bytes(), &parsed_hash)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_secret_encodes_parameters() {
        let hash = hash_secret("test_password_123").expect("Hash should succeed");

        assert!(hash.starts_with("$argon2id$"));
        assert!(hash.contains("v=19"));
        assert!(hash.contains("m=65536"));
        assert!(hash.contains("t=3"));
        assert!(hash.contains("p=4"));
    }

    #[test]
    fn test_hash_secret_produces_different_salts() {
        let hash1 = hash_secret("same_secret").expect("Hash 1 should succeed");
        let hash2 = hash_secret("same_secret").expect("Hash 2 should succeed");

        // Different salts = different hashes
        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_verify_secret_correct() {
        let hash = hash_secret("correct_password").expect("Hash should succeed");
        assert!(verify_secret("correct_password", &hash));
    }

    #[test]
    fn test_verify_secret_incorrect() {
        let hash = hash_secret("correct_password").expect("Hash should succeed");
        assert!(!verify_secret("wrong_password", &hash));
    }

    #[test]
    fn test_verify_secret_empty() {
        let hash = hash_secret("password").expect("Hash should succeed");
        assert!(!verify_secret("", &hash));
    }

    #[test]
    fn test_verify_secret_malformed_hash_is_false() {
        // Malformed hashes must not error, only fail verification
        assert!(!verify_secret("password", "invalid_hash"));
        assert!(!verify_secret("password", "$argon2id$invalid"));
        assert!(!verify_secret("password", ""));
    }

    #[test]
    fn test_hash_verify_roundtrip() {
        let secrets = vec![
            "simple",
            "with spaces",
            "with-special-chars!@#$%",
            "unicode-密码-パスワード",
            "eyJhbGciOiJIUzI1NiJ9.a-refresh-token-shaped-secret.signature",
        ];

        for secret in secrets {
            let hash = hash_secret(secret).expect("Hash should succeed");
            assert!(verify_secret(secret, &hash), "Secret '{}' should verify", secret);
        }
    }
}
