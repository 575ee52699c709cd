//! # Accredia Shared Library
//!
//! Domain core of the Accredia service: credential-based authentication with
//! rotating refresh tokens, and ownership/lifecycle guards over user-owned
//! accreditations. The HTTP surface lives in the `accredia-api` crate and
//! only translates what this crate decides.
//!
//! ## Module Organization
//!
//! - `auth`: secret hashing and the JWT token codec
//! - `models`: persisted records and their sqlx CRUD operations
//! - `store`: narrow storage collaborator traits plus Postgres and in-memory
//!   implementations
//! - `services`: the auth and accreditation services holding the invariants
//! - `db`: connection pool and migration runner

pub mod auth;
pub mod db;
pub mod models;
pub mod services;
pub mod store;

/// Current version of the Accredia shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
