/// Accredia REST API server
///
/// HTTP layer over the shared domain crate. Exposes authentication
/// (register, login, refresh) and the owner-scoped accreditation resource,
/// with a JWT bearer middleware guarding the latter.

pub mod app;
pub mod config;
pub mod error;
pub mod routes;
