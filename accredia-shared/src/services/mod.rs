/// Domain services for Accredia
///
/// The services hold every invariant that must never be bypassable: secret
/// handling, token rotation, and the ownership/lifecycle guards. Transports
/// (the HTTP layer) translate their error kinds but add no rules of their
/// own.
///
/// # Modules
///
/// - `auth`: register / login / refresh over the user directory
/// - `accreditations`: ownership- and state-gated mutations of accreditations

pub mod accreditations;
pub mod auth;
