/// HTTP route handlers

pub mod accreditations;
pub mod auth;
pub mod health;
