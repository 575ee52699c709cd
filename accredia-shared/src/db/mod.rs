/// Database layer for Accredia
///
/// # Modules
///
/// - `pool`: PostgreSQL connection pool management with health checks
/// - `migrations`: sqlx migration runner over `migrations/`
///
/// Models live in the `models` module at the crate root; the services reach
/// them through the `store` traits rather than this module.

pub mod migrations;
pub mod pool;
