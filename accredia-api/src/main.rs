/// Accredia API server entry point
///
/// Loads configuration, connects to PostgreSQL, runs migrations, wires the
/// domain services to their PostgreSQL stores, and serves the router until
/// the process receives Ctrl+C.

use accredia_api::{
    app::{build_router, AppState},
    config::Config,
};
use accredia_shared::{
    auth::jwt::TokenCodec,
    db::{migrations::run_migrations, pool},
    services::{accreditations::AccreditationsService, auth::AuthService},
    store::postgres::{PgAccreditationStore, PgUserDirectory},
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,accredia_api=debug")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    info!("Configuration loaded");

    let db_config = pool::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    };
    let db_pool = pool::create_pool(db_config).await?;

    run_migrations(&db_pool).await?;

    let codec = TokenCodec::new(&config.jwt.secret);
    let users = Arc::new(PgUserDirectory::new(db_pool.clone()));
    let accreditation_store = Arc::new(PgAccreditationStore::new(db_pool.clone()));

    let auth = Arc::new(AuthService::new(
        users,
        codec.clone(),
        config.token_lifetimes(),
    ));
    let accreditations = Arc::new(AccreditationsService::new(accreditation_store));

    let bind_address = config.bind_address();
    let state = AppState::new(auth, accreditations, codec, config);
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!(address = %bind_address, "API server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool::close_pool(db_pool).await;
    info!("Server shut down");

    Ok(())
}

/// Resolves when the process receives Ctrl+C
async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", err);
        return;
    }
    info!("Shutdown signal received");
}
