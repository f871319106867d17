use axum_helpers::{JwtAuth, server::create_production_app};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::postgres::{connect_from_config, run_migrations};
use domain_users::{Argon2Hasher, PgUserRepository, UsersService};
use migration::Migrator;
use std::time::Duration;
use tracing::info;

mod api;
mod bootstrap;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    // Initialize tracing with ErrorLayer for span trace capture
    init_tracing(&config.environment);

    match config.etcd.endpoint() {
        Some(endpoint) => info!(%endpoint, "etcd coordination endpoint configured"),
        None => info!("ETCD_HOST not set, running without coordination service"),
    }

    let db = connect_from_config(config.database.clone())
        .await
        .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;

    run_migrations::<Migrator>(&db, "admin_api").await?;

    if let Some(admin) = &config.admin {
        let users = UsersService::new(PgUserRepository::new(db.clone()), Argon2Hasher);
        bootstrap::ensure_admin_user(&users, admin).await?;
    }

    let jwt = JwtAuth::new(&config.jwt);
    let state = AppState { config, db, jwt };

    // Build router with API routes
    let api_routes = api::routes(&state);

    // create_router adds docs/middleware to our composed routes
    let router = axum_helpers::create_router::<openapi::ApiDoc>(api_routes).await?;
    let app = router.merge(api::health_router(state.clone()));

    info!("Starting admin API with production-ready shutdown (30s timeout)");

    let server = state.config.server.clone();
    let db = state.db.clone();
    drop(state);

    create_production_app(
        app,
        &server,
        Duration::from_secs(30),
        async move {
            info!("Shutting down: closing database connections");
            match db.close().await {
                Ok(_) => info!("PostgreSQL connection closed successfully"),
                Err(e) => tracing::error!("Error closing PostgreSQL: {}", e),
            }
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Admin API shutdown complete");
    Ok(())
}
