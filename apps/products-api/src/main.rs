//! Products API - REST server over SQLite

use axum_helpers::{
    create_cors_layer, create_permissive_cors_layer, create_production_app, create_router,
};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::sqlite;
use migration::Migrator;
use std::time::Duration;
use tracing::{info, warn};

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!("Connecting to SQLite at {}", config.database.url());

    let db = sqlite::connect_from_config_with_retry(config.database.clone(), None).await?;
    sqlite::run_migrations::<Migrator>(&db, config.app.name).await?;

    let state = AppState {
        config: config.clone(),
        db,
    };

    let cors = if state.config.cors_allowed_origins.is_empty() {
        warn!("CORS_ALLOWED_ORIGIN not set, allowing any origin");
        create_permissive_cors_layer()
    } else {
        create_cors_layer(state.config.cors_allowed_origins.clone())
    };

    let app = create_router::<openapi::ApiDoc>(api::routes(&state), cors);

    info!(
        "Starting {} v{} on port {}",
        config.app.name, config.app.version, config.server.port
    );

    create_production_app(app, &config.server, Duration::from_secs(30), async move {
        info!("Shutting down: closing SQLite connections");
        match state.db.close().await {
            Ok(()) => info!("SQLite connection closed"),
            Err(e) => warn!("Failed to close SQLite connection: {}", e),
        }
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Products API shutdown complete");
    Ok(())
}
