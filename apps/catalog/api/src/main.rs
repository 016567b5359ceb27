use core_config::tracing::{init_tracing, install_color_eyre};
use domain_catalog::{InMemoryCatalogStore, PgCatalogStore};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database};
use std::sync::Arc;
use tracing::{info, warn};

mod app;
mod config;
mod openapi;

use config::Config;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    let config = Config::from_env()?;

    init_tracing(&config.environment);

    let router = match &config.database {
        Some(database) => {
            info!("Connecting to PostgreSQL");
            let mut options = ConnectOptions::new(database.url.clone());
            options
                .max_connections(database.max_connections)
                .sqlx_logging(true);
            let db = Database::connect(options)
                .await
                .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;

            Migrator::up(&db, None)
                .await
                .map_err(|e| eyre::eyre!("Migration failed: {}", e))?;
            info!("Migrations applied");

            app::build(Arc::new(PgCatalogStore::new(db)), &config.catalog)
        }
        None => {
            warn!("DATABASE_URL not set, serving the seeded in-memory catalog");
            let store = InMemoryCatalogStore::seeded()
                .map_err(|e| eyre::eyre!("Failed to seed catalog: {}", e))?;
            app::build(Arc::new(store), &config.catalog)
        }
    };

    let addr = config.server.socket_addr()?;
    axum_helpers::serve(router, addr)
        .await
        .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Catalog API shutdown complete");
    Ok(())
}
