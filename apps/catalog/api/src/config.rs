use core_config::catalog::CatalogConfig;
use core_config::database::DatabaseConfig;
use core_config::{server::ServerConfig, FromEnv};

pub use core_config::Environment;

/// Application configuration composed from the shared `core_config` pieces
#[derive(Clone, Debug)]
pub struct Config {
    pub server: ServerConfig,
    /// `None` runs the API against the seeded in-memory store
    pub database: Option<DatabaseConfig>,
    pub catalog: CatalogConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?; // HOST=0.0.0.0, PORT=8080
        let database = DatabaseConfig::from_env_optional()?;
        let catalog = CatalogConfig::from_env()?;

        Ok(Self {
            server,
            database,
            catalog,
            environment,
        })
    }
}
