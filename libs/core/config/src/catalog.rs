use crate::{env_parse_or, ConfigError, FromEnv};
use std::time::Duration;

/// Tunables for the catalog services and their HTTP surface
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Page size used when a listing request omits `size`
    pub default_page_size: u64,
    /// Largest page size a caller may request
    pub max_page_size: u64,
    /// Minimum number of characters a user password must have
    pub min_password_length: usize,
    /// Upper bound for a single HTTP request
    pub request_timeout: Duration,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            default_page_size: 12,
            max_page_size: 100,
            min_password_length: 8,
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl FromEnv for CatalogConfig {
    /// Reads from environment variables with defaults:
    /// - CATALOG_DEFAULT_PAGE_SIZE: 12
    /// - CATALOG_MAX_PAGE_SIZE: 100
    /// - CATALOG_MIN_PASSWORD_LENGTH: 8
    /// - REQUEST_TIMEOUT_SECS: 30
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let default_page_size =
            env_parse_or("CATALOG_DEFAULT_PAGE_SIZE", defaults.default_page_size)?;
        let max_page_size = env_parse_or("CATALOG_MAX_PAGE_SIZE", defaults.max_page_size)?;
        let min_password_length =
            env_parse_or("CATALOG_MIN_PASSWORD_LENGTH", defaults.min_password_length)?;
        let timeout_secs =
            env_parse_or("REQUEST_TIMEOUT_SECS", defaults.request_timeout.as_secs())?;

        if default_page_size == 0 || default_page_size > max_page_size {
            return Err(ConfigError::ParseError {
                key: "CATALOG_DEFAULT_PAGE_SIZE".to_string(),
                details: format!("must be between 1 and {}", max_page_size),
            });
        }

        Ok(Self {
            default_page_size,
            max_page_size,
            min_password_length,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }
}
