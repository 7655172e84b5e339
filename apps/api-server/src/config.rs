//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;

use folio_core::pagination::PaginationConfig;
use folio_infra::DatabaseConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    pub pagination: PaginationConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| {
            let mut config = DatabaseConfig::new(url);
            config.max_connections = parse_var("DB_MAX_CONNECTIONS", config.max_connections);
            config.min_connections = parse_var("DB_MIN_CONNECTIONS", config.min_connections);
            config
        });

        let defaults = PaginationConfig::default();
        let pagination = PaginationConfig {
            default_page_size: parse_var("PAGE_SIZE", defaults.default_page_size),
            max_page_size: parse_var("MAX_PAGE_SIZE", defaults.max_page_size),
        };

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parse_var("PORT", 8080),
            database,
            pagination,
        }
    }
}

/// Read and parse `key`, falling back to `default` when unset or malformed.
fn parse_var<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}
