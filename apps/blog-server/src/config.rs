//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use blog_infra::DatabaseConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// `None` runs the blog on the in-memory store.
    pub database: Option<DatabaseConfig>,
    /// Directory whose `*.html` files override the built-in templates.
    pub templates_dir: Option<PathBuf>,
}

fn parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.parse().ok())
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| {
            let mut database = DatabaseConfig::new(url);
            if let Some(max) = parsed("DB_MAX_CONNECTIONS") {
                database.max_connections = max;
            }
            if let Some(min) = parsed("DB_MIN_CONNECTIONS") {
                database.min_connections = min;
            }
            database
        });

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parsed("PORT").unwrap_or(8080),
            database,
            templates_dir: env::var("TEMPLATES_DIR").ok().map(PathBuf::from),
        }
    }
}
