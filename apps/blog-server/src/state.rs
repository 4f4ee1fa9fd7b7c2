//! Application state - shared across all handlers.

use std::sync::Arc;

use blog_core::BlogQueries;
use blog_infra::{DatabaseConfig, InMemoryStore};

#[cfg(feature = "postgres")]
use anyhow::Context;
#[cfg(feature = "postgres")]
use blog_infra::{PostgresCategoryRepository, PostgresPostRepository, database};

use crate::templates::Templates;

/// Where posts and categories are read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl StorageBackend {
    pub fn as_str(self) -> &'static str {
        match self {
            StorageBackend::Postgres => "postgres",
            StorageBackend::Memory => "memory",
        }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub blog: BlogQueries,
    pub templates: Arc<Templates>,
    pub storage: StorageBackend,
}

impl AppState {
    /// Build the application state. Without a database URL the blog runs on an
    /// empty in-memory store; a configured database that cannot be reached is
    /// a startup error.
    pub async fn new(
        db_config: Option<&DatabaseConfig>,
        templates: Templates,
    ) -> anyhow::Result<Self> {
        #[cfg(feature = "postgres")]
        {
            if let Some(config) = db_config {
                let conn = database::connect(config)
                    .await
                    .context("failed to connect to database")?;
                let blog = BlogQueries::new(
                    Arc::new(PostgresPostRepository::new(conn.clone())),
                    Arc::new(PostgresCategoryRepository::new(conn)),
                );
                tracing::info!("Application state initialized");
                return Ok(Self {
                    blog,
                    templates: Arc::new(templates),
                    storage: StorageBackend::Postgres,
                });
            }
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
        }

        #[cfg(not(feature = "postgres"))]
        {
            if db_config.is_some() {
                tracing::warn!("Built without postgres feature - ignoring DATABASE_URL");
            }
        }

        tracing::info!("Application state initialized");
        Ok(Self::in_memory(&InMemoryStore::new(), templates))
    }

    /// State reading from the given in-memory store.
    pub fn in_memory(store: &InMemoryStore, templates: Templates) -> Self {
        Self {
            blog: BlogQueries::new(
                Arc::new(store.post_repository()),
                Arc::new(store.category_repository()),
            ),
            templates: Arc::new(templates),
            storage: StorageBackend::Memory,
        }
    }
}
