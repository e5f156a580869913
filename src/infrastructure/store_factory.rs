//! Opens the mapping store selected by configuration.

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::config::{Config, StoreBackend};
use crate::domain::repositories::MappingStore;
use crate::infrastructure::persistence::{MemoryMappingStore, PgMappingStore, RedisMappingStore};

/// Connects the backend named by `config.store_backend`.
///
/// The returned handle is shared by the services and must be closed with
/// [`MappingStore::close`] on shutdown.
///
/// # Errors
///
/// Returns an error if the connection string is missing or the backend
/// cannot be reached.
pub async fn open_store(config: &Config) -> Result<Arc<dyn MappingStore>> {
    let store: Arc<dyn MappingStore> = match config.store_backend {
        StoreBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL must be set for the postgres backend")?;
            Arc::new(
                PgMappingStore::connect(config, database_url)
                    .await
                    .context("Failed to open PostgreSQL store")?,
            )
        }
        StoreBackend::Redis => {
            let redis_url = config
                .redis_url
                .as_deref()
                .context("REDIS_URL must be set for the redis backend")?;
            Arc::new(
                RedisMappingStore::connect(redis_url, config.default_expiration_seconds)
                    .await
                    .context("Failed to open Redis store")?,
            )
        }
        StoreBackend::Memory if config.memory_ttl => Arc::new(MemoryMappingStore::expiring(
            config.default_expiration_seconds,
        )),
        StoreBackend::Memory => Arc::new(MemoryMappingStore::durable()),
    };

    tracing::info!(
        backend = %config.store_backend,
        variant = store.variant().as_str(),
        "Mapping store opened"
    );

    Ok(store)
}
