//! PostgreSQL implementation of the mapping store (durable variant).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::Config;
use crate::domain::entities::{NewMapping, UrlMapping};
use crate::domain::repositories::{MappingStore, StoreVariant};
use crate::error::{StoreError, map_sqlx_error};

#[derive(Debug, sqlx::FromRow)]
struct MappingRow {
    short_code: String,
    long_url: String,
    created_at: DateTime<Utc>,
}

impl From<MappingRow> for UrlMapping {
    fn from(row: MappingRow) -> Self {
        UrlMapping::new(row.short_code, row.long_url, row.created_at, None)
    }
}

/// PostgreSQL store for durable URL mappings.
///
/// `short_code` and `long_url` both carry unique constraints. The long URL
/// constraint backs [`MappingStore::insert_if_absent`], which is a single
/// `INSERT ... ON CONFLICT (long_url) DO NOTHING` statement.
pub struct PgMappingStore {
    pool: Arc<PgPool>,
}

impl PgMappingStore {
    /// Creates a new store with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Opens a connection pool using the pool settings from `config` and
    /// applies pending migrations.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or a migration fails.
    pub async fn connect(config: &Config, database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
            .idle_timeout(Duration::from_secs(config.db_idle_timeout))
            .max_lifetime(Duration::from_secs(config.db_max_lifetime))
            .connect(database_url)
            .await?;
        info!("Connected to database");

        sqlx::migrate!("./migrations").run(&pool).await?;
        info!("Migrations applied");

        Ok(Self::new(Arc::new(pool)))
    }

    async fn fetch_by_long_url(&self, long_url: &str) -> Result<Option<UrlMapping>, StoreError> {
        let row = sqlx::query_as::<_, MappingRow>(
            r#"
            SELECT short_code, long_url, created_at
            FROM url_mappings
            WHERE long_url = $1
            "#,
        )
        .bind(long_url)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(|e| map_sqlx_error(e, "", long_url))?;

        Ok(row.map(UrlMapping::from))
    }
}

#[async_trait]
impl MappingStore for PgMappingStore {
    fn variant(&self) -> StoreVariant {
        StoreVariant::Durable
    }

    async fn find_by_long_url(&self, long_url: &str) -> Result<Option<UrlMapping>, StoreError> {
        self.fetch_by_long_url(long_url).await
    }

    async fn find_by_short_code(
        &self,
        short_code: &str,
    ) -> Result<Option<UrlMapping>, StoreError> {
        let row = sqlx::query_as::<_, MappingRow>(
            r#"
            SELECT short_code, long_url, created_at
            FROM url_mappings
            WHERE short_code = $1
            "#,
        )
        .bind(short_code)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(|e| map_sqlx_error(e, short_code, ""))?;

        Ok(row.map(UrlMapping::from))
    }

    async fn insert(&self, new_mapping: NewMapping) -> Result<UrlMapping, StoreError> {
        let row = sqlx::query_as::<_, MappingRow>(
            r#"
            INSERT INTO url_mappings (short_code, long_url)
            VALUES ($1, $2)
            RETURNING short_code, long_url, created_at
            "#,
        )
        .bind(&new_mapping.short_code)
        .bind(&new_mapping.long_url)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(|e| map_sqlx_error(e, &new_mapping.short_code, &new_mapping.long_url))?;

        debug!(short_code = %row.short_code, "Inserted mapping");
        Ok(row.into())
    }

    async fn insert_if_absent(&self, new_mapping: NewMapping) -> Result<UrlMapping, StoreError> {
        let row = sqlx::query_as::<_, MappingRow>(
            r#"
            WITH inserted AS (
                INSERT INTO url_mappings (short_code, long_url)
                VALUES ($1, $2)
                ON CONFLICT (long_url) DO NOTHING
                RETURNING short_code, long_url, created_at
            )
            SELECT short_code, long_url, created_at FROM inserted
            UNION ALL
            SELECT short_code, long_url, created_at FROM url_mappings WHERE long_url = $2
            LIMIT 1
            "#,
        )
        .bind(&new_mapping.short_code)
        .bind(&new_mapping.long_url)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(|e| map_sqlx_error(e, &new_mapping.short_code, &new_mapping.long_url))?;

        if let Some(row) = row {
            return Ok(row.into());
        }

        // The conflicting row was committed after this statement's snapshot was taken.
        self.fetch_by_long_url(&new_mapping.long_url)
            .await?
            .ok_or_else(|| {
                StoreError::Unavailable(format!(
                    "mapping for {} vanished during insert",
                    new_mapping.long_url
                ))
            })
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .map(|_| ())
            .map_err(|e| StoreError::Unavailable(e.to_string()))
    }

    async fn close(&self) {
        self.pool.close().await;
        info!("Database pool closed");
    }
}
