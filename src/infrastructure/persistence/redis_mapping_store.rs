//! Redis implementation of the mapping store (expiring variant).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info, trace, warn};

use crate::domain::entities::{NewMapping, UrlMapping};
use crate::domain::repositories::{MappingStore, StoreVariant};
use crate::error::StoreError;

/// JSON value stored under each key.
#[derive(Debug, Serialize, Deserialize)]
struct StoredMapping {
    long_url: String,
    created_at: DateTime<Utc>,
    expires_at: Option<DateTime<Utc>>,
}

/// Redis store for TTL-bounded URL mappings.
///
/// Each mapping lives under `url:<short_code>` and is written with
/// `SET NX EX`, so Redis reclaims it once the TTL elapses and a colliding code
/// is rejected atomically. There is no long URL index: every creation mints a
/// fresh code.
///
/// [`MappingStore::close`] drops the connection manager; every later call
/// fails with [`StoreError::Unavailable`].
pub struct RedisMappingStore {
    conn: RwLock<Option<ConnectionManager>>,
    default_ttl: u64,
    key_prefix: String,
}

fn map_redis_error(operation: &str, err: redis::RedisError) -> StoreError {
    StoreError::Unavailable(format!("redis {operation} failed: {err}"))
}

impl RedisMappingStore {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Arguments
    ///
    /// - `redis_url` - Redis connection string (e.g., `"redis://localhost:6379"`)
    /// - `default_ttl_seconds` - TTL applied when a new mapping carries none;
    ///   controlled via `DEFAULT_EXPIRATION`
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the URL is invalid, the connection
    /// cannot be established, or the PING fails.
    pub async fn connect(redis_url: &str, default_ttl_seconds: u64) -> Result<Self, StoreError> {
        let client = Client::open(redis_url).map_err(|e| map_redis_error("client setup", e))?;

        let conn = ConnectionManager::new(client)
            .await
            .map_err(|e| map_redis_error("connect", e))?;

        let store = Self {
            conn: RwLock::new(Some(conn)),
            default_ttl: default_ttl_seconds,
            key_prefix: "url:".to_string(),
        };
        store.ping().await?;

        info!("Connected to Redis");
        Ok(store)
    }

    async fn connection(&self) -> Result<ConnectionManager, StoreError> {
        self.conn
            .read()
            .await
            .clone()
            .ok_or_else(|| StoreError::Unavailable("redis store is closed".to_string()))
    }

    fn build_key(&self, short_code: &str) -> String {
        format!("{}{}", self.key_prefix, short_code)
    }
}

#[async_trait]
impl MappingStore for RedisMappingStore {
    fn variant(&self) -> StoreVariant {
        StoreVariant::Expiring
    }

    async fn find_by_long_url(&self, long_url: &str) -> Result<Option<UrlMapping>, StoreError> {
        trace!(long_url, "Redis store has no long URL index");
        Ok(None)
    }

    async fn find_by_short_code(
        &self,
        short_code: &str,
    ) -> Result<Option<UrlMapping>, StoreError> {
        let key = self.build_key(short_code);
        let mut conn = self.connection().await?;

        let Some(raw) = conn
            .get::<_, Option<String>>(&key)
            .await
            .map_err(|e| map_redis_error("GET", e))?
        else {
            return Ok(None);
        };

        let stored: StoredMapping = serde_json::from_str(&raw).map_err(|e| {
            warn!(short_code, error = %e, "Failed to decode stored mapping");
            StoreError::InvalidData(format!("invalid value for key '{key}': {e}"))
        })?;

        let mapping = UrlMapping::new(
            short_code.to_string(),
            stored.long_url,
            stored.created_at,
            stored.expires_at,
        );

        if mapping.is_expired() {
            debug!(short_code, "Mapping expired but not yet reclaimed");
            return Ok(None);
        }

        Ok(Some(mapping))
    }

    async fn insert(&self, mut new_mapping: NewMapping) -> Result<UrlMapping, StoreError> {
        let ttl = *new_mapping.ttl_seconds.get_or_insert(self.default_ttl);
        let mapping = UrlMapping::from_new(new_mapping, Utc::now());

        let payload = serde_json::to_string(&StoredMapping {
            long_url: mapping.long_url.clone(),
            created_at: mapping.created_at,
            expires_at: mapping.expires_at,
        })
        .map_err(|e| StoreError::InvalidData(e.to_string()))?;

        let key = self.build_key(&mapping.short_code);
        let mut conn = self.connection().await?;

        let reply: Option<String> = redis::cmd("SET")
            .arg(&key)
            .arg(payload)
            .arg("NX")
            .arg("EX")
            .arg(ttl)
            .query_async(&mut conn)
            .await
            .map_err(|e| map_redis_error("SET", e))?;

        if reply.is_none() {
            return Err(StoreError::DuplicateCode(mapping.short_code));
        }

        debug!(short_code = %mapping.short_code, ttl_seconds = ttl, "Stored mapping");
        Ok(mapping)
    }

    async fn insert_if_absent(&self, new_mapping: NewMapping) -> Result<UrlMapping, StoreError> {
        self.insert(new_mapping).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let mut conn = self.connection().await?;
        conn.ping::<()>()
            .await
            .map_err(|e| map_redis_error("PING", e))
    }

    async fn close(&self) {
        if self.conn.write().await.take().is_some() {
            info!("Redis connection released");
        }
    }
}
