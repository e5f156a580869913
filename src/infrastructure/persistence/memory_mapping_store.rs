//! In-process mapping store for development and tests.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

use crate::domain::entities::{NewMapping, UrlMapping};
use crate::domain::repositories::{MappingStore, StoreVariant};
use crate::error::StoreError;

/// How often an expiring store drops expired entries nobody reads.
pub const SWEEP_INTERVAL: Duration = Duration::from_millis(250);

/// Mapping store held in memory using `DashMap`.
///
/// Runs as either variant. Expired entries are never returned. They are
/// removed when read or overwritten, and an expiring store also runs a
/// background sweep every [`SWEEP_INTERVAL`] until [`MappingStore::close`].
/// The long URL index is only maintained for durable stores.
///
/// Lock order is always `by_long_url` before `by_code`.
#[derive(Debug)]
pub struct MemoryMappingStore {
    variant: StoreVariant,
    default_ttl_seconds: u64,
    by_code: Arc<DashMap<String, UrlMapping>>,
    by_long_url: DashMap<String, String>,
    sweeper: Mutex<Option<JoinHandle<()>>>,
}

impl MemoryMappingStore {
    /// Creates a durable store: no TTLs, idempotent creation.
    pub fn durable() -> Self {
        Self::with_variant(StoreVariant::Durable, 0)
    }

    /// Creates an expiring store applying `default_ttl_seconds` when a new
    /// mapping carries no TTL of its own.
    ///
    /// The sweep task is only started when called inside a Tokio runtime.
    pub fn expiring(default_ttl_seconds: u64) -> Self {
        let mut store = Self::with_variant(StoreVariant::Expiring, default_ttl_seconds);

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let task = handle.spawn(sweep(Arc::downgrade(&store.by_code)));
                store.sweeper = Mutex::new(Some(task));
            }
            Err(_) => debug!("No runtime, expired entries are only reclaimed on read"),
        }

        store
    }

    fn with_variant(variant: StoreVariant, default_ttl_seconds: u64) -> Self {
        Self {
            variant,
            default_ttl_seconds,
            by_code: Arc::new(DashMap::new()),
            by_long_url: DashMap::new(),
            sweeper: Mutex::new(None),
        }
    }

    /// Number of entries held, including expired ones not yet reclaimed.
    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }

    fn live(&self, short_code: &str) -> Option<UrlMapping> {
        let mapping = self.by_code.get(short_code)?.value().clone();

        if mapping.is_expired() {
            self.by_code.remove_if(short_code, |_, m| m.is_expired());
            debug!(short_code, "Reclaimed expired mapping");
            return None;
        }

        Some(mapping)
    }

    fn prepare(&self, mut new_mapping: NewMapping) -> UrlMapping {
        match self.variant {
            StoreVariant::Durable => new_mapping.ttl_seconds = None,
            StoreVariant::Expiring => {
                new_mapping.ttl_seconds = new_mapping.ttl_seconds.or(Some(self.default_ttl_seconds));
            }
        }

        UrlMapping::from_new(new_mapping, Utc::now())
    }

    fn put(&self, mapping: UrlMapping) -> Result<UrlMapping, StoreError> {
        match self.by_code.entry(mapping.short_code.clone()) {
            Entry::Occupied(mut slot) => {
                if !slot.get().is_expired() {
                    return Err(StoreError::DuplicateCode(mapping.short_code));
                }
                slot.insert(mapping.clone());
            }
            Entry::Vacant(slot) => {
                slot.insert(mapping.clone());
            }
        }

        Ok(mapping)
    }
}

/// Periodically drops expired entries. Ends once the store is dropped.
async fn sweep(by_code: Weak<DashMap<String, UrlMapping>>) {
    let mut ticker = tokio::time::interval(SWEEP_INTERVAL);

    loop {
        ticker.tick().await;

        let Some(by_code) = by_code.upgrade() else {
            break;
        };

        let before = by_code.len();
        let now = Utc::now();
        by_code.retain(|_, mapping| !mapping.is_expired_at(now));

        let removed = before.saturating_sub(by_code.len());
        if removed > 0 {
            trace!(removed, "Swept expired mappings");
        }
    }
}

impl Default for MemoryMappingStore {
    fn default() -> Self {
        Self::durable()
    }
}

#[async_trait]
impl MappingStore for MemoryMappingStore {
    fn variant(&self) -> StoreVariant {
        self.variant
    }

    async fn find_by_long_url(&self, long_url: &str) -> Result<Option<UrlMapping>, StoreError> {
        if self.variant == StoreVariant::Expiring {
            return Ok(None);
        }

        let Some(short_code) = self.by_long_url.get(long_url).map(|c| c.value().clone()) else {
            return Ok(None);
        };

        Ok(self.live(&short_code))
    }

    async fn find_by_short_code(
        &self,
        short_code: &str,
    ) -> Result<Option<UrlMapping>, StoreError> {
        Ok(self.live(short_code))
    }

    async fn insert(&self, new_mapping: NewMapping) -> Result<UrlMapping, StoreError> {
        let mapping = self.prepare(new_mapping);

        if self.variant == StoreVariant::Expiring {
            return self.put(mapping);
        }

        match self.by_long_url.entry(mapping.long_url.clone()) {
            Entry::Occupied(slot) if self.live(slot.get()).is_some() => {
                Err(StoreError::LongUrlExists(mapping.long_url))
            }
            Entry::Occupied(mut slot) => {
                let mapping = self.put(mapping)?;
                slot.insert(mapping.short_code.clone());
                Ok(mapping)
            }
            Entry::Vacant(slot) => {
                let mapping = self.put(mapping)?;
                slot.insert(mapping.short_code.clone());
                Ok(mapping)
            }
        }
    }

    async fn insert_if_absent(&self, new_mapping: NewMapping) -> Result<UrlMapping, StoreError> {
        if self.variant == StoreVariant::Expiring {
            return self.insert(new_mapping).await;
        }

        let mapping = self.prepare(new_mapping);

        match self.by_long_url.entry(mapping.long_url.clone()) {
            Entry::Occupied(mut slot) => {
                if let Some(existing) = self.live(slot.get()) {
                    debug!(short_code = %existing.short_code, "Reusing existing mapping");
                    return Ok(existing);
                }
                let mapping = self.put(mapping)?;
                slot.insert(mapping.short_code.clone());
                Ok(mapping)
            }
            Entry::Vacant(slot) => {
                let mapping = self.put(mapping)?;
                slot.insert(mapping.short_code.clone());
                Ok(mapping)
            }
        }
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn close(&self) {
        if let Some(task) = self.sweeper.lock().await.take() {
            task.abort();
        }
        debug!(entries = self.by_code.len(), "Closing in-memory store");
    }
}
