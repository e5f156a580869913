//! URL mapping entity: the association between a short code and its long URL.

use chrono::{DateTime, TimeDelta, Utc};

/// A stored short code to long URL mapping.
///
/// Mappings are never edited. They are created once and either live forever
/// (durable stores) or stop resolving once `expires_at` has passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlMapping {
    pub short_code: String,
    pub long_url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl UrlMapping {
    /// Creates a new mapping instance.
    pub fn new(
        short_code: String,
        long_url: String,
        created_at: DateTime<Utc>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            short_code,
            long_url,
            created_at,
            expires_at,
        }
    }

    /// Materializes a [`NewMapping`] created at `created_at`.
    ///
    /// A TTL too large to be represented as a timestamp leaves the mapping
    /// without an expiry.
    pub fn from_new(new_mapping: NewMapping, created_at: DateTime<Utc>) -> Self {
        let expires_at = new_mapping
            .ttl_seconds
            .and_then(|ttl| i64::try_from(ttl).ok())
            .and_then(TimeDelta::try_seconds)
            .and_then(|ttl| created_at.checked_add_signed(ttl));

        Self::new(
            new_mapping.short_code,
            new_mapping.long_url,
            created_at,
            expires_at,
        )
    }

    /// Returns true once the mapping has passed its expiry time.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Returns true if the mapping is expired at the given instant.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|e| now >= e)
    }
}

/// Input data for creating a new mapping.
///
/// `ttl_seconds` is only honoured by expiring stores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMapping {
    pub short_code: String,
    pub long_url: String,
    pub ttl_seconds: Option<u64>,
}

impl NewMapping {
    pub fn durable(short_code: String, long_url: String) -> Self {
        Self {
            short_code,
            long_url,
            ttl_seconds: None,
        }
    }

    pub fn expiring(short_code: String, long_url: String, ttl_seconds: u64) -> Self {
        Self {
            short_code,
            long_url,
            ttl_seconds: Some(ttl_seconds),
        }
    }
}
