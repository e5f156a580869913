//! Short link creation.

use std::sync::Arc;
use tracing::{debug, info};

use crate::domain::entities::NewMapping;
use crate::domain::repositories::{MappingStore, StoreVariant};
use crate::error::{AppError, MISSING_LONG_URL};
use crate::utils::code_generator::CodeGenerator;

/// Upper bound on a requested TTL (ten years).
pub const MAX_EXPIRATION_SECONDS: u64 = 315_360_000;

/// Message returned when a requested TTL exceeds [`MAX_EXPIRATION_SECONDS`].
pub const EXPIRATION_TOO_LONG: &str = "expiration must not exceed ten years";

/// Outcome of a shortening request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortenOutcome {
    pub short_code: String,
    /// Effective TTL in seconds; `None` for durable stores.
    pub expiration_seconds: Option<u64>,
    /// `false` when an existing mapping was reused.
    pub created: bool,
}

/// Service for turning long URLs into short codes.
///
/// Behaviour follows the store variant:
///
/// - **Durable**: an existing mapping for the same long URL is reused.
///   Concurrent requests for the same URL converge on one mapping through
///   [`MappingStore::insert_if_absent`].
/// - **Expiring**: every request mints a fresh code stored with a TTL.
///
/// A generated code that collides is reported as
/// [`crate::error::StoreError::DuplicateCode`]; it is not regenerated.
pub struct ShorteningService {
    store: Arc<dyn MappingStore>,
    generator: CodeGenerator,
    default_ttl_seconds: u64,
    base_url: String,
}

impl ShorteningService {
    /// Creates a new shortening service.
    pub fn new(
        store: Arc<dyn MappingStore>,
        generator: CodeGenerator,
        default_ttl_seconds: u64,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            store,
            generator,
            default_ttl_seconds,
            base_url: base_url.into(),
        }
    }

    pub fn variant(&self) -> StoreVariant {
        self.store.variant()
    }

    /// Returns a short code for `long_url`.
    ///
    /// `expiration` is honoured by expiring stores only; absent or zero falls
    /// back to the configured default. Durable stores ignore it entirely.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `long_url` is empty, or an expiring
    /// store is asked for more than [`MAX_EXPIRATION_SECONDS`].
    /// Returns [`AppError::Store`] if the store fails.
    pub async fn shorten(
        &self,
        long_url: &str,
        expiration: Option<u64>,
    ) -> Result<ShortenOutcome, AppError> {
        if long_url.is_empty() {
            return Err(AppError::bad_request(MISSING_LONG_URL));
        }

        match self.store.variant() {
            StoreVariant::Durable => self.shorten_durable(long_url).await,
            StoreVariant::Expiring => self.shorten_expiring(long_url, expiration).await,
        }
    }

    async fn shorten_durable(&self, long_url: &str) -> Result<ShortenOutcome, AppError> {
        if let Some(existing) = self.store.find_by_long_url(long_url).await? {
            debug!(short_code = %existing.short_code, "Reusing existing mapping");
            return Ok(ShortenOutcome {
                short_code: existing.short_code,
                expiration_seconds: None,
                created: false,
            });
        }

        let code = self.generator.generate();
        let mapping = self
            .store
            .insert_if_absent(NewMapping::durable(code.clone(), long_url.to_string()))
            .await?;

        let created = mapping.short_code == code;
        if created {
            info!(short_code = %mapping.short_code, long_url, "Created mapping");
        }

        Ok(ShortenOutcome {
            short_code: mapping.short_code,
            expiration_seconds: None,
            created,
        })
    }

    async fn shorten_expiring(
        &self,
        long_url: &str,
        expiration: Option<u64>,
    ) -> Result<ShortenOutcome, AppError> {
        if expiration.is_some_and(|seconds| seconds > MAX_EXPIRATION_SECONDS) {
            return Err(AppError::bad_request(EXPIRATION_TOO_LONG));
        }

        let ttl = self.effective_ttl(expiration);
        let code = self.generator.generate();

        let mapping = self
            .store
            .insert(NewMapping::expiring(code, long_url.to_string(), ttl))
            .await?;

        info!(
            short_code = %mapping.short_code,
            long_url,
            ttl_seconds = ttl,
            "Created expiring mapping"
        );

        Ok(ShortenOutcome {
            short_code: mapping.short_code,
            expiration_seconds: Some(ttl),
            created: true,
        })
    }

    /// Resolves the TTL for a request: the explicit value, or the default when
    /// absent or zero.
    pub fn effective_ttl(&self, expiration: Option<u64>) -> u64 {
        expiration
            .filter(|&seconds| seconds > 0)
            .unwrap_or(self.default_ttl_seconds)
    }

    /// Builds the public short URL for a code.
    pub fn short_url(&self, short_code: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), short_code)
    }
}
