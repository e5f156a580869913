//! DTOs for the shortening endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, MISSING_LONG_URL};

/// Request to shorten a long URL.
///
/// Accepts `longUrl` or `originalUrl` for the target, and an optional
/// `expiration` in seconds honoured by expiring stores.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShortenRequest {
    #[serde(alias = "originalUrl")]
    #[validate(
        required(message = "Please provide a long URL"),
        length(min = 1, message = "Please provide a long URL")
    )]
    pub long_url: Option<String>,

    /// Bounds are checked by the shortening service, since durable stores
    /// ignore the field.
    pub expiration: Option<u64>,
}

impl ShortenRequest {
    /// Validates the request and returns the long URL and requested expiration.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the long URL is missing or empty.
    pub fn into_parts(self) -> Result<(String, Option<u64>), AppError> {
        self.validate()?;

        let long_url = self
            .long_url
            .ok_or_else(|| AppError::bad_request(MISSING_LONG_URL))?;

        Ok((long_url, self.expiration))
    }
}

/// Response carrying the composed short URL.
///
/// `expirationTime` is only present for expiring stores.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenResponse {
    pub short_url: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_time: Option<u64>,
}
