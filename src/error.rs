//! Error types for the store layer and the HTTP front end.
//!
//! [`StoreError`] is produced by every [`crate::domain::repositories::MappingStore`]
//! backend. [`AppError`] is what handlers return; its [`IntoResponse`] impl
//! normalizes every failure into a client (4xx) or server (5xx) response while
//! passing the underlying message through.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use validator::ValidationErrors;

use crate::domain::repositories::StoreVariant;

/// Message returned when a create request carries no long URL.
pub const MISSING_LONG_URL: &str = "Please provide a long URL";

/// Failures raised by a mapping store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The backing store is unreachable or the operation failed.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// A live mapping already uses the short code.
    #[error("short code already exists: {0}")]
    DuplicateCode(String),

    /// A mapping already exists for the long URL (plain insert into a durable store).
    #[error("long url is already mapped: {0}")]
    LongUrlExists(String),

    /// A stored value could not be decoded.
    #[error("stored mapping is invalid: {0}")]
    InvalidData(String),
}

/// HTTP-facing application error.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Missing or malformed client input. Never reaches the store.
    #[error("{0}")]
    Validation(String),

    /// The short code is unknown (or expired for expiring stores).
    #[error("{}", not_found_message(.0))]
    NotFound(StoreVariant),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(variant: StoreVariant) -> Self {
        Self::NotFound(variant)
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

fn not_found_message(variant: &StoreVariant) -> &'static str {
    match variant {
        StoreVariant::Durable => "Url not found",
        StoreVariant::Expiring => "URL not found or expired",
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match self {
            AppError::Validation(message) => (status, message).into_response(),
            AppError::NotFound(StoreVariant::Durable) => {
                (status, not_found_message(&StoreVariant::Durable)).into_response()
            }
            AppError::NotFound(StoreVariant::Expiring) => (
                status,
                Json(json!({ "error": not_found_message(&StoreVariant::Expiring) })),
            )
                .into_response(),
            AppError::Store(err) => {
                tracing::error!(error = %err, "Store operation failed");
                (status, err.to_string()).into_response()
            }
        }
    }
}

/// Field whose message wins when several fields fail.
const PRIMARY_FIELD: &str = "long_url";

impl From<ValidationErrors> for AppError {
    /// Uses the first field message, taking `long_url` first and the rest by
    /// field name.
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|(a, _), (b, _)| (*a != PRIMARY_FIELD, a).cmp(&(*b != PRIMARY_FIELD, b)));

        let message = fields
            .iter()
            .flat_map(|(_, errs)| errs.iter())
            .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| errors.to_string());

        AppError::Validation(message)
    }
}

/// Maps a SQLx error into a [`StoreError`].
///
/// Unique violations are told apart by constraint name so that a colliding
/// short code surfaces as [`StoreError::DuplicateCode`].
pub fn map_sqlx_error(e: sqlx::Error, short_code: &str, long_url: &str) -> StoreError {
    if let Some(db) = e.as_database_error()
        && db.is_unique_violation()
    {
        return match db.constraint() {
            Some("url_mappings_long_url_key") => StoreError::LongUrlExists(long_url.to_string()),
            _ => StoreError::DuplicateCode(short_code.to_string()),
        };
    }

    let message = e.to_string();
    match e {
        sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::Decode(_) => StoreError::InvalidData(message),
        _ => StoreError::Unavailable(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::bad_request("x").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::not_found(StoreVariant::Durable).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::from(StoreError::Unavailable("down".to_string())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::from(StoreError::DuplicateCode("abc".to_string())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_not_found_message_per_variant() {
        assert_eq!(
            AppError::not_found(StoreVariant::Durable).to_string(),
            "Url not found"
        );
        assert_eq!(
            AppError::not_found(StoreVariant::Expiring).to_string(),
            "URL not found or expired"
        );
    }

    #[test]
    fn test_store_error_message_passes_through() {
        let err = AppError::from(StoreError::Unavailable("connection refused".to_string()));
        assert_eq!(err.to_string(), "store unavailable: connection refused");
    }

    #[test]
    fn test_sqlx_pool_errors_are_unavailable() {
        let err = map_sqlx_error(sqlx::Error::PoolTimedOut, "code", "https://example.com");
        assert!(matches!(err, StoreError::Unavailable(_)));
    }

    #[derive(Validate)]
    struct SingleField {
        #[validate(length(min = 1, message = "must not be empty"))]
        value: String,
    }

    #[derive(Validate)]
    struct TwoFields {
        #[validate(length(min = 1, message = "long url missing"))]
        long_url: String,
        #[validate(range(max = 10, message = "expiration too large"))]
        expiration: u64,
        #[validate(length(min = 1, message = "alias missing"))]
        alias: String,
    }

    #[test]
    fn test_validation_message_prefers_long_url() {
        for _ in 0..32 {
            let request = TwoFields {
                long_url: String::new(),
                expiration: 11,
                alias: String::new(),
            };
            let err = AppError::from(request.validate().unwrap_err());

            assert!(matches!(err, AppError::Validation(ref m) if m == "long url missing"));
        }
    }

    #[test]
    fn test_validation_message_falls_back_to_field_order() {
        for _ in 0..32 {
            let request = TwoFields {
                long_url: "https://example.com".to_string(),
                expiration: 11,
                alias: String::new(),
            };
            let err = AppError::from(request.validate().unwrap_err());

            assert!(matches!(err, AppError::Validation(ref m) if m == "alias missing"));
        }
    }

    #[test]
    fn test_validation_errors_use_field_message() {
        let request = SingleField {
            value: String::new(),
        };
        let err = AppError::from(request.validate().unwrap_err());

        assert!(matches!(err, AppError::Validation(ref m) if m == "must not be empty"));
    }
}
