//! Handler for link shortening endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::domain::repositories::StoreVariant;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short URL for a long URL.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// # Request Body
///
/// ```json
/// { "longUrl": "https://example.com/a" }
/// ```
///
/// `originalUrl` is accepted in place of `longUrl`. Expiring stores also
/// read an optional `expiration` in seconds.
///
/// # Response
///
/// Durable stores answer `201 Created`:
///
/// ```json
/// { "shortUrl": "http://localhost:3000/AbC123XyZ0" }
/// ```
///
/// Expiring stores answer `200 OK` with the effective TTL:
///
/// ```json
/// { "shortUrl": "http://localhost:3000/AbC123XyZ0", "expirationTime": 3600 }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request (plain text) if the body is malformed or the long
/// URL is missing; the store is not contacted.
/// Returns 500 Internal Server Error (plain text) if the store fails.
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    let Json(payload) = payload.map_err(|rejection| AppError::bad_request(rejection.body_text()))?;
    let (long_url, expiration) = payload.into_parts()?;

    let outcome = state
        .shortening_service
        .shorten(&long_url, expiration)
        .await?;

    let status = match state.shortening_service.variant() {
        StoreVariant::Durable => StatusCode::CREATED,
        StoreVariant::Expiring => StatusCode::OK,
    };

    Ok((
        status,
        Json(ShortenResponse {
            short_url: state.shortening_service.short_url(&outcome.short_code),
            expiration_time: outcome.expiration_seconds,
        }),
    ))
}
