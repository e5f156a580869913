//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::error::AppError;
use crate::state::AppState;

/// Code reserved by the create route; `GET /shorten` resolves it like any other.
const SHORTEN_PATH_CODE: &str = "shorten";

/// Redirects a short code to its long URL.
///
/// # Endpoint
///
/// `GET /{short_code}`
///
/// # Response
///
/// `302 Found` with the long URL in `Location`. Bytes outside visible ASCII
/// are percent-encoded.
///
/// # Errors
///
/// Returns 404 Not Found if the code is unknown or expired: plain text
/// `Url not found` for durable stores, `{"error":"URL not found or expired"}`
/// for expiring stores.
/// Returns 500 Internal Server Error if the store fails.
pub async fn redirect_handler(
    Path(short_code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    redirect_to(&state, &short_code).await
}

/// `GET /shorten`, which shares its path with the create route.
pub async fn shorten_path_redirect_handler(
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    redirect_to(&state, SHORTEN_PATH_CODE).await
}

async fn redirect_to(state: &AppState, short_code: &str) -> Result<Response, AppError> {
    let mapping = state.redirect_service.resolve(short_code).await?;

    Ok((
        StatusCode::FOUND,
        [(header::LOCATION, encode_location(&mapping.long_url))],
    )
        .into_response())
}

/// Percent-encodes every byte outside `0x21..=0x7E` so the URL is always a
/// valid header value. Existing `%XX` escapes are left alone.
fn encode_location(long_url: &str) -> String {
    let mut encoded = String::with_capacity(long_url.len());

    for byte in long_url.bytes() {
        if byte.is_ascii_graphic() {
            encoded.push(char::from(byte));
        } else {
            encoded.push_str(&format!("%{byte:02X}"));
        }
    }

    encoded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_location_keeps_plain_urls() {
        let url = "https://example.com/path?q=1&r=a%20b#frag";
        assert_eq!(encode_location(url), url);
    }

    #[test]
    fn test_encode_location_escapes_controls_and_spaces() {
        assert_eq!(
            encode_location("https://example.com/a\nb c\td"),
            "https://example.com/a%0Ab%20c%09d"
        );
    }

    #[test]
    fn test_encode_location_escapes_non_ascii() {
        assert_eq!(
            encode_location("https://example.com/café"),
            "https://example.com/caf%C3%A9"
        );
    }
}
