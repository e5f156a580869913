//! API route configuration.

use crate::api::handlers::{redirect_handler, shorten_handler, shorten_path_redirect_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// The two public endpoints.
///
/// # Endpoints
///
/// - `POST /shorten`       - Create a short URL
/// - `GET  /{short_code}`  - Redirect to the long URL
///
/// `GET /shorten` is resolved as the code `shorten`.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/shorten",
            post(shorten_handler).get(shorten_path_redirect_handler),
        )
        .route("/{short_code}", get(redirect_handler))
}
