//! Business logic services for the application layer.

pub mod redirect_service;
pub mod shortening_service;

pub use redirect_service::RedirectService;
pub use shortening_service::{ShortenOutcome, ShorteningService};
