//! Application layer services implementing business logic.
//!
//! Services orchestrate the [`crate::domain::repositories::MappingStore`] and
//! the code generator, and provide a clean API for HTTP handlers and the
//! admin CLI.
//!
//! # Available Services
//!
//! - [`services::shortening_service::ShorteningService`] - Short code creation
//! - [`services::redirect_service::RedirectService`] - Short code resolution

pub mod services;
