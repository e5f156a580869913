//! HTTP front end: translates requests into service calls and formats
//! responses.
//!
//! # Modules
//!
//! - [`dto`] - Request/response serialization and validation
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Request tracing
//! - [`routes`] - Route configuration

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
