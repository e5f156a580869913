//! Infrastructure layer for external integrations.
//!
//! This layer implements the [`crate::domain::repositories::MappingStore`]
//! contract for each supported backend.
//!
//! # Modules
//!
//! - [`persistence`] - PostgreSQL, Redis, and in-memory stores
//! - [`store_factory`] - Opens the backend selected in configuration

pub mod persistence;
pub mod store_factory;

pub use store_factory::open_store;
