//! Domain layer containing the mapping entity and the store contract.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - The [`repositories::MappingStore`] trait implemented by
//!   every storage backend
//!
//! The domain layer has no dependencies on infrastructure or presentation layers.

pub mod entities;
pub mod repositories;
