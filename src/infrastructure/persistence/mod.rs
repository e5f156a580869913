//! Mapping store implementations.
//!
//! # Stores
//!
//! - [`PgMappingStore`] - PostgreSQL, durable mappings with idempotent creation
//! - [`RedisMappingStore`] - Redis, TTL-bounded mappings
//! - [`MemoryMappingStore`] - In-process store for development and tests

pub mod memory_mapping_store;
pub mod pg_mapping_store;
pub mod redis_mapping_store;

pub use memory_mapping_store::MemoryMappingStore;
pub use pg_mapping_store::PgMappingStore;
pub use redis_mapping_store::RedisMappingStore;
