//! Store trait definitions for the domain layer.
//!
//! Implementations live in `crate::infrastructure::persistence`. Mock
//! implementations are auto-generated via `mockall` for testing.

pub mod mapping_store;

pub use mapping_store::{MappingStore, StoreVariant};

#[cfg(test)]
pub use mapping_store::MockMappingStore;
