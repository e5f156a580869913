//! Core domain entities.
//!
//! - [`UrlMapping`] - A stored short code to long URL mapping
//! - [`NewMapping`] - Input for creating a mapping

pub mod mapping;

pub use mapping::{NewMapping, UrlMapping};
