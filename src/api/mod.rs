//! API clients for external services
//!
//! - Catalog: titles and episodes from the streaming backend

pub mod catalog;

pub use catalog::{CatalogClient, CatalogError, CatalogResult, DEFAULT_BACKEND_URL};
