//! Catalog persistence boundary.
//!
//! The inventory is read in full once per session and written in full at each
//! save point. Backends only move catalog text; decoding and encoding stay in
//! `toystore-inventory`.

pub mod file;
pub mod in_memory;
pub mod r#trait;

pub use file::{FileCatalogStore, load_catalog, save_catalog};
pub use in_memory::InMemoryCatalogStore;
pub use r#trait::{CatalogError, CatalogStore, LoadedCatalog};
