//! Infrastructure layer: catalog persistence.

pub mod catalog_store;

pub use catalog_store::{
    CatalogError, CatalogStore, FileCatalogStore, InMemoryCatalogStore, LoadedCatalog,
    load_catalog, save_catalog,
};
