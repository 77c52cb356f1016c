use std::path::PathBuf;

use thiserror::Error;
use toystore_inventory::{Inventory, ParseError};

/// Failure to read or write the catalog.
///
/// The in-memory inventory is never affected by these errors; callers decide
/// whether the session continues.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("cannot read catalog {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write catalog {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("catalog store unavailable: {0}")]
    Unavailable(String),
}

/// Result of a catalog load: the inventory plus every record that was skipped.
#[derive(Debug, Default)]
pub struct LoadedCatalog {
    pub inventory: Inventory,
    pub errors: Vec<ParseError>,
}

impl LoadedCatalog {
    pub fn from_text(text: &str) -> Self {
        Self::from_bytes(text.as_bytes())
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        let (inventory, errors) = Inventory::decode_bytes(bytes);
        Self { inventory, errors }
    }
}

/// Whole-catalog storage.
///
/// ## Contract
///
/// - `load` returns an empty catalog when nothing has been stored yet.
/// - `save` replaces the stored catalog in full, in inventory order. A failed
///   save leaves the previously stored catalog readable.
pub trait CatalogStore {
    fn load(&self) -> Result<LoadedCatalog, CatalogError>;

    fn save(&self, inventory: &Inventory) -> Result<(), CatalogError>;
}
