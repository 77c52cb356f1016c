use std::sync::RwLock;

use toystore_inventory::Inventory;

use super::r#trait::{CatalogError, CatalogStore, LoadedCatalog};

/// In-memory catalog store.
///
/// Intended for tests/dev. Keeps the last saved catalog text and counts saves.
#[derive(Debug, Default)]
pub struct InMemoryCatalogStore {
    state: RwLock<State>,
}

#[derive(Debug, Default)]
struct State {
    text: String,
    saves: usize,
    fail_saves: bool,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing catalog text.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            state: RwLock::new(State {
                text: text.into(),
                ..State::default()
            }),
        }
    }

    /// Make every subsequent `save` fail (the stored text is kept).
    pub fn fail_saves(&self, fail: bool) {
        if let Ok(mut state) = self.state.write() {
            state.fail_saves = fail;
        }
    }

    pub fn text(&self) -> String {
        self.state
            .read()
            .map(|state| state.text.clone())
            .unwrap_or_default()
    }

    pub fn saves(&self) -> usize {
        self.state.read().map(|state| state.saves).unwrap_or(0)
    }
}

impl CatalogStore for InMemoryCatalogStore {
    fn load(&self) -> Result<LoadedCatalog, CatalogError> {
        let state = self
            .state
            .read()
            .map_err(|_| CatalogError::Unavailable("lock poisoned".to_string()))?;
        Ok(LoadedCatalog::from_text(&state.text))
    }

    fn save(&self, inventory: &Inventory) -> Result<(), CatalogError> {
        let mut state = self
            .state
            .write()
            .map_err(|_| CatalogError::Unavailable("lock poisoned".to_string()))?;
        if state.fail_saves {
            return Err(CatalogError::Unavailable("saves disabled".to_string()));
        }
        state.text = inventory.encode();
        state.saves += 1;
        Ok(())
    }
}
