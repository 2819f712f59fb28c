//! In-memory theme store.

use super::{Theme, ThemeStore, ThemeStoreError};
use std::cell::Cell;
use std::rc::Rc;

/// In-memory store for tests and ephemeral sessions.
///
/// Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct MemoryThemeStore {
    slot: Rc<Cell<Option<Theme>>>,
}

impl MemoryThemeStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with a saved preference.
    pub fn with_theme(theme: Theme) -> Self {
        let store = Self::default();
        store.slot.set(Some(theme));
        store
    }
}

impl ThemeStore for MemoryThemeStore {
    fn load(&self) -> Result<Option<Theme>, ThemeStoreError> {
        Ok(self.slot.get())
    }

    fn save(&self, theme: Theme) -> Result<(), ThemeStoreError> {
        self.slot.set(Some(theme));
        Ok(())
    }
}
