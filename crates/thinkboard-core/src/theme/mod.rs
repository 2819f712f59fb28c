//! Process-wide light/dark theme and its persistence.

mod memory;

#[cfg(not(target_arch = "wasm32"))]
mod file;

#[cfg(target_arch = "wasm32")]
mod local_storage;

pub use memory::MemoryThemeStore;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileThemeStore;

#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageThemeStore;

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// The other theme.
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Theme store errors.
#[derive(Debug, Error)]
pub enum ThemeStoreError {
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Persistence backend for the theme preference.
pub trait ThemeStore {
    /// Read the stored preference, `None` if nothing was saved yet.
    fn load(&self) -> Result<Option<Theme>, ThemeStoreError>;

    /// Persist the preference.
    fn save(&self, theme: Theme) -> Result<(), ThemeStoreError>;
}

/// The session's theme, changed only through [`ThemeState::toggle`].
pub struct ThemeState {
    current: Theme,
    store: Box<dyn ThemeStore>,
}

impl fmt::Debug for ThemeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeState")
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}

impl ThemeState {
    /// Initialize from the stored preference, falling back to `system_default`.
    pub fn init(store: Box<dyn ThemeStore>, system_default: Theme) -> Self {
        let current = match store.load() {
            Ok(Some(theme)) => theme,
            Ok(None) => system_default,
            Err(err) => {
                log::warn!("Failed to load theme preference, using {}: {}", system_default, err);
                system_default
            }
        };
        log::debug!("Theme initialized: {}", current);
        Self { current, store }
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    /// Flip and persist. The in-memory theme only changes once the write succeeded.
    pub fn toggle(&mut self) -> Result<Theme, ThemeStoreError> {
        let next = self.current.toggled();
        self.store.save(next)?;
        self.current = next;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenStore;

    impl ThemeStore for BrokenStore {
        fn load(&self) -> Result<Option<Theme>, ThemeStoreError> {
            Err(ThemeStoreError::Io("disk on fire".to_string()))
        }

        fn save(&self, _theme: Theme) -> Result<(), ThemeStoreError> {
            Err(ThemeStoreError::Io("disk on fire".to_string()))
        }
    }

    #[test]
    fn test_toggled() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
    }

    #[test]
    fn test_init_uses_system_default_when_empty() {
        let state = ThemeState::init(Box::new(MemoryThemeStore::new()), Theme::Dark);
        assert_eq!(state.current(), Theme::Dark);
    }

    #[test]
    fn test_init_prefers_stored_value() {
        let store = MemoryThemeStore::with_theme(Theme::Dark);
        let state = ThemeState::init(Box::new(store), Theme::Light);
        assert_eq!(state.current(), Theme::Dark);
    }

    #[test]
    fn test_toggle_persists() {
        let store = MemoryThemeStore::new();
        let mut state = ThemeState::init(Box::new(store.clone()), Theme::Light);

        assert_eq!(state.toggle().unwrap(), Theme::Dark);
        assert_eq!(store.load().unwrap(), Some(Theme::Dark));

        let reloaded = ThemeState::init(Box::new(store), Theme::Light);
        assert_eq!(reloaded.current(), Theme::Dark);
    }

    #[test]
    fn test_failed_save_keeps_theme() {
        let mut state = ThemeState::init(Box::new(BrokenStore), Theme::Light);
        assert_eq!(state.current(), Theme::Light);
        assert!(state.toggle().is_err());
        assert_eq!(state.current(), Theme::Light);
    }

    #[test]
    fn test_names() {
        assert_eq!(Theme::from_name("Dark"), Some(Theme::Dark));
        assert_eq!(Theme::from_name("sepia"), None);
        assert_eq!(Theme::Light.to_string(), "light");
    }
}
