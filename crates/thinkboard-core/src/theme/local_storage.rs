//! Browser `localStorage` theme store (WASM).

use super::{Theme, ThemeStore, ThemeStoreError};

/// Key under which the theme is stored.
pub const THEME_KEY: &str = "thinkboard-theme";

/// Persists the theme in `window.localStorage`.
#[derive(Debug, Default)]
pub struct LocalStorageThemeStore;

impl LocalStorageThemeStore {
    pub fn new() -> Self {
        Self
    }

    fn storage(&self) -> Result<web_sys::Storage, ThemeStoreError> {
        web_sys::window()
            .ok_or_else(|| ThemeStoreError::Unavailable("No window".to_string()))?
            .local_storage()
            .map_err(|e| ThemeStoreError::Unavailable(format!("{:?}", e)))?
            .ok_or_else(|| ThemeStoreError::Unavailable("localStorage disabled".to_string()))
    }
}

impl ThemeStore for LocalStorageThemeStore {
    fn load(&self) -> Result<Option<Theme>, ThemeStoreError> {
        let value = self
            .storage()?
            .get_item(THEME_KEY)
            .map_err(|e| ThemeStoreError::Io(format!("{:?}", e)))?;
        Ok(value.as_deref().and_then(Theme::from_name))
    }

    fn save(&self, theme: Theme) -> Result<(), ThemeStoreError> {
        self.storage()?
            .set_item(THEME_KEY, theme.as_str())
            .map_err(|e| ThemeStoreError::Io(format!("{:?}", e)))
    }
}
