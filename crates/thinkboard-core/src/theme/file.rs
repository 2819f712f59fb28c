//! File-based theme store for native platforms.

use super::{Theme, ThemeStore, ThemeStoreError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const PREFERENCES_FILE: &str = "preferences.json";

#[derive(Debug, Default, Serialize, Deserialize)]
struct Preferences {
    #[serde(default)]
    theme: Option<Theme>,
}

/// Stores the theme in `preferences.json` inside a directory.
pub struct FileThemeStore {
    base_path: PathBuf,
}

impl FileThemeStore {
    /// Create a store in `base_path`, creating the directory if needed.
    pub fn new(base_path: PathBuf) -> Result<Self, ThemeStoreError> {
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(|e| {
                ThemeStoreError::Io(format!("Failed to create preferences directory: {}", e))
            })?;
        }
        Ok(Self { base_path })
    }

    /// Create the store in the default location.
    ///
    /// On Unix: `~/.config/thinkboard/`
    /// On Windows: `%APPDATA%\thinkboard\`
    pub fn default_location() -> Result<Self, ThemeStoreError> {
        let base = dirs::config_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| ThemeStoreError::Io("Could not determine home directory".to_string()))?;
        Self::new(base.join("thinkboard"))
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn preferences_path(&self) -> PathBuf {
        self.base_path.join(PREFERENCES_FILE)
    }
}

impl ThemeStore for FileThemeStore {
    fn load(&self) -> Result<Option<Theme>, ThemeStoreError> {
        let path = self.preferences_path();
        if !path.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(&path).map_err(|e| {
            ThemeStoreError::Io(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let prefs: Preferences = serde_json::from_str(&json).map_err(|e| {
            ThemeStoreError::Serialization(format!("Failed to parse {}: {}", path.display(), e))
        })?;
        Ok(prefs.theme)
    }

    fn save(&self, theme: Theme) -> Result<(), ThemeStoreError> {
        let path = self.preferences_path();
        let prefs = Preferences { theme: Some(theme) };
        let json = serde_json::to_string_pretty(&prefs)
            .map_err(|e| ThemeStoreError::Serialization(e.to_string()))?;
        fs::write(&path, json).map_err(|e| {
            ThemeStoreError::Io(format!("Failed to write {}: {}", path.display(), e))
        })
    }
}
