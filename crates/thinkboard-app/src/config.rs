//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thinkboard_core::{Theme, DEFAULT_STROKE_WIDTH};

/// Startup settings for the toolbar.
///
/// # Example JSON
/// ```json
/// { "default_color": "#1e40af", "default_stroke_width": 3, "system_theme": "dark" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub title: String,
    /// Initial stroke color token.
    pub default_color: String,
    /// Initial stroke width, clamped like any other write.
    pub default_stroke_width: i32,
    /// Used when no theme preference has been stored yet.
    pub system_theme: Theme,
    /// Where the theme preference lives. `None` means the platform default.
    pub preferences_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "ThinkBoard".to_string(),
            default_color: "#000000".to_string(),
            default_stroke_width: i32::from(DEFAULT_STROKE_WIDTH),
            system_theme: Theme::Light,
            preferences_dir: None,
        }
    }
}

impl AppConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = AppConfig::from_json(r#"{ "system_theme": "dark" }"#).unwrap();
        assert_eq!(config.system_theme, Theme::Dark);
        assert_eq!(config.default_color, "#000000");
        assert_eq!(config.default_stroke_width, 2);
        assert_eq!(config.title, "ThinkBoard");
    }

    #[test]
    fn test_invalid_json() {
        assert!(AppConfig::from_json("{ \"default_stroke_width\": \"wide\" }").is_err());
    }
}
