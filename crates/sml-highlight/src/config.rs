use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::style::Palette;

pub const DEFAULT_TAB_WIDTH: usize = 4;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse highlight config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("tab_width must be at least 1")]
    InvalidTabWidth,
}

/// Highlighter settings, usually loaded from the editor's TOML config.
///
/// ```toml
/// tab_width = 2
///
/// [palette]
/// keyword = "#FF8800"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// Spaces each tab expands to.
    pub tab_width: usize,
    pub palette: Palette,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            tab_width: DEFAULT_TAB_WIDTH,
            palette: Palette::default(),
        }
    }
}

impl HighlightConfig {
    /// Parse and validate a config. Missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: HighlightConfig = toml::from_str(content)?;
        config.validate()?;
        log::debug!("loaded highlight config: tab_width={}", config.tab_width);
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tab_width == 0 {
            return Err(ConfigError::InvalidTabWidth);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sml_model::Color;

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(HighlightConfig::from_toml_str("").unwrap(), HighlightConfig::default());
    }

    #[test]
    fn test_partial_palette() {
        let config = HighlightConfig::from_toml_str(
            r##"
tab_width = 2

[palette]
keyword = "#FF8800"
bold_keywords = true
"##,
        )
        .unwrap();

        assert_eq!(config.tab_width, 2);
        assert_eq!(config.palette.keyword, Color::rgb(0xFF, 0x88, 0x00));
        assert!(config.palette.bold_keywords);
        assert_eq!(config.palette.string, Palette::default().string);
    }

    #[test]
    fn test_bad_color_falls_back_to_black() {
        let config = HighlightConfig::from_toml_str("[palette]\ncomment = \"grey\"").unwrap();
        assert_eq!(config.palette.comment, Color::BLACK);
    }

    #[test]
    fn test_zero_tab_width_is_rejected() {
        let err = HighlightConfig::from_toml_str("tab_width = 0").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTabWidth));
    }

    #[test]
    fn test_malformed_toml() {
        let err = HighlightConfig::from_toml_str("tab_width = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("Failed to parse highlight config"));
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = HighlightConfig {
            tab_width: 8,
            ..HighlightConfig::default()
        };
        let text = toml::to_string(&config).unwrap();
        assert_eq!(HighlightConfig::from_toml_str(&text).unwrap(), config);
    }
}
