//! # UI Configuration
//!
//! Widget defaults loaded once at startup from TOML. Every field has a
//! default, so an empty file (or no file) yields the stock behavior.
//!
//! ```toml
//! [tree]
//! y_spacing = 6.0
//!
//! [click]
//! tap_count_interval = 0.3
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{UiError, UiResult};

/// Top-level configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Tree spacing defaults.
    pub tree: TreeConfig,
    /// Click recognition thresholds.
    pub click: ClickConfig,
    /// Event pool sizing.
    pub pool: PoolConfig,
}

/// Spacing defaults for new trees.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// Vertical gap between rows.
    pub y_spacing: f32,
    /// Gap left of the expander column.
    pub icon_spacing_left: f32,
    /// Gap between a node icon and its component.
    pub icon_spacing_right: f32,
    /// Horizontal padding on both sides.
    pub padding: f32,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            y_spacing: 4.0,
            icon_spacing_left: 2.0,
            icon_spacing_right: 2.0,
            padding: 0.0,
        }
    }
}

/// Thresholds used by click listeners.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClickConfig {
    /// Half-size of the square around the touch-down point that still counts
    /// as a click when released outside the component.
    pub tap_square_size: f32,
    /// Seconds a component stays visually pressed after a quick tap.
    pub visual_pressed_duration: f32,
    /// Maximum seconds between taps counted as one multi-tap.
    pub tap_count_interval: f32,
}

impl Default for ClickConfig {
    fn default() -> Self {
        Self {
            tap_square_size: 14.0,
            visual_pressed_duration: 0.1,
            tap_count_interval: 0.4,
        }
    }
}

/// Object pool sizing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Free events kept per pool.
    pub max_free_events: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self { max_free_events: 64 }
    }
}

impl UiConfig {
    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::InvalidConfig`] if the text is not valid TOML or a
    /// value has the wrong type.
    pub fn from_toml_str(text: &str) -> UiResult<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| UiError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::InvalidConfig`] if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> UiResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| UiError::InvalidConfig(format!("{}: {e}", path.display())))?;
        let config = Self::from_toml_str(&text)?;
        tracing::info!("Loaded UI config from {}", path.display());
        Ok(config)
    }

    fn validate(&self) -> UiResult<()> {
        let click = &self.click;
        if click.tap_square_size < 0.0
            || click.visual_pressed_duration < 0.0
            || click.tap_count_interval < 0.0
        {
            return Err(UiError::InvalidConfig(
                "click thresholds must not be negative".to_string(),
            ));
        }
        if self.tree.y_spacing < 0.0 {
            return Err(UiError::InvalidConfig(
                "tree y_spacing must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = UiConfig::from_toml_str("").unwrap();
        assert_eq!(config, UiConfig::default());
        assert_eq!(config.tree.y_spacing, 4.0);
        assert_eq!(config.click.tap_square_size, 14.0);
        assert_eq!(config.pool.max_free_events, 64);
    }

    #[test]
    fn test_partial_section() {
        let config = UiConfig::from_toml_str("[tree]\npadding = 3.0\n").unwrap();
        assert_eq!(config.tree.padding, 3.0);
        assert_eq!(config.tree.icon_spacing_left, 2.0);
    }

    #[test]
    fn test_wrong_type_rejected() {
        let result = UiConfig::from_toml_str("[click]\ntap_square_size = \"wide\"\n");
        assert!(matches!(result, Err(UiError::InvalidConfig(_))));
    }

    #[test]
    fn test_negative_threshold_rejected() {
        let result = UiConfig::from_toml_str("[click]\ntap_count_interval = -1.0\n");
        assert!(matches!(result, Err(UiError::InvalidConfig(_))));
    }
}
