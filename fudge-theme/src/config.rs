//! # Registry Configuration
//!
//! Settings for a [ThemeRegistry](crate::registry::ThemeRegistry) handle.
//!
//! Configuration can come from code, from environment variables or from a TOML file:
//!
//! ```rust
//! use fudge_theme::config::RegistryConfig;
//!
//! // Defaults, overridden by the environment when variables are set
//! let config = RegistryConfig::from_env_or_default();
//!
//! // From TOML content
//! let config = RegistryConfig::from_toml(r#"
//! [registry]
//! max_resolution_depth = 32
//! main_theme = "dark"
//! "#).unwrap();
//! assert_eq!(config.max_resolution_depth, 32);
//! ```
//!
//! ## Environment Variables
//!
//! - `FUDGE_RESOLUTION_DEPTH`: ceiling for style resolution walks
//! - `FUDGE_MAIN_THEME`: name of the theme created on initialization
//! - `FUDGE_CONFIG`: path to a TOML configuration file (`[registry]` table)

use std::env;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{ThemeError, ThemeResult};

/// Default ceiling for resolution walks and cycle checks.
pub const DEFAULT_MAX_RESOLUTION_DEPTH: usize = 64;

/// The logical owner of a registry handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistryContext {
    /// The running application.
    #[default]
    Runtime,
    /// An editor hosting the toolkit next to a runtime.
    Editor,
}

/// Configuration of a theme registry handle.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Maximum number of steps a resolution (or cycle check) may take.
    pub max_resolution_depth: usize,
    /// Name of the theme created by `initialize()`.
    pub main_theme: String,
    /// Name of the root style every class style falls back to.
    pub default_style: String,
    /// Which logical owner holds the handle.
    pub context: RegistryContext,
}

#[derive(Deserialize)]
struct ConfigFile {
    #[serde(default)]
    registry: RegistryConfig,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            max_resolution_depth: DEFAULT_MAX_RESOLUTION_DEPTH,
            main_theme: "main".to_string(),
            default_style: "default".to_string(),
            context: RegistryContext::Runtime,
        }
    }
}

impl RegistryConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration from environment variables, falling back to defaults.
    ///
    /// A config file named by `FUDGE_CONFIG` is loaded first; the individual variables
    /// override it. Unreadable files and unparsable values are logged and ignored.
    pub fn from_env_or_default() -> Self {
        let mut config = Self::new();

        if let Ok(path) = env::var("FUDGE_CONFIG") {
            match Self::from_file(&path) {
                Ok(file_config) => config = file_config,
                Err(err) => log::warn!("Ignoring FUDGE_CONFIG: {}", err),
            }
        }

        if let Ok(depth) = env::var("FUDGE_RESOLUTION_DEPTH") {
            match depth.trim().parse::<usize>() {
                Ok(depth) if depth > 0 => config.max_resolution_depth = depth,
                _ => log::warn!("Ignoring invalid FUDGE_RESOLUTION_DEPTH '{}'", depth),
            }
        }

        if let Ok(theme) = env::var("FUDGE_MAIN_THEME") {
            if !theme.trim().is_empty() {
                config.main_theme = theme.trim().to_string();
            }
        }

        config
    }

    /// Load a configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> ThemeResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;

        Self::parse(&content).map_err(|details| ThemeError::config_parse(Some(path.to_path_buf()), details))
    }

    /// Load a configuration from TOML content with a `[registry]` table.
    pub fn from_toml(content: &str) -> ThemeResult<Self> {
        Self::parse(content).map_err(|details| ThemeError::config_parse(None, details))
    }

    fn parse(content: &str) -> Result<Self, String> {
        let file: ConfigFile = toml::from_str(content).map_err(|err| err.to_string())?;
        if file.registry.max_resolution_depth == 0 {
            return Err("max_resolution_depth must be greater than zero".to_string());
        }
        Ok(file.registry)
    }

    /// Set the resolution ceiling.
    pub fn with_max_resolution_depth(mut self, depth: usize) -> Self {
        self.max_resolution_depth = depth.max(1);
        self
    }

    /// Set the main theme name.
    pub fn with_main_theme(mut self, name: impl Into<String>) -> Self {
        self.main_theme = name.into();
        self
    }

    /// Set the default style name.
    pub fn with_default_style(mut self, name: impl Into<String>) -> Self {
        self.default_style = name.into();
        self
    }

    /// Set the owning context.
    pub fn with_context(mut self, context: RegistryContext) -> Self {
        self.context = context;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RegistryConfig::new();
        assert_eq!(config.max_resolution_depth, DEFAULT_MAX_RESOLUTION_DEPTH);
        assert_eq!(config.main_theme, "main");
        assert_eq!(config.default_style, "default");
        assert_eq!(config.context, RegistryContext::Runtime);
    }

    #[test]
    fn test_from_toml() {
        let config = RegistryConfig::from_toml(
            r#"
            [registry]
            max_resolution_depth = 8
            main_theme = "dark"
            context = "editor"
            "#,
        )
        .unwrap();

        assert_eq!(config.max_resolution_depth, 8);
        assert_eq!(config.main_theme, "dark");
        assert_eq!(config.default_style, "default");
        assert_eq!(config.context, RegistryContext::Editor);
    }

    #[test]
    fn test_from_toml_without_table() {
        let config = RegistryConfig::from_toml("").unwrap();
        assert_eq!(config, RegistryConfig::default());
    }

    #[test]
    fn test_from_toml_rejects_zero_depth() {
        let err = RegistryConfig::from_toml("[registry]\nmax_resolution_depth = 0").unwrap_err();
        assert!(matches!(err, ThemeError::ConfigParse { path: None, .. }));
    }

    #[test]
    fn test_from_toml_rejects_garbage() {
        assert!(RegistryConfig::from_toml("[registry\n").is_err());
    }

    #[test]
    fn test_builder() {
        let config = RegistryConfig::new()
            .with_max_resolution_depth(0)
            .with_main_theme("light")
            .with_context(RegistryContext::Editor);
        assert_eq!(config.max_resolution_depth, 1);
        assert_eq!(config.main_theme, "light");
        assert_eq!(config.context, RegistryContext::Editor);
    }
}
