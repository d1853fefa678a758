//! Registry configuration
//!
//! Settings are read from an optional TOML file and then overridden by
//! `RESHAPE_*` environment variables. They only influence how the registry
//! is built and which defaults it binds; the typed filter API is unaffected.

use crate::error::{FilterError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistryConfig {
    /// Also register the historical filter names
    pub legacy_names: bool,
    /// Names that must not be registered
    pub disabled: Vec<String>,
    /// Default `sep` for `to_kv`
    pub separator: String,
    /// Default `sep` for `join_attributes` and `merge_joined`
    pub join_separator: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            legacy_names: true,
            disabled: Vec::new(),
            separator: ".".to_string(),
            join_separator: " ".to_string(),
        }
    }
}

impl RegistryConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text)
            .map_err(|e| FilterError::config("invalid registry configuration").with_source(e))
    }

    /// Load a configuration file and apply environment overrides
    pub fn load(path: &Path) -> Result<Self> {
        debug!("Loading registry configuration from {}", path.display());
        let text = std::fs::read_to_string(path).map_err(|e| {
            FilterError::config(format!("cannot read {}", path.display())).with_source(e)
        })?;
        let mut config = Self::from_toml(&text)?;
        config.merge_env_vars();
        Ok(config)
    }

    /// Default configuration with environment overrides applied
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.merge_env_vars();
        config
    }

    pub fn merge_env_vars(&mut self) {
        self.merge_vars(|name| std::env::var(name).ok());
    }

    /// Apply overrides from a variable lookup
    pub fn merge_vars<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(flag) = lookup("RESHAPE_LEGACY_NAMES") {
            self.legacy_names = matches!(
                flag.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            );
        }

        if let Some(disabled) = lookup("RESHAPE_DISABLED") {
            self.disabled = disabled
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect();
        }

        if let Some(separator) = lookup("RESHAPE_SEPARATOR") {
            self.separator = separator;
        }

        if let Some(separator) = lookup("RESHAPE_JOIN_SEPARATOR") {
            self.join_separator = separator;
        }
    }

    pub fn is_disabled(&self, name: &str) -> bool {
        self.disabled.iter().any(|d| d == name)
    }
}
