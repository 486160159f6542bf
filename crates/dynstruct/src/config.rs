// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Defaults and navigator configuration.
//!
//! With the `config-loaders` feature, [`NavigatorConfig`] can be loaded from
//! YAML:
//!
//! ```ignore
//! let config = NavigatorConfig::from_yaml_str("separator: \"/\"")?;
//! let nav = Navigator::with_config(root, &config)?;
//! ```

use crate::error::ConfigError;

/// Default path separator.
pub const DEFAULT_SEPARATOR: &str = ".";

/// Default cosmetic name of built record types.
pub const DEFAULT_STRUCT_NAME: &str = "DynamicStruct";

/// Navigator session configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "config-loaders",
    derive(serde::Deserialize, serde::Serialize),
    serde(default)
)]
pub struct NavigatorConfig {
    /// Joins path segments into keys. Must not be empty.
    pub separator: String,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }
}

impl NavigatorConfig {
    /// Config with the given separator; call [`validate`](Self::validate) before use.
    pub fn new(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
        }
    }

    /// Reject unusable settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.separator.is_empty() {
            return Err(ConfigError::EmptySeparator);
        }
        Ok(())
    }

    /// Parse and validate a YAML document.
    #[cfg(feature = "config-loaders")]
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}
