// File: src/config.rs
// Purpose: Router configuration, optionally loaded from TOML

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fs;
use std::path::Path;

/// Router configuration
///
/// Fixed when the router is created; registration and matching only read it.
///
/// ```toml
/// case_insensitive = true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouterConfig {
    /// Whether constant segments match regardless of case (default: false)
    ///
    /// Captured parameter and catch-all values always keep their original case.
    #[serde(default)]
    pub case_insensitive: bool,
}

impl RouterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures case sensitivity (functional builder)
    pub fn with_case_insensitive(mut self, case_insensitive: bool) -> Self {
        self.case_insensitive = case_insensitive;
        self
    }

    /// Parses configuration from TOML text
    ///
    /// Empty text yields the default configuration.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        toml::from_str(content).context("Failed to parse router config")
    }

    /// Loads configuration from a TOML file
    ///
    /// A missing or empty file yields the default configuration.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read router config file: {:?}", path))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid router config file: {:?}", path))
    }

    /// Normalizes a constant segment for lookup under this configuration
    pub(crate) fn normalize<'a>(&self, segment: &'a str) -> Cow<'a, str> {
        if self.case_insensitive {
            Cow::Owned(segment.to_lowercase())
        } else {
            Cow::Borrowed(segment)
        }
    }
}
