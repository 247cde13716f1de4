//! Stack configuration.
//!
//! Each stack carries a flat key/value configuration supplied by the
//! deployment tool. Required keys are read before any resource is
//! declared, so a missing key aborts the run with nothing registered.

use crate::error::{Result, SkiffError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Per-stack configuration store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StackConfig {
    values: HashMap<String, String>,
}

impl StackConfig {
    /// Create an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a configuration from key/value pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self { values: pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }

    /// Load configuration from a JSON file (a flat object of strings).
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading stack configuration");
        let content = std::fs::read_to_string(path)
            .map_err(|e| SkiffError::FileRead { path: path.to_path_buf(), source: e })?;
        serde_json::from_str(&content).map_err(|e| SkiffError::InvalidConfig {
            reason: format!("Failed to parse {}: {}", path.display(), e),
        })
    }

    /// Set a value, overriding any existing one.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Look up an optional key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Look up a required key.
    ///
    /// An absent or empty value is an error; the declaration must abort
    /// before registering anything that would depend on it.
    pub fn require(&self, key: &str) -> Result<&str> {
        match self.values.get(key) {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(SkiffError::ConfigurationMissing { key: key.to_string() }),
        }
    }
}
