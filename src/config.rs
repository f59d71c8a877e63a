//! Configuration sources for the database target.
//!
//! Lookups are never cached: every table operation asks its source for the
//! `database` key right before opening a connection.

use serde_yaml::Value as YamlValue;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Key holding the database file path.
pub const DATABASE_KEY: &str = "database";

/// Default configuration file, resolved relative to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "config.yml";

/// A process-wide key/value configuration source.
pub trait ConfigSource {
    /// Look up a scalar value by key.
    fn lookup(&self, key: &str) -> Result<String, ConfigError>;

    /// The database file path or identifier.
    fn database(&self) -> Result<String, ConfigError> {
        self.lookup(DATABASE_KEY)
    }
}

impl<C: ConfigSource + ?Sized> ConfigSource for &C {
    fn lookup(&self, key: &str) -> Result<String, ConfigError> {
        (**self).lookup(key)
    }
}

impl<C: ConfigSource + ?Sized> ConfigSource for std::sync::Arc<C> {
    fn lookup(&self, key: &str) -> Result<String, ConfigError> {
        (**self).lookup(key)
    }
}

/// YAML file source, re-read on every lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YamlConfig {
    path: PathBuf,
}

impl YamlConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, YamlValue>, ConfigError> {
        let content = std::fs::read_to_string(&self.path)?;
        // an empty file parses as null
        let values: Option<BTreeMap<String, YamlValue>> = serde_yaml::from_str(&content)?;
        Ok(values.unwrap_or_default())
    }
}

impl Default for YamlConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIG_FILE)
    }
}

impl ConfigSource for YamlConfig {
    fn lookup(&self, key: &str) -> Result<String, ConfigError> {
        let values = self.load()?;
        match values.get(key) {
            None | Some(YamlValue::Null) => Err(ConfigError::MissingKey(key.to_string())),
            Some(YamlValue::String(s)) => Ok(s.clone()),
            Some(YamlValue::Number(n)) => Ok(n.to_string()),
            Some(YamlValue::Bool(b)) => Ok(b.to_string()),
            Some(_) => Err(ConfigError::InvalidValue {
                key: key.to_string(),
                reason: "expected a scalar".to_string(),
            }),
        }
    }
}

/// In-memory source.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StaticConfig {
    values: BTreeMap<String, String>,
}

impl StaticConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Source holding only the `database` key
    pub fn with_database(path: impl Into<String>) -> Self {
        Self::new().with_value(DATABASE_KEY, path)
    }

    pub fn with_value(mut self, key: &str, value: impl Into<String>) -> Self {
        self.values.insert(key.to_string(), value.into());
        self
    }
}

impl ConfigSource for StaticConfig {
    fn lookup(&self, key: &str) -> Result<String, ConfigError> {
        self.values
            .get(key)
            .cloned()
            .ok_or_else(|| ConfigError::MissingKey(key.to_string()))
    }
}
