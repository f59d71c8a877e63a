//! Error types for model declaration, statement compilation and execution.
//!
//! Declaration-shape and unknown-column errors are raised before any SQL is
//! issued. Engine errors pass through untouched as [`OrmError::Sqlite`].

use thiserror::Error;

/// Errors raised while resolving the configured database target.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse the YAML configuration.
    #[error("failed to parse YAML config: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// The requested key is absent.
    #[error("config key '{0}' is not set")]
    MissingKey(String),

    /// The key is present but does not hold a scalar.
    #[error("config key '{key}' has an invalid value: {reason}")]
    InvalidValue { key: String, reason: String },
}

/// Errors returned by model and table operations.
#[derive(Debug, Error)]
pub enum OrmError {
    #[error("extra fields: {0:?}")]
    ExtraFields(Vec<String>),

    #[error("missing fields: {0:?}")]
    MissingFields(Vec<String>),

    #[error("column with name '{0}' does not exist")]
    UnknownColumn(String),

    /// A returned row does not match the field directory's arity.
    #[error("row has {found} columns but the model declares {expected}")]
    ShapeMismatch { expected: usize, found: usize },

    #[error("field '{0}' is declared more than once")]
    DuplicateField(String),

    #[error("more than one primary key declared: {0:?}")]
    MultiplePrimaryKeys(Vec<String>),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// Anything raised by the engine, propagated verbatim.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, OrmError>;
