//! Field catalog: the closed set of column types a model may declare.
//!
//! The mapper only ever reads [`Field::field_type`] and
//! [`Field::is_primary_key`], so adding a column type means adding one
//! [`FieldType`] variant and its SQL name.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Column storage types understood by the mapper
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FieldType {
    Integer,
    Real,
    Text,
}

impl FieldType {
    /// SQL type name used in `CREATE TABLE`.
    pub const fn as_sql(self) -> &'static str {
        match self {
            FieldType::Integer => "INTEGER",
            FieldType::Real => "REAL",
            FieldType::Text => "TEXT",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// A declared column: its type plus the primary-key flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub field_type: FieldType,
    #[serde(default)]
    pub is_primary_key: bool,
}

impl Field {
    /// Create a field of the given type with the primary-key flag set as requested
    pub const fn new(field_type: FieldType, primary_key: bool) -> Self {
        Self {
            field_type,
            is_primary_key: primary_key,
        }
    }

    pub const fn integer() -> Self {
        Self::new(FieldType::Integer, false)
    }

    pub const fn real() -> Self {
        Self::new(FieldType::Real, false)
    }

    /// Alias of [`Field::real`]; floats are stored as `REAL`.
    pub const fn float() -> Self {
        Self::real()
    }

    pub const fn text() -> Self {
        Self::new(FieldType::Text, false)
    }

    /// Mark this field as the primary key. Idempotent.
    pub const fn primary_key(mut self) -> Self {
        self.is_primary_key = true;
        self
    }
}
