//! Database handle.
//!
//! # Intention
//!
//! - Open a fresh connection for every statement and close it before
//!   returning, on success and on failure alike.
//! - Re-read the configured database path for every connection.
//! - Decode result rows positionally against a model's field directory.
//!
//! # Architectural Boundaries
//!
//! - No pooling and no transactions spanning more than one statement; each
//!   statement auto-commits.
//! - No statement compilation here, see [`crate::sql`].

use rusqlite::{Connection, Row};

use crate::config::ConfigSource;
use crate::error::{OrmError, Result};
use crate::model::Model;
use crate::record::Record;
use crate::value::Value;

/// Per-operation access to the configured SQLite file
#[derive(Debug, Clone)]
pub struct Database<C> {
    config: C,
}

impl<C: ConfigSource> Database<C> {
    /// Create a handle that resolves its target through `config`
    pub fn new(config: C) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    /// Open a new connection to the currently configured database.
    ///
    /// The connection closes when dropped.
    pub fn open(&self) -> Result<Connection> {
        let path = self.config.database()?;
        tracing::trace!(path = %path, "opening sqlite connection");
        Ok(Connection::open(path)?)
    }

    /// Run one statement that returns no rows, returning the affected row count
    pub fn execute(&self, sql: &str) -> Result<usize> {
        let conn = self.open()?;
        tracing::debug!(sql = %sql, "executing statement");
        let changed = conn.execute(sql, [])?;
        Ok(changed)
    }

    /// Run one statement and decode every returned row against `model`
    pub fn query(&self, sql: &str, model: &Model) -> Result<Vec<Record>> {
        let conn = self.open()?;
        tracing::debug!(sql = %sql, "running query");
        let mut stmt = conn.prepare(sql)?;
        let found = stmt.column_count();
        let mut rows = stmt.query([])?;

        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push(decode_row(model, found, row)?);
        }
        Ok(records)
    }
}

/// Zip a positional row with the field directory's key order.
fn decode_row(model: &Model, found: usize, row: &Row<'_>) -> Result<Record> {
    if found != model.len() {
        return Err(OrmError::ShapeMismatch {
            expected: model.len(),
            found,
        });
    }

    let mut record = Record::new();
    for (index, name) in model.field_names().enumerate() {
        let raw: rusqlite::types::Value = row.get(index)?;
        record.set(name, Value::from(raw));
    }
    Ok(record)
}
