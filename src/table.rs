//! Record mapper: a [`Model`] bound to a configured database.
//!
//! Predicate-based retrieval (`get`, `delete`, `update`) always reads the
//! whole table and filters in memory. `delete` and `update` then issue one
//! statement per matching record, matched by full-row equality, without a
//! surrounding transaction: a failure part way through leaves earlier rows
//! changed and later rows untouched.

use std::fmt;

use crate::config::{ConfigSource, YamlConfig};
use crate::error::{OrmError, Result};
use crate::model::{Model, Schema};
use crate::record::Record;
use crate::sql;
use crate::sqlite::Database;

/// Queryable table backed by a [`Model`]
#[derive(Debug, Clone)]
pub struct Table<C = YamlConfig> {
    model: Model,
    db: Database<C>,
}

impl Table<YamlConfig> {
    /// Bind `model` to the database named in `config.yml`
    pub fn with_default_config(model: Model) -> Self {
        Self::new(model, YamlConfig::default())
    }
}

impl<C: ConfigSource> Table<C> {
    pub fn new(model: Model, config: C) -> Self {
        Self {
            model,
            db: Database::new(config),
        }
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn database(&self) -> &Database<C> {
        &self.db
    }

    pub fn schema(&self) -> Schema {
        self.model.schema()
    }

    pub fn table_name(&self) -> &str {
        self.model.table_name()
    }

    /// Issue `CREATE TABLE`; fails if the table already exists
    pub fn create_table(&self) -> Result<()> {
        self.db.execute(&sql::create_table(&self.model))?;
        tracing::info!(table = %self.table_name(), "table created");
        Ok(())
    }

    /// Insert one row. `values` must name every declared field and nothing else.
    pub fn insert(&self, values: &Record) -> Result<()> {
        let statement = sql::insert(&self.model, values).inspect_err(|err| {
            tracing::warn!(table = %self.table_name(), error = %err, "insert rejected");
        })?;
        self.db.execute(&statement)?;
        Ok(())
    }

    /// Every stored row, in the order the engine returns them
    pub fn get_all(&self) -> Result<Vec<Record>> {
        self.db.query(&sql::select_all(&self.model), &self.model)
    }

    /// Rows where `<column> <condition>` holds.
    ///
    /// `condition` is a raw SQL fragment such as `"> 5"` and is not escaped.
    pub fn get_by_column(&self, column: &str, condition: &str) -> Result<Vec<Record>> {
        let statement = sql::select_where(&self.model, column, condition)?;
        self.db.query(&statement, &self.model)
    }

    /// Rows for which `predicate` returns true
    pub fn get<P>(&self, predicate: P) -> Result<Vec<Record>>
    where
        P: Fn(&Record) -> bool,
    {
        let mut records = self.get_all()?;
        records.retain(|record| predicate(record));
        Ok(records)
    }

    /// Delete every row matching `predicate`, returning the number of matches.
    ///
    /// Rows that are field-wise identical to a match are deleted with it.
    pub fn delete<P>(&self, predicate: P) -> Result<usize>
    where
        P: Fn(&Record) -> bool,
    {
        let matches = self.get(predicate)?;
        for record in &matches {
            self.db.execute(&sql::delete(&self.model, record))?;
        }
        tracing::debug!(table = %self.table_name(), matched = matches.len(), "delete finished");
        Ok(matches.len())
    }

    /// Overwrite the fields named in `values` on every row matching
    /// `predicate`, returning the number of matches
    pub fn update<P>(&self, predicate: P, values: &Record) -> Result<usize>
    where
        P: Fn(&Record) -> bool,
    {
        if let Some(unknown) = values.keys().find(|name| !self.model.has_field(name)) {
            return Err(OrmError::UnknownColumn(unknown.to_string()));
        }

        let matches = self.get(predicate)?;
        for record in &matches {
            self.db.execute(&sql::update(&self.model, record, values))?;
        }
        tracing::debug!(table = %self.table_name(), matched = matches.len(), "update finished");
        Ok(matches.len())
    }

    /// Run arbitrary SQL and decode the result rows against this model
    pub fn run_query(&self, query: &str) -> Result<Vec<Record>> {
        self.db.query(query, &self.model)
    }
}

impl<C> fmt::Display for Table<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.model, f)
    }
}
