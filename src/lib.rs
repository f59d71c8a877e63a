//! Minimal record-to-table mapping over SQLite.
//!
//! # Intention
//!
//! - Declare a record type once as an ordered list of typed fields.
//! - Compile that declaration into `CREATE TABLE`, `INSERT`, `UPDATE`,
//!   `DELETE` and `SELECT` statements.
//! - Decode result rows back into field-name keyed [`Record`]s.
//!
//! # Architectural Boundaries
//!
//! - Only SQLite is targeted; there is no dialect abstraction.
//! - No migrations, no pooling, no transactions beyond single-statement
//!   auto-commit.
//!
//! # Example
//!
//! ```no_run
//! use rust_sqlite_orm::{Field, Model, Record, StaticConfig, Table};
//!
//! # fn main() -> rust_sqlite_orm::Result<()> {
//! let model = Model::builder("User")
//!     .table_name("users")
//!     .field("id", Field::integer().primary_key())
//!     .field("name", Field::text())
//!     .build()?;
//!
//! let users = Table::new(model, StaticConfig::with_database("app.db"));
//! users.create_table()?;
//! users.insert(&Record::new().with_value("id", 1).with_value("name", "Ada"))?;
//! let adas = users.get(|r| r.get("name").is_some_and(|v| v.to_string() == "Ada"))?;
//! assert_eq!(adas.len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod fields;
pub mod model;
pub mod record;
pub mod sql;
pub mod sqlite;
pub mod table;
pub mod value;

pub use config::{ConfigSource, StaticConfig, YamlConfig};
pub use error::{ConfigError, OrmError, Result};
pub use fields::{Field, FieldType};
pub use model::{Model, ModelBuilder, Schema};
pub use record::Record;
pub use sqlite::Database;
pub use table::Table;
pub use value::Value;
