//! Record type declarations.
//!
//! # Intention
//!
//! - A [`Model`] is built once from an ordered list of named [`Field`]s and
//!   never changes afterwards.
//! - The field directory keeps declaration order; every generated column
//!   list follows it.
//! - At most one field may carry the primary-key flag.

use serde::Serialize;
use std::fmt;

use crate::error::{OrmError, Result};
use crate::fields::{Field, FieldType};

/// Builder for [`Model`]
#[derive(Debug, Clone)]
pub struct ModelBuilder {
    name: String,
    table_name: Option<String>,
    fields: Vec<(String, Field)>,
}

impl ModelBuilder {
    /// Override the table name, which otherwise defaults to the model name
    pub fn table_name(mut self, table_name: impl Into<String>) -> Self {
        self.table_name = Some(table_name.into());
        self
    }

    /// Declare the next field
    pub fn field(mut self, name: impl Into<String>, field: Field) -> Self {
        self.fields.push((name.into(), field));
        self
    }

    /// Freeze the declaration.
    ///
    /// Rejects duplicate field names and more than one primary key.
    pub fn build(self) -> Result<Model> {
        for (i, (name, _)) in self.fields.iter().enumerate() {
            if self.fields[..i].iter().any(|(seen, _)| seen == name) {
                return Err(OrmError::DuplicateField(name.clone()));
            }
        }

        let mut keys: Vec<String> = self
            .fields
            .iter()
            .filter(|(_, field)| field.is_primary_key)
            .map(|(name, _)| name.clone())
            .collect();
        if keys.len() > 1 {
            keys.sort();
            return Err(OrmError::MultiplePrimaryKeys(keys));
        }

        let model = Model {
            table_name: self.table_name.unwrap_or(self.name),
            primary_key: keys.pop(),
            fields: self.fields,
        };
        tracing::debug!(
            table = %model.table_name,
            fields = model.fields.len(),
            "model registered"
        );
        Ok(model)
    }
}

/// An immutable record type declaration
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    table_name: String,
    fields: Vec<(String, Field)>,
    primary_key: Option<String>,
}

impl Model {
    /// Start declaring a model called `name`
    pub fn builder(name: impl Into<String>) -> ModelBuilder {
        ModelBuilder {
            name: name.into(),
            table_name: None,
            fields: Vec::new(),
        }
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn primary_key(&self) -> Option<&str> {
        self.primary_key.as_deref()
    }

    /// Declared fields in declaration order
    pub fn fields(&self) -> impl ExactSizeIterator<Item = (&str, &Field)> {
        self.fields.iter().map(|(name, field)| (name.as_str(), field))
    }

    pub fn field_names(&self) -> impl ExactSizeIterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields
            .iter()
            .find(|(declared, _)| declared == name)
            .map(|(_, field)| field)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn schema(&self) -> Schema {
        Schema {
            table_name: self.table_name.clone(),
            primary_key: self.primary_key.clone(),
            fields: self
                .fields
                .iter()
                .map(|(name, field)| (name.clone(), field.field_type))
                .collect(),
        }
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.schema(), f)
    }
}

/// Introspection snapshot of a [`Model`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schema {
    pub table_name: String,
    pub primary_key: Option<String>,
    /// Field name to column type, in declaration order
    pub fields: Vec<(String, FieldType)>,
}

impl Schema {
    /// Type name of a declared field, e.g. `"INTEGER"`
    pub fn field_type(&self, name: &str) -> Option<&'static str> {
        self.fields
            .iter()
            .find(|(declared, _)| declared == name)
            .map(|(_, ty)| ty.as_sql())
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (primary key: ", self.table_name)?;
        match &self.primary_key {
            Some(key) => f.write_str(key)?,
            None => f.write_str("none")?,
        }
        f.write_str(") {")?;
        for (i, (name, ty)) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}: {ty}")?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn users() -> Model {
        Model::builder("User")
            .field("id", Field::integer().primary_key())
            .field("name", Field::text())
            .field("score", Field::real())
            .build()
            .unwrap()
    }

    #[test]
    fn test_table_name_defaults_to_model_name() {
        assert_eq!(users().table_name(), "User");

        let renamed = Model::builder("User")
            .table_name("users")
            .field("id", Field::integer())
            .build()
            .unwrap();
        assert_eq!(renamed.table_name(), "users");
    }

    #[test]
    fn test_directory_keeps_declaration_order() {
        let model = users();
        let names: Vec<_> = model.field_names().collect();
        assert_eq!(names, vec!["id", "name", "score"]);
        assert_eq!(model.primary_key(), Some("id"));
    }

    #[test]
    fn test_schema_snapshot() {
        let model = Model::builder("Pair")
            .field("f1", Field::integer())
            .field("f2", Field::text())
            .build()
            .unwrap();
        let schema = model.schema();
        assert_eq!(schema.table_name, "Pair");
        assert_eq!(schema.primary_key, None);
        assert_eq!(schema.field_type("f1"), Some("INTEGER"));
        assert_eq!(schema.field_type("f2"), Some("TEXT"));
        assert_eq!(schema.field_type("f3"), None);
        assert_eq!(model.to_string(), "Pair (primary key: none) {f1: INTEGER, f2: TEXT}");
    }

    #[test]
    fn test_empty_model_is_legal() {
        let model = Model::builder("Nothing").build().unwrap();
        assert!(model.is_empty());
        assert_eq!(model.primary_key(), None);
    }

    #[test]
    fn test_multiple_primary_keys_rejected() {
        let err = Model::builder("Bad")
            .field("b", Field::integer().primary_key())
            .field("a", Field::text().primary_key())
            .build()
            .unwrap_err();
        match err {
            OrmError::MultiplePrimaryKeys(keys) => assert_eq!(keys, vec!["a", "b"]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_duplicate_field_rejected() {
        let err = Model::builder("Bad")
            .field("id", Field::integer())
            .field("id", Field::text())
            .build()
            .unwrap_err();
        assert!(matches!(err, OrmError::DuplicateField(name) if name == "id"));
    }
}
