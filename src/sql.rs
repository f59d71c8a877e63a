//! Statement compilation.
//!
//! Every function here is pure: it turns a [`Model`] plus caller values into
//! SQL text. Nothing touches the database.

use crate::error::{OrmError, Result};
use crate::model::Model;
use crate::record::Record;
use crate::value::Value;

/// `CREATE TABLE <table> (<col> <TYPE> [PRIMARY KEY], ...)`
pub fn create_table(model: &Model) -> String {
    let columns = model
        .fields()
        .map(|(name, field)| {
            if field.is_primary_key {
                format!("{name} {} PRIMARY KEY", field.field_type)
            } else {
                format!("{name} {}", field.field_type)
            }
        })
        .collect::<Vec<_>>()
        .join(", ");
    format!("CREATE TABLE {} ({columns})", model.table_name())
}

/// `INSERT INTO <table> (<cols>) VALUES ("<v>", ...)`
///
/// The supplied key set must equal the declared field set exactly.
pub fn insert(model: &Model, values: &Record) -> Result<String> {
    check_insert_shape(model, values)?;

    let mut columns = Vec::with_capacity(values.len());
    let mut literals = Vec::with_capacity(values.len());
    for (name, value) in values {
        columns.push(name.as_str());
        literals.push(value.to_double_quoted());
    }
    Ok(format!(
        "INSERT INTO {} ({}) VALUES ({})",
        model.table_name(),
        columns.join(", "),
        literals.join(", ")
    ))
}

fn check_insert_shape(model: &Model, values: &Record) -> Result<()> {
    let extra: Vec<String> = values
        .keys()
        .filter(|name| !model.has_field(name))
        .map(str::to_string)
        .collect();
    let mut missing: Vec<String> = model
        .field_names()
        .filter(|name| !values.contains(name))
        .map(str::to_string)
        .collect();

    if extra.is_empty() && missing.is_empty() {
        return Ok(());
    }
    if missing.is_empty() {
        // record keys iterate sorted already
        return Err(OrmError::ExtraFields(extra));
    }
    missing.sort();
    Err(OrmError::MissingFields(missing))
}

/// `SELECT * FROM <table>`
pub fn select_all(model: &Model) -> String {
    format!("SELECT * FROM {}", model.table_name())
}

/// `SELECT * FROM <table> WHERE <column> <condition>`
///
/// `condition` is appended verbatim.
pub fn select_where(model: &Model, column: &str, condition: &str) -> Result<String> {
    if !model.has_field(column) {
        return Err(OrmError::UnknownColumn(column.to_string()));
    }
    Ok(format!(
        "SELECT * FROM {} WHERE {column} {condition}",
        model.table_name()
    ))
}

/// `DELETE FROM <table> WHERE <col>=='<v>' AND ...` over every declared field.
pub fn delete(model: &Model, record: &Record) -> String {
    match row_filter(model, record) {
        Some(filter) => format!("DELETE FROM {} WHERE {filter}", model.table_name()),
        None => format!("DELETE FROM {}", model.table_name()),
    }
}

/// `UPDATE <table> SET <col>='<v>', ... WHERE <col>=='<v>' AND ...`
///
/// Fields named in `values` take the replacement, the rest keep the
/// record's current value.
pub fn update(model: &Model, record: &Record, values: &Record) -> String {
    let assignments = model
        .field_names()
        .map(|name| {
            let value = values
                .get(name)
                .or_else(|| record.get(name))
                .unwrap_or(&Value::Null);
            format!("{name}={}", value.to_single_quoted())
        })
        .collect::<Vec<_>>()
        .join(", ");

    let mut sql = format!("UPDATE {} SET {assignments}", model.table_name());
    if let Some(filter) = row_filter(model, record) {
        sql.push_str(" WHERE ");
        sql.push_str(&filter);
    }
    sql
}

/// Full-row equality over the field directory.
fn row_filter(model: &Model, record: &Record) -> Option<String> {
    if model.is_empty() {
        return None;
    }
    let filter = model
        .field_names()
        .map(|name| match record.get(name) {
            Some(value) if !value.is_null() => format!("{name}=={}", value.to_single_quoted()),
            _ => format!("{name} IS NULL"),
        })
        .collect::<Vec<_>>()
        .join(" AND ");
    Some(filter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::Field;

    fn users() -> Model {
        Model::builder("users")
            .field("id", Field::integer().primary_key())
            .field("name", Field::text())
            .build()
            .unwrap()
    }

    #[test]
    fn test_create_table() {
        assert_eq!(
            create_table(&users()),
            "CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT)"
        );

        let plain = Model::builder("t")
            .field("x", Field::real())
            .build()
            .unwrap();
        assert_eq!(create_table(&plain), "CREATE TABLE t (x REAL)");
    }

    #[test]
    fn test_insert_quotes_every_value() {
        let values = Record::new().with_value("id", 1).with_value("name", "a");
        assert_eq!(
            insert(&users(), &values).unwrap(),
            r#"INSERT INTO users (id, name) VALUES ("1", "a")"#
        );
    }

    #[test]
    fn test_insert_extra_field() {
        let values = Record::new()
            .with_value("id", 1)
            .with_value("name", "a")
            .with_value("zzz", 0);
        match insert(&users(), &values).unwrap_err() {
            OrmError::ExtraFields(extra) => assert_eq!(extra, vec!["zzz"]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_insert_missing_field() {
        let values = Record::new().with_value("id", 1);
        match insert(&users(), &values).unwrap_err() {
            OrmError::MissingFields(missing) => assert_eq!(missing, vec!["name"]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_insert_swapped_field_reports_missing() {
        let values = Record::new().with_value("id", 1).with_value("nmae", "a");
        match insert(&users(), &values).unwrap_err() {
            OrmError::MissingFields(missing) => assert_eq!(missing, vec!["name"]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_select_where() {
        assert_eq!(select_all(&users()), "SELECT * FROM users");
        assert_eq!(
            select_where(&users(), "id", "> 5").unwrap(),
            "SELECT * FROM users WHERE id > 5"
        );
        assert!(matches!(
            select_where(&users(), "zzz", "> 5"),
            Err(OrmError::UnknownColumn(c)) if c == "zzz"
        ));
    }

    #[test]
    fn test_delete_uses_full_row() {
        let row = Record::new().with_value("id", 1).with_value("name", "a");
        assert_eq!(
            delete(&users(), &row),
            "DELETE FROM users WHERE id=='1' AND name=='a'"
        );
    }

    #[test]
    fn test_delete_null_compares_with_is_null() {
        let row = Record::new()
            .with_value("id", 1)
            .with_value("name", Value::Null);
        assert_eq!(
            delete(&users(), &row),
            "DELETE FROM users WHERE id=='1' AND name IS NULL"
        );
    }

    #[test]
    fn test_update_replaces_named_fields_only() {
        let row = Record::new().with_value("id", 1).with_value("name", "a");
        let values = Record::new().with_value("name", "it's new");
        assert_eq!(
            update(&users(), &row, &values),
            "UPDATE users SET id='1', name='it''s new' WHERE id=='1' AND name=='a'"
        );
    }
}
