// Insert statement construction and parameter encoding
use std::collections::HashMap;

use migrate_shared::types::Value;

use crate::utils::quote_identifier;

/// Builds `INSERT INTO t (cols) VALUES ($1, ..) ON CONFLICT DO NOTHING`.
///
/// Placeholders are numbered in `columns` order. When `column_types` knows a
/// column, its placeholder is cast to that type (`$1::"pg_catalog"."int4"`) so
/// the text-encoded parameter is parsed by the destination.
///
/// The conflict clause names no target: it relies on whatever unique
/// constraints the destination table declares.
pub fn insert_statement(
    table: &str,
    columns: &[String],
    column_types: &HashMap<String, String>,
) -> String {
    let column_list = columns
        .iter()
        .map(|c| quote_identifier(c))
        .collect::<Vec<_>>()
        .join(", ");

    let placeholders = columns
        .iter()
        .enumerate()
        .map(|(i, column)| match column_types.get(column) {
            Some(pg_type) => format!("${}::{}", i + 1, pg_type),
            None => format!("${}", i + 1),
        })
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "INSERT INTO {} ({}) VALUES ({}) ON CONFLICT DO NOTHING",
        quote_identifier(table),
        column_list,
        placeholders
    )
}

/// Text encoding of a source value, `None` for SQL NULL.
pub fn encode_param(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Integer(i) => Some(i.to_string()),
        Value::Real(r) => Some(r.to_string()),
        Value::Text(s) | Value::Timestamp(s) => Some(s.clone()),
        Value::Blob(bytes) => Some(format!("\\x{}", hex::encode(bytes))),
    }
}
