use std::path::Path;

use async_trait::async_trait;
use migrate_shared::types::{RowRecord, TableDescriptor, Value};
use sqlx::sqlite::{SqliteColumn, SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::{Column, Row, TypeInfo, ValueRef};

use crate::utils::quote_identifier;
use crate::{SourceError, SourceReader};

/// User tables only; `sqlite_*` names are reserved for SQLite's bookkeeping.
const LIST_TABLES: &str = "SELECT name FROM sqlite_master \
     WHERE type = 'table' AND name NOT LIKE 'sqlite\\_%' ESCAPE '\\' \
     ORDER BY name";

/// Read-only connector over an embedded SQLite file.
pub struct SqliteSource {
    pool: SqlitePool,
}

impl SqliteSource {
    /// Opens the database file at `path` read-only. A missing file is an error.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let options = SqliteConnectOptions::new()
            .filename(path)
            .read_only(true)
            .create_if_missing(false);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|source| SourceError::Connect {
                path: path.display().to_string(),
                source,
            })?;

        Ok(Self { pool })
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl SourceReader for SqliteSource {
    async fn list_tables(&self) -> Result<Vec<TableDescriptor>, SourceError> {
        let names: Vec<String> = sqlx::query_scalar(LIST_TABLES)
            .fetch_all(&self.pool)
            .await
            .map_err(SourceError::Catalog)?;

        Ok(names.into_iter().map(TableDescriptor::new).collect())
    }

    async fn read_all(&self, table: &TableDescriptor) -> Result<Vec<RowRecord>, SourceError> {
        let read_error = |source| SourceError::Read {
            table: table.name.clone(),
            source,
        };

        let sql = format!("SELECT * FROM {}", quote_identifier(&table.name));
        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(read_error)?;

        rows.iter()
            .map(|row| decode_row(row).map_err(read_error))
            .collect()
    }
}

fn decode_row(row: &SqliteRow) -> Result<RowRecord, sqlx::Error> {
    row.columns()
        .iter()
        .map(|column| Ok::<_, sqlx::Error>((column.name().to_string(), decode_value(row, column)?)))
        .collect()
}

/// Decodes by the value's storage class, not by the declared column type:
/// SQLite lets any column hold any class.
fn decode_value(row: &SqliteRow, column: &SqliteColumn) -> Result<Value, sqlx::Error> {
    let index = column.ordinal();
    let raw = row.try_get_raw(index)?;
    if raw.is_null() {
        return Ok(Value::Null);
    }
    let storage = raw.type_info().name().to_ascii_uppercase();

    let value = match storage.as_str() {
        "INTEGER" => Value::Integer(row.try_get_unchecked::<i64, _>(index)?),
        "REAL" => Value::Real(row.try_get_unchecked::<f64, _>(index)?),
        "BLOB" => Value::Blob(row.try_get_unchecked::<Vec<u8>, _>(index)?),
        _ => {
            let text: String = row.try_get_unchecked(index)?;
            if is_temporal(column.type_info().name()) {
                Value::Timestamp(text)
            } else {
                Value::Text(text)
            }
        }
    };

    Ok(value)
}

fn is_temporal(declared_type: &str) -> bool {
    let declared_type = declared_type.to_ascii_uppercase();
    declared_type.contains("DATE") || declared_type.contains("TIME")
}
