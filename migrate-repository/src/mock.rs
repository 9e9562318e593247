//! In-memory connectors for tests and dry runs.
//!
//! [`MockSource`] serves pre-registered tables. [`MockDestination`] records
//! inserted rows per table and can be told to reject rows or to enforce a
//! unique column, which is how `ON CONFLICT DO NOTHING` is reproduced.
//!
//! # Example
//!
//! ```ignore
//! use migrate_repository::{MockDestination, MockSource};
//! use migrate_shared::types::RowRecord;
//!
//! let source = MockSource::new()
//!     .with_table("events", vec![RowRecord::new().with("id", 1_i64)]);
//! let mut destination = MockDestination::new().with_table("events");
//! ```

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use migrate_shared::types::{RowRecord, TableDescriptor, Value};

use crate::{DestinationError, DestinationWriter, RowOutcome, SourceError, SourceReader};

/// Source connector backed by a map of table name to rows.
#[derive(Debug, Default)]
pub struct MockSource {
    tables: BTreeMap<String, Vec<RowRecord>>,
    fail_catalog: bool,
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(mut self, name: &str, rows: Vec<RowRecord>) -> Self {
        self.add_table(name, rows);
        self
    }

    /// Makes `list_tables` fail, as a broken catalog would.
    pub fn failing_catalog(mut self) -> Self {
        self.fail_catalog = true;
        self
    }

    pub fn add_table(&mut self, name: &str, rows: Vec<RowRecord>) {
        self.tables.insert(name.to_string(), rows);
    }
}

#[async_trait]
impl SourceReader for MockSource {
    async fn list_tables(&self) -> Result<Vec<TableDescriptor>, SourceError> {
        if self.fail_catalog {
            return Err(SourceError::Catalog(sqlx::Error::Protocol(
                "mock catalog unavailable".to_string(),
            )));
        }
        Ok(self.tables.keys().map(TableDescriptor::new).collect())
    }

    async fn read_all(&self, table: &TableDescriptor) -> Result<Vec<RowRecord>, SourceError> {
        self.tables
            .get(&table.name)
            .cloned()
            .ok_or_else(|| SourceError::TableNotFound(table.name.clone()))
    }
}

#[derive(Debug, Default)]
struct MockTable {
    rows: Vec<RowRecord>,
    unique_column: Option<String>,
    rejected: Vec<(String, Value)>,
}

/// Destination connector that keeps inserted rows in memory.
///
/// Only tables registered with [`MockDestination::with_table`] exist; inserts
/// into any other table fail the way a missing relation would.
#[derive(Debug, Default)]
pub struct MockDestination {
    tables: HashMap<String, MockTable>,
}

impl MockDestination {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(mut self, name: &str) -> Self {
        self.tables.entry(name.to_string()).or_default();
        self
    }

    /// Rows whose `column` equals an existing row's value are skipped.
    pub fn with_unique_column(mut self, table: &str, column: &str) -> Self {
        self.tables.entry(table.to_string()).or_default().unique_column = Some(column.to_string());
        self
    }

    /// Rows whose `column` equals `value` fail to insert.
    pub fn rejecting(mut self, table: &str, column: &str, value: impl Into<Value>) -> Self {
        self.tables
            .entry(table.to_string())
            .or_default()
            .rejected
            .push((column.to_string(), value.into()));
        self
    }

    /// Seeds a row as if it had been inserted by an earlier run.
    pub fn seed(&mut self, table: &str, row: RowRecord) {
        self.tables.entry(table.to_string()).or_default().rows.push(row);
    }

    pub fn rows(&self, table: &str) -> &[RowRecord] {
        self.tables
            .get(table)
            .map(|t| t.rows.as_slice())
            .unwrap_or(&[])
    }
}

#[async_trait]
impl DestinationWriter for MockDestination {
    async fn count_rows(&mut self, table: &str) -> Result<i64, DestinationError> {
        self.tables
            .get(table)
            .map(|t| t.rows.len() as i64)
            .ok_or_else(|| missing_relation(table))
    }

    async fn insert_row(
        &mut self,
        table: &str,
        columns: &[String],
        row: &RowRecord,
    ) -> Result<RowOutcome, DestinationError> {
        let target = self
            .tables
            .get_mut(table)
            .ok_or_else(|| missing_relation(table))?;

        let stored: RowRecord = columns
            .iter()
            .cloned()
            .zip(row.values_for(columns).cloned())
            .collect();

        for (column, value) in &target.rejected {
            if stored.get(column) == Some(value) {
                return Err(DestinationError::Rejected {
                    table: table.to_string(),
                    message: format!("value {value} rejected for column \"{column}\""),
                });
            }
        }

        if let Some(unique) = &target.unique_column {
            let key = stored.get(unique);
            if target.rows.iter().any(|existing| existing.get(unique) == key) {
                return Ok(RowOutcome::Skipped);
            }
        }

        target.rows.push(stored);
        Ok(RowOutcome::Inserted)
    }
}

fn missing_relation(table: &str) -> DestinationError {
    DestinationError::Rejected {
        table: table.to_string(),
        message: format!("relation \"{table}\" does not exist"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_mock_source_reads_registered_table() {
        let source = MockSource::new().with_table(
            "events",
            vec![RowRecord::new().with("id", 1_i64), RowRecord::new().with("id", 2_i64)],
        );

        let rows = source.read_all(&TableDescriptor::new("events")).await.unwrap();
        assert_eq!(rows.len(), 2);

        let missing = source.read_all(&TableDescriptor::new("nope")).await;
        assert!(matches!(missing, Err(SourceError::TableNotFound(name)) if name == "nope"));
    }

    #[tokio::test]
    async fn test_mock_destination_unique_column_skips_duplicates() {
        let mut destination = MockDestination::new()
            .with_table("team")
            .with_unique_column("team", "id");
        let cols = columns(&["id", "name"]);

        let first = RowRecord::new().with("id", 1_i64).with("name", "Ana");
        let again = RowRecord::new().with("id", 1_i64).with("name", "Ana");

        assert_eq!(
            destination.insert_row("team", &cols, &first).await.unwrap(),
            RowOutcome::Inserted
        );
        assert_eq!(
            destination.insert_row("team", &cols, &again).await.unwrap(),
            RowOutcome::Skipped
        );
        assert_eq!(destination.rows("team").len(), 1);
    }

    #[tokio::test]
    async fn test_mock_destination_rejects_and_reports_missing_tables() {
        let mut destination = MockDestination::new().rejecting("news", "title", None::<&str>);
        let cols = columns(&["id", "title"]);

        let bad = RowRecord::new().with("id", 1_i64).with("title", None::<&str>);
        let err = destination.insert_row("news", &cols, &bad).await.unwrap_err();
        assert!(err.driver_message().contains("rejected"));

        let err = destination.insert_row("other", &cols, &bad).await.unwrap_err();
        assert_eq!(err.driver_message(), "relation \"other\" does not exist");
        assert!(destination.count_rows("other").await.is_err());
    }
}
