use migrate_shared::types::RowRecord;

use crate::errors::DestinationError;

/// What happened to a row that did not fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowOutcome {
    Inserted,
    /// The destination already held a conflicting row; `ON CONFLICT DO NOTHING`
    /// swallowed the insert.
    Skipped,
}

/// Write side of the migration: a single acquired destination session.
///
/// Every insert is autocommitted. There is no surrounding transaction, so rows
/// inserted before a failure stay committed.
#[async_trait::async_trait]
pub trait DestinationWriter: Send {
    /// Counts the rows already present in `table`.
    async fn count_rows(&mut self, table: &str) -> Result<i64, DestinationError>;

    /// Inserts one row.
    ///
    /// # Arguments
    ///
    /// * `table` - Destination table, named exactly as in the source.
    /// * `columns` - Column list for the table, in insert order.
    /// * `row` - The row; its values are taken in `columns` order.
    async fn insert_row(
        &mut self,
        table: &str,
        columns: &[String],
        row: &RowRecord,
    ) -> Result<RowOutcome, DestinationError>;
}
