use migrate_shared::types::{RowRecord, TableDescriptor};

use crate::errors::SourceError;

/// Read side of the migration.
///
/// Implementors expose the source catalog and a full, unpaginated read of
/// each table.
#[async_trait::async_trait]
pub trait SourceReader: Send + Sync {
    /// Lists every user table in the source catalog, ordered by name.
    ///
    /// # Returns
    ///
    /// A `Result` with the table descriptors, or a `SourceError` if the
    /// catalog cannot be queried.
    async fn list_tables(&self) -> Result<Vec<TableDescriptor>, SourceError>;

    /// Reads all rows of `table` in source order.
    ///
    /// The whole table is materialized in memory; there is no cursor.
    ///
    /// # Arguments
    ///
    /// * `table` - A table previously returned by [`SourceReader::list_tables`].
    async fn read_all(&self, table: &TableDescriptor) -> Result<Vec<RowRecord>, SourceError>;
}
