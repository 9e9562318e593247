// Table migration: discover, read, transform, insert row by row
use migrate_repository::{discover_tables, DestinationWriter, RowOutcome, SourceError, SourceReader};
use migrate_shared::types::{RowFailure, TableDescriptor, TableReport};
use tracing::{info, warn};

use crate::transform::RowTransformer;

/// Copies every source table into the destination.
///
/// Tables run one after another in catalog order, rows one after another in
/// source order. A failing row is recorded and skipped; only source errors
/// abort the run.
pub struct TableMigrator<'a> {
    source: &'a dyn SourceReader,
    transformer: &'a RowTransformer,
}

impl<'a> TableMigrator<'a> {
    pub fn new(source: &'a dyn SourceReader, transformer: &'a RowTransformer) -> Self {
        Self {
            source,
            transformer,
        }
    }

    /// Migrates all discovered tables through `destination`.
    pub async fn migrate_all(
        &self,
        destination: &mut dyn DestinationWriter,
    ) -> Result<Vec<TableReport>, SourceError> {
        let tables = discover_tables(self.source).await?;

        let mut reports = Vec::with_capacity(tables.len());
        for table in &tables {
            reports.push(self.migrate_table(table, destination).await?);
        }

        Ok(reports)
    }

    /// Migrates a single table.
    pub async fn migrate_table(
        &self,
        table: &TableDescriptor,
        destination: &mut dyn DestinationWriter,
    ) -> Result<TableReport, SourceError> {
        info!("Migrating table {}...", table);
        let rows = self.source.read_all(table).await?;

        if rows.is_empty() {
            info!("  {} is empty, skipping", table);
            return Ok(TableReport::new(&table.name, 0));
        }

        warn_if_destination_has_rows(destination, &table.name).await;

        // All rows of a table share the first row's columns.
        let columns = rows[0].column_names();
        let mut report = TableReport::new(&table.name, rows.len());

        for (row_index, row) in rows.into_iter().enumerate() {
            let row = self.transformer.transform(row);

            match destination.insert_row(&table.name, &columns, &row).await {
                Ok(RowOutcome::Inserted) => report.rows_inserted += 1,
                Ok(RowOutcome::Skipped) => report.rows_skipped += 1,
                Err(e) => {
                    let message = e.driver_message();
                    warn!("  Error inserting into {}: {}", table, message);
                    report.failures.push(RowFailure { row_index, message });
                }
            }
        }

        info!(
            "✓ {}: {}/{} rows inserted",
            table, report.rows_inserted, report.rows_found
        );
        if report.rows_skipped > 0 {
            info!("  {} rows already present, skipped", report.rows_skipped);
        }

        Ok(report)
    }
}

/// Reruns over a populated table may duplicate rows when the destination has
/// no unique constraint matching the source key.
async fn warn_if_destination_has_rows(destination: &mut dyn DestinationWriter, table: &str) {
    match destination.count_rows(table).await {
        Ok(0) => {}
        Ok(existing) => warn!(
            "  Destination table {} already holds {} rows; rows without a matching unique constraint will be duplicated",
            table, existing
        ),
        Err(e) => warn!("  Could not count rows in destination table {}: {}", table, e),
    }
}
