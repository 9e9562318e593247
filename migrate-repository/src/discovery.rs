//! Schema discovery: the set of tables to migrate comes from the source
//! catalog at runtime, never from a hardcoded list.
use migrate_shared::types::TableDescriptor;
use tracing::info;

use crate::{SourceError, SourceReader};

/// Returns every table in the source catalog, in alphabetical order.
///
/// SQLite's own `sqlite_*` bookkeeping tables (`sqlite_sequence`,
/// `sqlite_stat1`, ...) are left out by [`SqliteSource`](crate::SqliteSource);
/// every user table is included, empty ones too.
///
/// A failing catalog query is returned as an error and aborts the run.
pub async fn discover_tables(source: &dyn SourceReader) -> Result<Vec<TableDescriptor>, SourceError> {
    let mut tables = source.list_tables().await?;
    tables.sort();
    tables.dedup();

    info!("Discovered {} tables", tables.len());
    Ok(tables)
}
