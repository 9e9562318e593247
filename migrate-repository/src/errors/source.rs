use thiserror::Error;

/// Errors raised by the source connector.
///
/// All of them are connector-level: the run cannot continue without the
/// source, so callers propagate them instead of isolating them per row.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Failed to open source database {path}: {source}")]
    Connect {
        path: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("Failed to list source tables: {0}")]
    Catalog(#[source] sqlx::Error),

    #[error("Failed to read table {table}: {source}")]
    Read {
        table: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("Source table not found: {0}")]
    TableNotFound(String),
}
