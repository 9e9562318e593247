use thiserror::Error;

/// Errors raised by the destination connector.
///
/// `Connect` and `Acquire` are fatal for a run. `Insert`, `Introspect` and
/// `Rejected` concern a single table or row and are absorbed by the table
/// migrator.
#[derive(Debug, Error)]
pub enum DestinationError {
    #[error("Failed to connect to destination database: {0}")]
    Connect(#[source] sqlx::Error),

    #[error("Failed to acquire destination connection: {0}")]
    Acquire(#[source] sqlx::Error),

    #[error("Failed to inspect destination table {table}: {source}")]
    Introspect {
        table: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("Failed to insert into {table}: {source}")]
    Insert {
        table: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("Insert into {table} rejected: {message}")]
    Rejected { table: String, message: String },
}

impl DestinationError {
    /// Driver message without the wrapping context, for per-row log lines.
    pub fn driver_message(&self) -> String {
        match self {
            DestinationError::Insert { source, .. } => match source {
                sqlx::Error::Database(db) => db.message().to_string(),
                other => other.to_string(),
            },
            DestinationError::Introspect { source, .. } => source.to_string(),
            DestinationError::Rejected { message, .. } => message.clone(),
            DestinationError::Connect(e) | DestinationError::Acquire(e) => e.to_string(),
        }
    }
}
