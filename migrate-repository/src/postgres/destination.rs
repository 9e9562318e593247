// PostgreSQL connection setup and row writing
use std::collections::HashMap;
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use migrate_shared::types::RowRecord;
use sqlx::pool::PoolConnection;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions, PgSslMode};
use sqlx::Postgres;
use tracing::debug;

use super::statement::{encode_param, insert_statement};
use crate::utils::quote_identifier;
use crate::{DestinationError, DestinationWriter, RowOutcome};

const COLUMN_TYPES: &str = "SELECT column_name::text, udt_schema::text, udt_name::text \
     FROM information_schema.columns \
     WHERE table_schema = current_schema() AND table_name = $1";

/// Parses a `postgresql://` URL. TLS is required without certificate
/// verification unless the URL names its own `sslmode`.
pub fn connect_options(url: &str) -> Result<PgConnectOptions, DestinationError> {
    let options = PgConnectOptions::from_str(url).map_err(DestinationError::Connect)?;
    if url.contains("sslmode=") {
        Ok(options)
    } else {
        Ok(options.ssl_mode(PgSslMode::Require))
    }
}

/// Connection pool to the destination database.
pub struct PostgresDestination {
    pool: PgPool,
}

impl PostgresDestination {
    /// Connects eagerly so that an unreachable destination fails here.
    ///
    /// `connect_timeout` bounds the initial connection attempt only.
    pub async fn connect(url: &str, connect_timeout: Duration) -> Result<Self, DestinationError> {
        let options = connect_options(url)?;
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .acquire_timeout(connect_timeout)
            .connect_with(options)
            .await
            .map_err(DestinationError::Connect)?;

        Ok(Self { pool })
    }

    /// Acquires the single session used for the whole run.
    pub async fn acquire(&self) -> Result<PostgresSession, DestinationError> {
        let conn = self.pool.acquire().await.map_err(DestinationError::Acquire)?;
        Ok(PostgresSession {
            conn,
            column_types: HashMap::new(),
        })
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// One acquired destination connection. Statements run in autocommit mode.
pub struct PostgresSession {
    conn: PoolConnection<Postgres>,
    /// table -> column -> quoted type name
    column_types: HashMap<String, HashMap<String, String>>,
}

impl PostgresSession {
    /// Returns the connection to the pool.
    pub fn release(self) {
        drop(self.conn);
    }

    async fn column_types(
        &mut self,
        table: &str,
    ) -> Result<&HashMap<String, String>, DestinationError> {
        if !self.column_types.contains_key(table) {
            let rows: Vec<(String, String, String)> = sqlx::query_as(COLUMN_TYPES)
                .bind(table)
                .fetch_all(&mut *self.conn)
                .await
                .map_err(|source| DestinationError::Introspect {
                    table: table.to_string(),
                    source,
                })?;

            let types: HashMap<String, String> = rows
                .into_iter()
                .map(|(column, schema, udt)| {
                    let pg_type = format!("{}.{}", quote_identifier(&schema), quote_identifier(&udt));
                    (column, pg_type)
                })
                .collect();

            debug!(table, columns = types.len(), "Loaded destination column types");
            self.column_types.insert(table.to_string(), types);
        }

        Ok(&self.column_types[table])
    }
}

#[async_trait]
impl DestinationWriter for PostgresSession {
    async fn count_rows(&mut self, table: &str) -> Result<i64, DestinationError> {
        let sql = format!("SELECT COUNT(*) FROM {}", quote_identifier(table));
        sqlx::query_scalar(&sql)
            .fetch_one(&mut *self.conn)
            .await
            .map_err(|source| DestinationError::Introspect {
                table: table.to_string(),
                source,
            })
    }

    async fn insert_row(
        &mut self,
        table: &str,
        columns: &[String],
        row: &RowRecord,
    ) -> Result<RowOutcome, DestinationError> {
        let sql = insert_statement(table, columns, self.column_types(table).await?);

        let mut query = sqlx::query::<Postgres>(&sql);
        for value in row.values_for(columns) {
            query = query.bind(encode_param(value));
        }

        let result = query
            .execute(&mut *self.conn)
            .await
            .map_err(|source| DestinationError::Insert {
                table: table.to_string(),
                source,
            })?;

        if result.rows_affected() == 0 {
            Ok(RowOutcome::Skipped)
        } else {
            Ok(RowOutcome::Inserted)
        }
    }
}
