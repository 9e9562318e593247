// Connector setup for the standalone executables
use std::future::Future;

use anyhow::{Context, Result};
use migrate_repository::{PostgresDestination, PostgresSession, SqliteSource};
use migrate_shared::types::MigrationRunReport;
use object_storage::{ObjectStorage, StorageSource};
use tracing::info;

use crate::config::{self, DESTINATION_CONNECT_TIMEOUT, MEDIA_COLUMNS, STORAGE_BUCKET};
use crate::migration::{MediaMigrator, MigrationExecutor, MigrationMode, TableMigrator};
use crate::transform::RowTransformer;

/// Opens the connectors `mode` needs from the environment and runs the
/// migration.
///
/// Any connector that cannot be opened aborts the run before anything is
/// written. Open database connectors are closed whether the run succeeds or
/// fails.
pub async fn run(mode: MigrationMode) -> Result<MigrationRunReport> {
    let storage_url = config::get_storage_url()?;
    let transformer = RowTransformer::new(&storage_url, STORAGE_BUCKET, &MEDIA_COLUMNS);

    let storage = if mode.includes_media() {
        let api_key = config::get_storage_key()?;
        Some(connect_storage(&storage_url, &api_key).await?)
    } else {
        None
    };

    let mut databases = if mode.includes_data() {
        Some(connect_databases().await?)
    } else {
        None
    };

    let uploads_dir = config::get_uploads_dir();
    let mut executor = MigrationExecutor::new();

    if let Some((source, _, session)) = databases.as_mut() {
        let migrator = TableMigrator::new(&*source, &transformer);
        executor = executor.with_tables(migrator, session);
    }

    if let Some(storage) = storage.as_deref() {
        executor = executor.with_media(MediaMigrator::new(storage, uploads_dir.clone()));
    }

    let result = executor.execute().await;
    close_after(result, close_databases(databases)).await
}

/// Runs `close` whether or not `result` is an error, then hands `result` back.
async fn close_after<T>(result: Result<T>, close: impl Future<Output = ()>) -> Result<T> {
    close.await;
    result
}

async fn close_databases(
    databases: Option<(SqliteSource, PostgresDestination, PostgresSession)>,
) {
    if let Some((source, destination, session)) = databases {
        session.release();
        destination.close().await;
        source.close().await;
    }
}

async fn connect_databases() -> Result<(SqliteSource, PostgresDestination, PostgresSession)> {
    let sqlite_path = config::get_sqlite_path();
    info!("Opening SQLite database {}...", sqlite_path.display());
    let source = SqliteSource::open(&sqlite_path)
        .await
        .context("Failed to open source database")?;
    info!("✓ Opened SQLite database");

    info!("Connecting to PostgreSQL...");
    let database_url = config::get_database_url()?;
    let destination = PostgresDestination::connect(&database_url, DESTINATION_CONNECT_TIMEOUT)
        .await
        .context("Failed to connect to PostgreSQL")?;
    let session = destination
        .acquire()
        .await
        .context("Failed to acquire PostgreSQL connection")?;
    info!("✓ Connected to PostgreSQL");

    Ok((source, destination, session))
}

async fn connect_storage(storage_url: &str, api_key: &str) -> Result<Box<dyn ObjectStorage>> {
    info!("Connecting to storage...");
    let storage = StorageSource::live(storage_url, api_key, STORAGE_BUCKET)
        .into_storage()
        .context("Failed to create storage client")?;
    storage
        .check_bucket()
        .await
        .context("Failed to connect to storage")?;
    info!("✓ Storage client ready for bucket {}", STORAGE_BUCKET);
    Ok(storage)
}
