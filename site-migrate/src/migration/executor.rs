// Migration executor - orchestrates the migration flow
use std::time::Instant;

use anyhow::Result;
use migrate_repository::DestinationWriter;
use migrate_shared::types::MigrationRunReport;
use tracing::{info, warn};

use super::{MediaMigrator, TableMigrator};

/// Which stages a run includes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MigrationMode {
    /// Tables only.
    DataOnly,
    /// Media only.
    MediaOnly,
    /// Tables, then media.
    Full,
}

impl MigrationMode {
    pub fn includes_data(self) -> bool {
        matches!(self, MigrationMode::DataOnly | MigrationMode::Full)
    }

    pub fn includes_media(self) -> bool {
        matches!(self, MigrationMode::MediaOnly | MigrationMode::Full)
    }
}

/// Migration executor that coordinates the migration process.
///
/// The table stage always runs before the media stage. Both are optional.
#[derive(Default)]
pub struct MigrationExecutor<'a> {
    tables: Option<(TableMigrator<'a>, &'a mut dyn DestinationWriter)>,
    media: Option<MediaMigrator<'a>>,
}

impl<'a> MigrationExecutor<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tables(
        mut self,
        migrator: TableMigrator<'a>,
        destination: &'a mut dyn DestinationWriter,
    ) -> Self {
        self.tables = Some((migrator, destination));
        self
    }

    pub fn with_media(mut self, migrator: MediaMigrator<'a>) -> Self {
        self.media = Some(migrator);
        self
    }

    /// Execute the migration. Only connector-level failures return `Err`.
    pub async fn execute(self) -> Result<MigrationRunReport> {
        let start_time = Instant::now();
        let mut report = MigrationRunReport::default();

        if let Some((migrator, destination)) = self.tables {
            info!("\n=== Migrating tables ===");
            report.tables = migrator.migrate_all(destination).await?;
        }

        if let Some(migrator) = self.media {
            info!("\n=== Migrating media ===");
            report.directories = migrator.migrate_all().await;
        }

        log_summary(&report, start_time);
        Ok(report)
    }
}

fn log_summary(report: &MigrationRunReport, start_time: Instant) {
    info!("\n=== Migration Complete ===");
    info!("Total time: {:.2}s", start_time.elapsed().as_secs_f64());

    if !report.tables.is_empty() {
        info!("Tables: {}", report.tables.len());
        info!(
            "Rows inserted: {}/{}",
            report.rows_inserted(),
            report.rows_found()
        );
    }
    if !report.directories.is_empty() {
        info!(
            "Files uploaded: {}/{}",
            report.files_uploaded(),
            report.files_found()
        );
    }

    if !report.is_clean() {
        warn!(
            "Completed with {} row failures and {} file failures, see warnings above",
            report.row_failures(),
            report.file_failures()
        );
    }
}
