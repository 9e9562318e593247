// Media migration: upload directories mirrored into object storage
use std::io;
use std::path::{Path, PathBuf};

use migrate_shared::types::{DirectoryReport, FileFailure, MediaAsset};
use object_storage::{ObjectStorage, Result as StorageResult};
use tracing::{info, warn};

use crate::config::MEDIA_DIRECTORIES;

/// Uploads the files of each media directory under `{directory}/{file_name}`.
///
/// Uploads use upsert semantics, so a rerun overwrites instead of
/// duplicating. Missing directories are skipped; a failing file is recorded
/// and the loop moves on.
pub struct MediaMigrator<'a> {
    storage: &'a dyn ObjectStorage,
    uploads_root: PathBuf,
    directories: Vec<String>,
}

impl<'a> MediaMigrator<'a> {
    pub fn new(storage: &'a dyn ObjectStorage, uploads_root: impl Into<PathBuf>) -> Self {
        Self {
            storage,
            uploads_root: uploads_root.into(),
            directories: MEDIA_DIRECTORIES.iter().map(|d| d.to_string()).collect(),
        }
    }

    /// Replaces the default directory list.
    pub fn with_directories(mut self, directories: &[&str]) -> Self {
        self.directories = directories.iter().map(|d| d.to_string()).collect();
        self
    }

    pub async fn migrate_all(&self) -> Vec<DirectoryReport> {
        let mut reports = Vec::with_capacity(self.directories.len());
        for directory in &self.directories {
            reports.push(self.migrate_directory(directory).await);
        }
        reports
    }

    pub async fn migrate_directory(&self, directory: &str) -> DirectoryReport {
        let path = self.uploads_root.join(directory);

        if !is_directory(&path).await {
            info!("Directory {} not found, skipping", path.display());
            return DirectoryReport::missing(directory);
        }

        let assets = match list_assets(&path, directory).await {
            Ok(assets) => assets,
            Err(e) => {
                warn!("Failed to list {}: {}", path.display(), e);
                let mut report = DirectoryReport::new(directory, 0);
                report.failures.push(FileFailure {
                    file_name: directory.to_string(),
                    message: e.to_string(),
                });
                return report;
            }
        };

        info!("Migrating {} files from {}...", assets.len(), directory);
        let mut report = DirectoryReport::new(directory, assets.len());

        for asset in &assets {
            match self.upload(asset).await {
                Ok(()) => report.files_uploaded += 1,
                Err(e) => {
                    warn!("  Error uploading {}: {}", asset.file_name, e);
                    report.failures.push(FileFailure {
                        file_name: asset.file_name.clone(),
                        message: e.to_string(),
                    });
                }
            }
        }

        info!(
            "✓ {}: {}/{} files uploaded",
            directory, report.files_uploaded, report.files_found
        );
        report
    }

    async fn upload(&self, asset: &MediaAsset) -> StorageResult<()> {
        let bytes = tokio::fs::read(&asset.local_path).await?;

        self.storage
            .upload(&asset.key(), bytes, asset.content_type, true)
            .await
    }
}

async fn is_directory(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|meta| meta.is_dir())
        .unwrap_or(false)
}

/// Regular files directly inside `path`, ordered by file name.
async fn list_assets(path: &Path, directory: &str) -> io::Result<Vec<MediaAsset>> {
    let mut entries = tokio::fs::read_dir(path).await?;
    let mut assets = Vec::new();

    while let Some(entry) = entries.next_entry().await? {
        if entry.file_type().await?.is_file() {
            assets.push(MediaAsset::new(directory, &entry.path()));
        }
    }

    assets.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    Ok(assets)
}
