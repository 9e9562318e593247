// Configuration constants and environment helpers
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

/// Columns whose string values are legacy upload paths.
pub const MEDIA_COLUMNS: [&str; 4] = ["image", "banner", "image_url", "logo"];

/// Upload directories migrated to object storage, in processing order.
pub const MEDIA_DIRECTORIES: [&str; 6] =
    ["banners", "blogs", "gallery", "news", "projects", "activities"];

/// Destination bucket for media.
pub const STORAGE_BUCKET: &str = "uploads";

// Destination connection
pub const DESTINATION_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

// Local defaults
pub const DEFAULT_SQLITE_PATH: &str = "database.sqlite";
pub const DEFAULT_UPLOADS_DIR: &str = "uploads";

/// Get DATABASE_URL from environment
pub fn get_database_url() -> Result<String> {
    std::env::var("DATABASE_URL").context("DATABASE_URL must be set")
}

/// Get SUPABASE_URL from environment
pub fn get_storage_url() -> Result<String> {
    std::env::var("SUPABASE_URL").context("SUPABASE_URL must be set")
}

/// Get SUPABASE_ANON_KEY from environment
pub fn get_storage_key() -> Result<String> {
    std::env::var("SUPABASE_ANON_KEY").context("SUPABASE_ANON_KEY must be set")
}

/// Source database file, `SQLITE_PATH` or `database.sqlite`
pub fn get_sqlite_path() -> PathBuf {
    std::env::var("SQLITE_PATH")
        .unwrap_or_else(|_| DEFAULT_SQLITE_PATH.to_string())
        .into()
}

/// Local media root, `UPLOADS_DIR` or `uploads`
pub fn get_uploads_dir() -> PathBuf {
    std::env::var("UPLOADS_DIR")
        .unwrap_or_else(|_| DEFAULT_UPLOADS_DIR.to_string())
        .into()
}
