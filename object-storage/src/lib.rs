//! Object storage client for migrated media.
//!
//! This crate provides:
//! - [`ObjectStorage`] trait for abstracting uploads to a bucket
//! - [`StorageClient`] production client for a Supabase-compatible storage API
//! - [`MockObjectStorage`] in-memory client for tests
//! - [`StorageSource`] config enum for choosing between mock and live clients
//! - [`public_object_url`] the public URL shape of a stored object
//!
//! ## Usage with StorageSource
//!
//! ```ignore
//! use object_storage::StorageSource;
//!
//! // Development/testing: keep objects in memory
//! let storage = StorageSource::mock().into_storage()?;
//!
//! // Production: talk to the storage service
//! let storage = StorageSource::live("https://project.supabase.co", api_key, "uploads")
//!     .into_storage()?;
//!
//! storage.check_bucket().await?;
//! storage.upload("banners/hero.jpg", bytes, "image/jpeg", true).await?;
//! ```

mod client;
mod mock;

pub use client::StorageClient;
pub use mock::{MockObjectStorage, StoredObject};

use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("upload of {key} rejected with status {status}: {body}")]
    Rejected {
        key: String,
        status: u16,
        body: String,
    },
    #[error("storage service refused the API key with status {status}: {body}")]
    Unauthorized { status: u16, body: String },
    #[error("object already exists: {0}")]
    Conflict(String),
    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Trait for writing objects into a storage bucket.
///
/// Production code uses [`StorageClient`], tests use [`MockObjectStorage`].
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Uploads `bytes` under `key`.
    ///
    /// With `upsert` set, an existing object at `key` is overwritten;
    /// otherwise the upload fails with [`StorageError::Conflict`].
    async fn upload(&self, key: &str, bytes: Vec<u8>, content_type: &str, upsert: bool)
        -> Result<()>;

    /// Checks that the service is reachable and accepts the API key.
    ///
    /// Transport failures and [`StorageError::Unauthorized`] mean no upload
    /// can succeed.
    async fn check_bucket(&self) -> Result<()>;
}

/// `{base_url}/storage/v1/object/public/{bucket}/{key}`
pub fn public_object_url(base_url: &str, bucket: &str, key: &str) -> String {
    format!(
        "{}/storage/v1/object/public/{}/{}",
        base_url.trim_end_matches('/'),
        bucket,
        key.trim_start_matches('/')
    )
}

/// Configuration for the object storage backend.
#[derive(Debug, Clone)]
pub enum StorageSource {
    /// Keep objects in memory.
    Mock,

    /// Talk to a live storage service.
    Live {
        /// Service base URL (e.g. "https://project.supabase.co")
        base_url: String,
        /// API key sent as `apikey` and bearer token
        api_key: String,
        bucket: String,
    },
}

impl StorageSource {
    pub fn mock() -> Self {
        Self::Mock
    }

    pub fn live(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        bucket: impl Into<String>,
    ) -> Self {
        Self::Live {
            base_url: base_url.into(),
            api_key: api_key.into(),
            bucket: bucket.into(),
        }
    }

    /// Creates the matching [`ObjectStorage`] implementation.
    pub fn into_storage(self) -> Result<Box<dyn ObjectStorage>> {
        match self {
            Self::Mock => Ok(Box::new(MockObjectStorage::new())),
            Self::Live {
                base_url,
                api_key,
                bucket,
            } => Ok(Box::new(StorageClient::new(&base_url, &api_key, &bucket)?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_object_url() {
        assert_eq!(
            public_object_url("https://abc.supabase.co", "uploads", "banners/x.jpg"),
            "https://abc.supabase.co/storage/v1/object/public/uploads/banners/x.jpg"
        );
        assert_eq!(
            public_object_url("https://abc.supabase.co/", "uploads", "/news/y.png"),
            "https://abc.supabase.co/storage/v1/object/public/uploads/news/y.png"
        );
    }

    #[tokio::test]
    async fn test_mock_source_into_storage() {
        let storage = StorageSource::mock().into_storage().unwrap();
        storage.check_bucket().await.unwrap();
        storage
            .upload("gallery/a.gif", vec![1], "image/gif", true)
            .await
            .unwrap();
    }

    #[test]
    fn test_live_source_rejects_bad_base_url() {
        let result = StorageSource::live("not a url", "key", "uploads").into_storage();
        assert!(matches!(result, Err(StorageError::Config(_))));
    }
}
