//! Mock object storage for testing and local development.
//!
//! Objects live in a map keyed by object key, so an upsert replaces the
//! previous bytes and content type in place.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;

use crate::{ObjectStorage, Result, StorageError};

/// An object held by [`MockObjectStorage`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredObject {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// In-memory storage bucket.
#[derive(Default)]
pub struct MockObjectStorage {
    objects: RwLock<HashMap<String, StoredObject>>,
    failing_keys: RwLock<HashSet<String>>,
    key_rejected: AtomicBool,
}

impl MockObjectStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes [`ObjectStorage::check_bucket`] fail as if the API key were refused.
    pub fn rejecting_key(self) -> Self {
        self.key_rejected.store(true, Ordering::Relaxed);
        self
    }

    /// Makes every upload to `key` fail with a 500 rejection.
    pub fn fail_on(&self, key: &str) {
        self.failing_keys
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.to_string());
    }

    pub fn get(&self, key: &str) -> Option<StoredObject> {
        self.objects
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(key)
            .cloned()
    }

    /// Stored keys, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .objects
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .keys()
            .cloned()
            .collect();
        keys.sort();
        keys
    }

    pub fn len(&self) -> usize {
        self.objects.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ObjectStorage for MockObjectStorage {
    async fn upload(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
        upsert: bool,
    ) -> Result<()> {
        if self
            .failing_keys
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .contains(key)
        {
            return Err(StorageError::Rejected {
                key: key.to_string(),
                status: 500,
                body: "mock failure".to_string(),
            });
        }

        let mut objects = self.objects.write().unwrap_or_else(|e| e.into_inner());
        if !upsert && objects.contains_key(key) {
            return Err(StorageError::Conflict(key.to_string()));
        }
        objects.insert(
            key.to_string(),
            StoredObject {
                bytes,
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }

    async fn check_bucket(&self) -> Result<()> {
        if self.key_rejected.load(Ordering::Relaxed) {
            return Err(StorageError::Unauthorized {
                status: 401,
                body: "Invalid JWT".to_string(),
            });
        }
        Ok(())
    }
}
