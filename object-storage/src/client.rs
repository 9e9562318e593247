// HTTP client for a Supabase-compatible storage API
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client as ReqwestClient, StatusCode, Url};
use tracing::{debug, warn};

use crate::{ObjectStorage, Result, StorageError};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Production storage client.
///
/// # Example
///
/// ```ignore
/// use object_storage::{ObjectStorage, StorageClient};
///
/// let client = StorageClient::new("https://project.supabase.co", api_key, "uploads")?;
/// client.check_bucket().await?;
/// client.upload("news/launch.webp", bytes, "image/webp", true).await?;
/// ```
pub struct StorageClient {
    base_url: Url,
    bucket: String,
    client: ReqwestClient,
}

impl StorageClient {
    pub fn new(base_url: &str, api_key: &str, bucket: &str) -> Result<Self> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| StorageError::Config(format!("invalid storage URL {base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(StorageError::Config(format!(
                "storage URL {base_url} cannot carry a path"
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert("apikey", header_value(api_key)?);
        headers.insert(AUTHORIZATION, header_value(&format!("Bearer {api_key}"))?);

        let client = ReqwestClient::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            base_url,
            bucket: bucket.to_string(),
            client,
        })
    }

    /// Upload endpoint for `key`: `{base}/storage/v1/object/{bucket}/{key}`.
    ///
    /// Each `/`-separated part of the key becomes one percent-encoded path
    /// segment, so `#`, `?` and `%` stay part of the object name.
    pub fn object_endpoint(&self, key: &str) -> Result<Url> {
        self.endpoint(&["storage", "v1", "object", self.bucket.as_str()], key)
    }

    /// Bucket endpoint: `{base}/storage/v1/bucket/{bucket}`.
    pub fn bucket_endpoint(&self) -> Result<Url> {
        self.endpoint(&["storage", "v1", "bucket"], &self.bucket)
    }

    fn endpoint(&self, prefix: &[&str], key: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                StorageError::Config(format!("storage URL {} cannot carry a path", self.base_url))
            })?
            .pop_if_empty()
            .extend(prefix)
            .extend(key.split('/').filter(|segment| !segment.is_empty()));
        Ok(url)
    }
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|_| StorageError::Config("storage API key is not a valid header value".to_string()))
}

#[async_trait]
impl ObjectStorage for StorageClient {
    async fn upload(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
        upsert: bool,
    ) -> Result<()> {
        let size = bytes.len();
        let res = self
            .client
            .post(self.object_endpoint(key)?)
            .header(CONTENT_TYPE, content_type)
            .header("x-upsert", if upsert { "true" } else { "false" })
            .body(bytes)
            .send()
            .await?;

        let status = res.status();
        if status.is_success() {
            debug!(key, size, "Uploaded object");
            return Ok(());
        }

        let body = res.text().await.unwrap_or_default();
        if status == StatusCode::CONFLICT {
            return Err(StorageError::Conflict(key.to_string()));
        }
        Err(StorageError::Rejected {
            key: key.to_string(),
            status: status.as_u16(),
            body,
        })
    }

    async fn check_bucket(&self) -> Result<()> {
        let res = self.client.get(self.bucket_endpoint()?).send().await?;

        let status = res.status();
        if status.is_success() {
            debug!(bucket = %self.bucket, "Storage bucket reachable");
            return Ok(());
        }

        let body = res.text().await.unwrap_or_default();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(StorageError::Unauthorized {
                status: status.as_u16(),
                body,
            });
        }

        // Bucket metadata can be hidden from the anon role while uploads still work.
        warn!(
            "Storage bucket {} lookup returned {}: {}",
            self.bucket, status, body
        );
        Ok(())
    }
}
