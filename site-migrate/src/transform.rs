//! Row transformation: legacy upload paths in media columns become public
//! object storage URLs.
//!
//! Legacy paths come from a filesystem-backed upload tree, with forward or
//! back slashes and any depth (`uploads/banners/x.jpg`,
//! `C:\site\uploads\banners\x.jpg`). Only the last two segments, directory and
//! file name, survive into the object key.

use migrate_shared::types::{RowRecord, Value};
use object_storage::public_object_url;

/// Object key for a legacy path: its last two non-empty segments.
///
/// - two or more segments: `"a/b/banners/x.jpg"` gives `"banners/x.jpg"`
/// - one segment: `"x.jpg"` gives `"x.jpg"`
/// - no segments (empty, blank, only separators): `None`
pub fn media_key(legacy_path: &str) -> Option<String> {
    let segments: Vec<&str> = legacy_path
        .split(['/', '\\'])
        .filter(|segment| !segment.trim().is_empty())
        .collect();

    match segments.as_slice() {
        [] => None,
        [file] => Some(file.to_string()),
        [.., directory, file] => Some(format!("{directory}/{file}")),
    }
}

/// Rewrites the text value of every `media_columns` column present in `row`
/// with `url_builder`.
///
/// Nulls, non-text values and values the builder declines (`None`) are left
/// as they are. Columns outside `media_columns` are never touched.
pub fn transform_row<S, F>(mut row: RowRecord, media_columns: &[S], url_builder: F) -> RowRecord
where
    S: AsRef<str>,
    F: Fn(&str) -> Option<String>,
{
    for column in media_columns {
        let Some(Value::Text(path)) = row.get_mut(column.as_ref()) else {
            continue;
        };
        if let Some(url) = url_builder(path) {
            *path = url;
        }
    }
    row
}

/// Row transformer bound to a storage base URL and bucket.
#[derive(Clone, Debug)]
pub struct RowTransformer {
    base_url: String,
    bucket: String,
    media_columns: Vec<String>,
}

impl RowTransformer {
    pub fn new(base_url: &str, bucket: &str, media_columns: &[&str]) -> Self {
        Self {
            base_url: base_url.to_string(),
            bucket: bucket.to_string(),
            media_columns: media_columns.iter().map(|c| c.to_string()).collect(),
        }
    }

    /// `{base}/storage/v1/object/public/{bucket}/{directory}/{file}` for a
    /// legacy path, `None` when the path has no segments.
    pub fn public_url(&self, legacy_path: &str) -> Option<String> {
        media_key(legacy_path).map(|key| public_object_url(&self.base_url, &self.bucket, &key))
    }

    pub fn transform(&self, row: RowRecord) -> RowRecord {
        transform_row(row, self.media_columns.as_slice(), |path| self.public_url(path))
    }
}
