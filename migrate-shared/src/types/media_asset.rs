use std::path::{Path, PathBuf};

/// A media file found under one of the local upload directories.
///
/// The bytes are not held here; they are read right before the upload and
/// dropped once it completes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MediaAsset {
    pub directory: String,
    pub file_name: String,
    pub local_path: PathBuf,
    pub content_type: &'static str,
}

impl MediaAsset {
    pub fn new(directory: &str, local_path: &Path) -> Self {
        let file_name = local_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            directory: directory.to_string(),
            content_type: content_type_for(&file_name),
            file_name,
            local_path: local_path.to_path_buf(),
        }
    }

    /// Object storage key: `{directory}/{file_name}`.
    pub fn key(&self) -> String {
        format!("{}/{}", self.directory, self.file_name)
    }
}

/// Content type inferred from the file extension. Unknown extensions are
/// treated as JPEG.
pub fn content_type_for(file_name: &str) -> &'static str {
    let extension = Path::new(file_name)
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase());

    match extension.as_deref() {
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        _ => "image/jpeg",
    }
}
