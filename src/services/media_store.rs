use std::path::PathBuf;

use chrono::Utc;
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::utils::error::{AppError, AppResult};

const FALLBACK_FILE_NAME: &str = "upload";

/// Everything that is not safe inside a single URL path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Thumbnail,
    Video,
}

impl MediaKind {
    /// Classifies by the client-declared MIME type. Only `image/*` counts as a
    /// thumbnail; absent or unparsable types land with the videos.
    pub fn from_content_type(content_type: Option<&str>) -> Self {
        match content_type.and_then(|ct| ct.parse::<mime::Mime>().ok()) {
            Some(parsed) if parsed.type_() == mime::IMAGE => MediaKind::Thumbnail,
            _ => MediaKind::Video,
        }
    }

    pub fn folder(&self) -> &'static str {
        match self {
            MediaKind::Thumbnail => "thumbnails",
            MediaKind::Video => "videos",
        }
    }
}

#[derive(Debug, Clone)]
pub struct StoredMedia {
    pub kind: MediaKind,
    pub file_name: String,
    pub path: PathBuf,
    pub public_url: String,
}

/// Local-disk store rooted at the public directory.
pub struct MediaStore {
    root: PathBuf,
}

impl MediaStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn folder_path(&self, kind: MediaKind) -> PathBuf {
        self.root.join(kind.folder())
    }

    /// Writes `data` as `<epoch millis>_<original name>` and returns its public
    /// URL, with the file name percent-encoded. Same-millisecond uploads of the
    /// same name overwrite each other.
    pub async fn store(
        &self,
        original_name: &str,
        content_type: Option<&str>,
        data: &[u8],
    ) -> AppResult<StoredMedia> {
        let kind = MediaKind::from_content_type(content_type);

        tracing::info!(
            "Storing upload: {} ({} bytes, type: {})",
            original_name,
            data.len(),
            content_type.unwrap_or("unknown")
        );

        let dir = self.folder_path(kind);
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| AppError::Upload(format!("Failed to create {}: {}", dir.display(), e)))?;

        let file_name = format!(
            "{}_{}",
            Utc::now().timestamp_millis(),
            sanitize_file_name(original_name)
        );
        let path = dir.join(&file_name);

        let mut file = fs::File::create(&path)
            .await
            .map_err(|e| AppError::Upload(format!("Failed to create file: {}", e)))?;

        file.write_all(data)
            .await
            .map_err(|e| AppError::Upload(format!("Failed to write file: {}", e)))?;

        file.flush()
            .await
            .map_err(|e| AppError::Upload(format!("Failed to flush file: {}", e)))?;

        let public_url = format!(
            "/{}/{}",
            kind.folder(),
            utf8_percent_encode(&file_name, SEGMENT)
        );

        tracing::info!(
            "File stored: path={}, size={} bytes, url={}",
            path.display(),
            data.len(),
            public_url
        );

        Ok(StoredMedia {
            kind,
            file_name,
            path,
            public_url,
        })
    }
}

/// Keeps only the final path component so a declared name cannot leave the folder.
pub fn sanitize_file_name(original_name: &str) -> String {
    let last = original_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();

    match last {
        "" | "." | ".." => FALLBACK_FILE_NAME.to_string(),
        name => name.to_string(),
    }
}
