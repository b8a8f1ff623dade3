use url::{Position, Url};

use crate::models::video::{CreateVideoRequest, UpdateVideoRequest, Video};
use crate::services::media_store::MediaKind;
use crate::utils::error::{AppError, AppResult};

/// Translates between the stored media reference (a root-relative public path
/// such as `/videos/123_clip.mp4`, or a foreign absolute URL) and what clients see.
///
/// Stored paths are always in URL-encoded form, so joining onto the base and
/// stripping it off again gives back the same string.
#[derive(Debug, Clone, Default)]
pub struct MediaUrls {
    base: Option<Url>,
}

impl MediaUrls {
    pub fn new(base: Option<&str>) -> AppResult<Self> {
        let base = match base {
            Some(raw) => {
                let mut url = Url::parse(raw)
                    .map_err(|e| AppError::Internal(format!("Invalid media base URL: {}", e)))?;
                if !url.path().ends_with('/') {
                    let path = format!("{}/", url.path());
                    url.set_path(&path);
                }
                url.set_query(None);
                url.set_fragment(None);
                Some(url)
            }
            None => None,
        };
        Ok(Self { base })
    }

    pub fn to_public(&self, stored: &str) -> String {
        match (&self.base, stored.strip_prefix('/')) {
            (Some(base), Some(relative)) if !stored.starts_with("//") => base
                .join(relative)
                .map(|u| u.to_string())
                .unwrap_or_else(|_| stored.to_string()),
            _ => stored.to_string(),
        }
    }

    pub fn to_stored(&self, value: &str, kind: MediaKind) -> String {
        let value = value.trim();
        if value.is_empty() {
            return String::new();
        }

        if let Ok(absolute) = Url::parse(value) {
            return match &self.base {
                Some(base) if absolute.as_str().starts_with(base.as_str()) => {
                    format!("/{}", &absolute.as_str()[base.as_str().len()..])
                }
                _ => value.to_string(),
            };
        }

        let path = if value.starts_with('/') {
            value.to_string()
        } else if value.contains('/') {
            format!("/{}", value)
        } else {
            format!("/{}/{}", kind.folder(), value)
        };
        encode_path(&path)
    }

    pub fn present(&self, mut video: Video) -> Video {
        video.thumbnail = self.to_public(&video.thumbnail);
        video.video_url = self.to_public(&video.video_url);
        video
    }

    pub fn normalize_create(&self, mut request: CreateVideoRequest) -> CreateVideoRequest {
        request.thumbnail = request
            .thumbnail
            .map(|t| self.to_stored(&t, MediaKind::Thumbnail));
        request.video_url = request
            .video_url
            .map(|v| self.to_stored(&v, MediaKind::Video));
        request
    }

    pub fn normalize_update(&self, mut request: UpdateVideoRequest) -> UpdateVideoRequest {
        request.thumbnail = request
            .thumbnail
            .map(|t| self.to_stored(&t, MediaKind::Thumbnail));
        request.video_url = request
            .video_url
            .map(|v| self.to_stored(&v, MediaKind::Video));
        request
    }
}

/// Runs a root-relative path through the URL parser. Already-encoded input
/// comes back unchanged; raw spaces and other unsafe bytes get escaped.
fn encode_path(path: &str) -> String {
    let origin = Url::parse("http://localhost/").ok();
    match origin.and_then(|o| o.join(path).ok()) {
        Some(url) if !path.starts_with("//") => url[Position::BeforePath..].to_string(),
        _ => path.to_string(),
    }
}
