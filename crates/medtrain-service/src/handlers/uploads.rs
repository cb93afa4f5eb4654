//! Media upload handler.
//!
//! Files are written under the upload root in one subfolder per media type
//! and served back from `/uploads/<subfolder>/<name>`.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Multipart, Path, State};
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use crate::error::ApiError;
use crate::state::AppState;

/// Extensions accepted for any media type, lowercase.
pub const ALLOWED_EXTENSIONS: [&str; 9] =
    ["png", "jpg", "jpeg", "gif", "mp4", "mp3", "wav", "m4a", "pdf"];

/// Kind of uploaded media, selected by the URL path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    /// Stored under `images/`.
    Image,
    /// Stored under `videos/`.
    Video,
    /// Stored under `audios/`.
    Audio,
    /// Stored under `pdfs/`.
    Pdf,
}

impl MediaKind {
    /// Parse the `:file_type` path segment.
    #[must_use]
    pub fn from_path(file_type: &str) -> Option<Self> {
        match file_type {
            "image" => Some(Self::Image),
            "video" => Some(Self::Video),
            "audio" => Some(Self::Audio),
            "pdf" => Some(Self::Pdf),
            _ => None,
        }
    }

    /// Subfolder under the upload root.
    #[must_use]
    pub const fn subfolder(self) -> &'static str {
        match self {
            Self::Image => "images",
            Self::Video => "videos",
            Self::Audio => "audios",
            Self::Pdf => "pdfs",
        }
    }
}

/// Upload response.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// Relative URL of the stored file.
    pub url: String,
    /// Confirmation text.
    pub message: String,
}

/// Reduce a client-supplied filename to a safe single path component.
///
/// Directory parts are dropped, whitespace becomes `_`, anything outside
/// ASCII alphanumerics and `.-_` is removed, and leading dots or
/// underscores are stripped. May return an empty string.
#[must_use]
pub fn sanitize_filename(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or_default();

    let cleaned: String = base
        .chars()
        .filter_map(|c| {
            if c.is_whitespace() {
                Some('_')
            } else if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                Some(c)
            } else {
                None
            }
        })
        .collect();

    cleaned.trim_start_matches(['.', '_']).to_string()
}

/// Whether the filename carries an accepted extension.
#[must_use]
pub fn has_allowed_extension(name: &str) -> bool {
    name.rsplit_once('.').is_some_and(|(stem, ext)| {
        !stem.is_empty() && ALLOWED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str())
    })
}

/// Accept one multipart `file` field and store it.
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    Path(file_type): Path<String>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let kind = MediaKind::from_path(&file_type)
        .ok_or_else(|| ApiError::InvalidFileType(format!("Unknown upload type: {file_type}")))?;

    let mut upload: Option<(String, Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Multipart error: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Read error: {e}")))?;
        upload = Some((filename, data));
        break;
    }

    let (original_name, data) =
        upload.ok_or_else(|| ApiError::MissingFile("No file provided".into()))?;

    if original_name.trim().is_empty() {
        return Err(ApiError::MissingFile("No file selected".into()));
    }
    if data.is_empty() {
        return Err(ApiError::MissingFile("Uploaded file is empty".into()));
    }

    let safe_name = sanitize_filename(&original_name);
    if !has_allowed_extension(&safe_name) {
        return Err(ApiError::InvalidFileType("Invalid file type".into()));
    }

    let stored_name = format!("{}_{safe_name}", Utc::now().format("%Y%m%d_%H%M%S"));
    let dir = state.upload_root().join(kind.subfolder());

    tokio::fs::create_dir_all(&dir)
        .await
        .map_err(|e| ApiError::Internal(format!("create {}: {e}", dir.display())))?;

    let path = dir.join(&stored_name);
    let size = data.len();
    tokio::fs::write(&path, data)
        .await
        .map_err(|e| ApiError::Internal(format!("write {}: {e}", path.display())))?;

    let url = format!("/uploads/{}/{stored_name}", kind.subfolder());
    tracing::info!(url = %url, bytes = size, "File uploaded");

    Ok(Json(UploadResponse {
        url,
        message: "File uploaded successfully".into(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_strips_paths_and_odd_characters() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("C:\\Users\\me\\My Photo.PNG"), "My_Photo.PNG");
        assert_eq!(sanitize_filename(".hidden.jpg"), "hidden.jpg");
        assert_eq!(sanitize_filename("héllo wörld.mp3"), "hllo_wrld.mp3");
        assert_eq!(sanitize_filename("..."), "");
    }

    #[test]
    fn extension_check_is_case_insensitive() {
        assert!(has_allowed_extension("scan.PDF"));
        assert!(has_allowed_extension("clip.m4a"));
        assert!(!has_allowed_extension("script.sh"));
        assert!(!has_allowed_extension("pdf"));
        assert!(!has_allowed_extension(".png"));
    }

    #[test]
    fn media_kinds_map_to_subfolders() {
        assert_eq!(MediaKind::from_path("audio").map(MediaKind::subfolder), Some("audios"));
        assert_eq!(MediaKind::from_path("doc"), None);
    }
}
