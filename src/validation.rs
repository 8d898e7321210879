//! Client-side upload validation
//!
//! A candidate file is accepted when its declared MIME type is PNG or JPEG and
//! it is no larger than 5 MiB. Accepted files get a human-readable size and a
//! placeholder resolution that is filled in once the image has been decoded.

use crate::constants::*;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("{}", ERR_UNSUPPORTED_TYPE)]
    UnsupportedType { mime: String },
    #[error("{}", ERR_TOO_LARGE)]
    TooLarge { size: u64 },
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
}

/// A file the user picked or dropped, before validation
#[derive(Debug, Clone)]
pub struct FileCandidate {
    pub name: String,
    pub mime: String,
    pub size: u64,
    pub path: Option<PathBuf>,
    pub bytes: Option<Arc<[u8]>>,
}

impl FileCandidate {
    /// Build a candidate from a file on disk, deriving the MIME type from its extension
    pub fn from_path(path: &Path) -> Result<Self, UploadError> {
        let meta = std::fs::metadata(path).map_err(|source| UploadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        Ok(Self {
            mime: mime_from_path(path).to_string(),
            name,
            size: meta.len(),
            path: Some(path.to_path_buf()),
            bytes: None,
        })
    }

    /// Build a candidate from an in-memory payload (drag-and-drop without a path)
    pub fn from_bytes(name: &str, declared_mime: &str, bytes: Arc<[u8]>) -> Self {
        let mime = if declared_mime.is_empty() {
            mime_from_path(Path::new(name)).to_string()
        } else {
            declared_mime.to_string()
        };
        Self {
            name: name.to_string(),
            mime,
            size: bytes.len() as u64,
            path: None,
            bytes: Some(bytes),
        }
    }
}

/// Result of validating a candidate. `is_valid` implies `error` is `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileValidation {
    pub is_valid: bool,
    pub error: Option<String>,
    pub size: Option<String>,
    pub resolution: Option<String>,
}

impl FileValidation {
    pub fn rejected(err: &UploadError) -> Self {
        Self {
            is_valid: false,
            error: Some(err.to_string()),
            size: None,
            resolution: None,
        }
    }

    pub fn accepted(size: u64) -> Self {
        Self {
            is_valid: true,
            error: None,
            size: Some(format_megabytes(size)),
            resolution: Some(RESOLUTION_PENDING.to_string()),
        }
    }

    /// The record after the image has reported its pixel dimensions
    pub fn with_resolution(&self, width: u32, height: u32) -> Self {
        Self {
            resolution: Some(format!("{} × {} px", width, height)),
            ..self.clone()
        }
    }

    pub fn is_resolving(&self) -> bool {
        self.is_valid && self.resolution.as_deref() == Some(RESOLUTION_PENDING)
    }
}

/// Check declared type first, then size.
pub fn check_file(candidate: &FileCandidate) -> Result<(), UploadError> {
    if !ALLOWED_MIME_TYPES.contains(&candidate.mime.as_str()) {
        return Err(UploadError::UnsupportedType {
            mime: candidate.mime.clone(),
        });
    }
    if candidate.size > MAX_UPLOAD_BYTES {
        return Err(UploadError::TooLarge {
            size: candidate.size,
        });
    }
    Ok(())
}

pub fn validate_file(candidate: &FileCandidate) -> FileValidation {
    match check_file(candidate) {
        Ok(()) => FileValidation::accepted(candidate.size),
        Err(e) => FileValidation::rejected(&e),
    }
}

/// Bytes to "X.XX MB"
pub fn format_megabytes(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / BYTES_PER_MB)
}

/// Declared MIME type for a path, the way a browser would report it
pub fn mime_from_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(mime: &str, size: u64) -> FileCandidate {
        FileCandidate {
            name: "leaf.png".into(),
            mime: mime.into(),
            size,
            path: None,
            bytes: None,
        }
    }

    #[test]
    fn rejects_unsupported_types() {
        for mime in ["image/gif", "image/webp", "application/pdf", "", "IMAGE/PNG"] {
            let v = validate_file(&candidate(mime, 10));
            assert!(!v.is_valid, "{mime} should be rejected");
            assert_eq!(v.error.as_deref(), Some(ERR_UNSUPPORTED_TYPE));
            assert!(v.size.is_none());
        }
    }

    #[test]
    fn type_is_checked_before_size() {
        let v = validate_file(&candidate("image/gif", MAX_UPLOAD_BYTES * 4));
        assert_eq!(v.error.as_deref(), Some(ERR_UNSUPPORTED_TYPE));
    }

    #[test]
    fn size_threshold_is_inclusive() {
        for mime in ALLOWED_MIME_TYPES {
            let at_limit = validate_file(&candidate(mime, MAX_UPLOAD_BYTES));
            assert!(at_limit.is_valid);
            assert!(at_limit.error.is_none());

            let over = validate_file(&candidate(mime, MAX_UPLOAD_BYTES + 1));
            assert!(!over.is_valid);
            assert_eq!(over.error.as_deref(), Some(ERR_TOO_LARGE));
        }
    }

    #[test]
    fn accepted_record_has_size_and_placeholder() {
        let v = validate_file(&candidate("image/jpeg", 1_572_864));
        assert!(v.is_valid);
        assert_eq!(v.size.as_deref(), Some("1.50 MB"));
        assert_eq!(v.resolution.as_deref(), Some(RESOLUTION_PENDING));
        assert!(v.is_resolving());
    }

    #[test]
    fn size_string_rounds_to_two_decimals() {
        assert_eq!(format_megabytes(0), "0.00 MB");
        assert_eq!(format_megabytes(1), "0.00 MB");
        assert_eq!(format_megabytes(1_048_576), "1.00 MB");
        assert_eq!(format_megabytes(MAX_UPLOAD_BYTES), "5.00 MB");
        assert_eq!(format_megabytes(123_456), "0.12 MB");
    }

    #[test]
    fn resolution_is_filled_once_decoded() {
        let v = validate_file(&candidate("image/png", 2048)).with_resolution(1920, 1080);
        assert!(v.is_valid);
        assert_eq!(v.resolution.as_deref(), Some("1920 × 1080 px"));
        assert_eq!(v.size.as_deref(), Some("0.00 MB"));
        assert!(!v.is_resolving());
    }

    #[test]
    fn mime_from_extension_is_case_insensitive() {
        assert_eq!(mime_from_path(Path::new("a.PNG")), "image/png");
        assert_eq!(mime_from_path(Path::new("b.JpEg")), "image/jpeg");
        assert_eq!(mime_from_path(Path::new("c.jpg")), "image/jpeg");
        assert_eq!(mime_from_path(Path::new("d.gif")), "image/gif");
        assert_eq!(mime_from_path(Path::new("noext")), "application/octet-stream");
    }

    #[test]
    fn dropped_bytes_fall_back_to_extension() {
        let bytes: Arc<[u8]> = Arc::from(vec![0u8; 42]);
        let c = FileCandidate::from_bytes("photo.jpg", "", bytes.clone());
        assert_eq!(c.mime, "image/jpeg");
        assert_eq!(c.size, 42);

        let c = FileCandidate::from_bytes("photo.jpg", "image/gif", bytes);
        assert_eq!(c.mime, "image/gif");
    }

    #[test]
    fn candidate_from_path_reads_size() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("leaf.jpeg");
        std::fs::write(&path, vec![0u8; 300]).unwrap();
        let c = FileCandidate::from_path(&path).unwrap();
        assert_eq!(c.name, "leaf.jpeg");
        assert_eq!(c.mime, "image/jpeg");
        assert_eq!(c.size, 300);
    }

    #[test]
    fn candidate_from_missing_path_is_io_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = FileCandidate::from_path(&dir.path().join("missing.png")).unwrap_err();
        assert!(matches!(err, UploadError::Io { .. }));
    }
}
