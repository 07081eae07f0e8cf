use crate::error::{GhostError, Result};
use std::fmt;
use std::path::Path;

/// MIME type used when the extension is unknown
pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

const MIME_TYPES: &[(&str, &str)] = &[
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("svg", "image/svg+xml"),
    ("webp", "image/webp"),
    ("mp4", "video/mp4"),
    ("webm", "video/webm"),
    ("ogv", "video/ogg"),
    ("mp3", "audio/mpeg"),
    ("zip", "application/zip"),
    ("pdf", "application/pdf"),
    ("json", "application/json"),
    ("css", "text/css"),
];

/// Detect a MIME type from a file name's extension (case-insensitive)
pub fn mime_type_for(file_name: &str) -> &'static str {
    let ext = match Path::new(file_name).extension().and_then(|e| e.to_str()) {
        Some(ext) => ext.to_ascii_lowercase(),
        None => return DEFAULT_MIME_TYPE,
    };

    MIME_TYPES
        .iter()
        .find(|(known, _)| *known == ext)
        .map(|(_, mime)| *mime)
        .unwrap_or(DEFAULT_MIME_TYPE)
}

/// File content ready to be sent as the `file` part of a multipart upload.
#[derive(Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub mime_type: String,
    pub content: Vec<u8>,
}

impl UploadFile {
    /// Wrap in-memory content; the MIME type is detected from `file_name`
    pub fn from_bytes(file_name: impl Into<String>, content: Vec<u8>) -> Self {
        let file_name = file_name.into();
        UploadFile {
            mime_type: mime_type_for(&file_name).to_string(),
            file_name,
            content,
        }
    }

    /// Read a file from disk
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                GhostError::usage(format!("upload requires a file path, got {}", path.display()))
            })?
            .to_string();

        let content = std::fs::read(path)?;
        Ok(UploadFile::from_bytes(file_name, content))
    }
}

impl fmt::Debug for UploadFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadFile")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("len", &self.content.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_known_extensions() {
        assert_eq!(mime_type_for("photo.png"), "image/png");
        assert_eq!(mime_type_for("photo.JPG"), "image/jpeg");
        assert_eq!(mime_type_for("clip.ogv"), "video/ogg");
        assert_eq!(mime_type_for("theme.zip"), "application/zip");
        assert_eq!(mime_type_for("/tmp/dir.d/style.css"), "text/css");
    }

    #[test]
    fn test_unknown_extensions_default() {
        assert_eq!(mime_type_for("archive.tar.xz"), DEFAULT_MIME_TYPE);
        assert_eq!(mime_type_for("README"), DEFAULT_MIME_TYPE);
        assert_eq!(mime_type_for(".png"), DEFAULT_MIME_TYPE);
    }

    #[test]
    fn test_from_path_reads_content() {
        let mut file = tempfile::Builder::new().suffix(".webp").tempfile().unwrap();
        file.write_all(b"RIFF....WEBP").unwrap();

        let upload = UploadFile::from_path(file.path()).unwrap();
        assert_eq!(upload.mime_type, "image/webp");
        assert_eq!(upload.content, b"RIFF....WEBP");
        assert!(upload.file_name.ends_with(".webp"));
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = UploadFile::from_path("/definitely/not/here.png").unwrap_err();
        assert!(matches!(err, GhostError::Io(_)));
    }
}
