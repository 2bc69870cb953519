//! Upload metadata and the validation gate's verdicts.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::WeekId;

/// Largest accepted upload, inclusive (10 MiB).
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// MIME types accepted by the upload gate: PDF, two Excel variants,
/// RFC-822 email, plain text, JPEG and PNG.
pub const ALLOWED_MIME_TYPES: [&str; 7] = [
    "application/pdf",
    "application/vnd.ms-excel",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "message/rfc822",
    "text/plain",
    "image/jpeg",
    "image/png",
];

/// Identifier of a tracked upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UploadId(pub u64);

impl fmt::Display for UploadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "upload-{}", self.0)
    }
}

/// File metadata supplied by the host's file picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMeta {
    pub name: String,
    pub mime_type: String,
    pub size_bytes: u64,
}

impl FileMeta {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size_bytes,
        }
    }
}

/// Returns `true` when the MIME type is in the allow-list.
pub fn is_allowed_mime_type(mime_type: &str) -> bool {
    let normalized = mime_type.trim().to_ascii_lowercase();
    ALLOWED_MIME_TYPES.contains(&normalized.as_str())
}

/// Why a single file was dropped from a batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadRejection {
    #[error("File \"{name}\" is too large ({size_label}); the maximum size is {limit_label}")]
    TooLarge {
        name: String,
        size_label: String,
        limit_label: String,
    },
    #[error(
        "File \"{name}\" has unsupported type '{mime_type}'; allowed types are PDF, Excel, email (.eml), text, JPEG and PNG"
    )]
    UnsupportedType { name: String, mime_type: String },
}

impl UploadRejection {
    pub fn file_name(&self) -> &str {
        match self {
            Self::TooLarge { name, .. } | Self::UnsupportedType { name, .. } => name,
        }
    }
}

/// Result of handing a batch of files to the upload queue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub accepted: Vec<UploadId>,
    pub rejected: Vec<UploadRejection>,
}

/// Emitted when a simulated upload reaches 100%.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedUpload {
    pub upload_id: UploadId,
    pub week_id: WeekId,
    pub file: FileMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allow_list_matches_case_insensitively() {
        assert!(is_allowed_mime_type("application/pdf"));
        assert!(is_allowed_mime_type("Image/PNG"));
        assert!(!is_allowed_mime_type("application/zip"));
        assert!(!is_allowed_mime_type(""));
    }

    #[test]
    fn rejection_messages_name_the_file_and_limit() {
        let too_large = UploadRejection::TooLarge {
            name: "scan.pdf".into(),
            size_label: "12.0 MB".into(),
            limit_label: "10.0 MB".into(),
        };
        let message = too_large.to_string();
        assert!(message.contains("scan.pdf"));
        assert!(message.contains("12.0 MB"));
        assert!(message.contains("10.0 MB"));

        let unsupported = UploadRejection::UnsupportedType {
            name: "archive.zip".into(),
            mime_type: "application/zip".into(),
        };
        assert!(unsupported.to_string().contains("application/zip"));
        assert_eq!(unsupported.file_name(), "archive.zip");
    }
}
