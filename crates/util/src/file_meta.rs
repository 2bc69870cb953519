//! File metadata as seen by the upload gate.
//!
//! Only the name, byte size and a MIME type guessed from the extension are
//! collected; file contents are never opened.

use std::{fs, io, path::Path};

use visadesk_types::FileMeta;

/// MIME type reported for extensions we do not recognize.
pub const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

/// Guesses a MIME type from the file extension.
pub fn mime_for_path(path: &Path) -> &'static str {
    let Some(extension) = path.extension().and_then(|ext| ext.to_str()) else {
        return FALLBACK_MIME_TYPE;
    };
    match extension.to_ascii_lowercase().as_str() {
        "pdf" => "application/pdf",
        "xls" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "eml" => "message/rfc822",
        "txt" | "text" | "log" => "text/plain",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "csv" => "text/csv",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "zip" => "application/zip",
        "json" => "application/json",
        _ => FALLBACK_MIME_TYPE,
    }
}

/// Reads the metadata of a regular file.
pub fn file_meta_from_path(path: &Path) -> io::Result<FileMeta> {
    let metadata = fs::metadata(path)?;
    if !metadata.is_file() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} is not a regular file", path.display()),
        ));
    }
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(FileMeta::new(name, mime_for_path(path), metadata.len()))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn guesses_known_extensions() {
        assert_eq!(mime_for_path(Path::new("a/b/timesheet.PDF")), "application/pdf");
        assert_eq!(mime_for_path(Path::new("hours.xlsx")), ALLOWED_XLSX);
        assert_eq!(mime_for_path(Path::new("thread.eml")), "message/rfc822");
        assert_eq!(mime_for_path(Path::new("README")), FALLBACK_MIME_TYPE);
    }

    const ALLOWED_XLSX: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

    #[test]
    fn reads_name_and_size() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("notes.txt");
        let mut file = fs::File::create(&path).expect("create file");
        file.write_all(b"hello world").expect("write file");

        let meta = file_meta_from_path(&path).expect("metadata");
        assert_eq!(meta.name, "notes.txt");
        assert_eq!(meta.mime_type, "text/plain");
        assert_eq!(meta.size_bytes, 11);
    }

    #[test]
    fn directories_are_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let error = file_meta_from_path(dir.path()).expect_err("directory is not a file");
        assert_eq!(error.kind(), io::ErrorKind::InvalidInput);
    }
}
