//! Directory-scoped file storage service implementation
//!
//! This module provides the [`FilesService`] type, which owns one storage directory and
//! performs every read, write, listing and removal inside it.
//!
//! # Security Model
//!
//! - The root directory is canonicalised once, at construction time
//! - File names are validated with [`validate_file_name`] before being joined to the root
//! - Listing only reports regular files; subdirectories and hidden files are skipped
//!
//! # Implementation Notes
//!
//! - The service holds no open handles; it is cheap to construct per request
//! - A half-written file left behind by a crash is not detected on the next read

use crate::constants::{FORBIDDEN_NAME_PATTERNS, MAX_FILE_NAME_LEN};
use crate::FilesError;
use chrono::{DateTime, Local};
use medform_types::NonEmptyText;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Metadata for a stored file
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct FileMetadata {
    /// Bare file name inside the storage directory
    pub file_name: NonEmptyText,

    /// Size of the file in bytes
    pub size_bytes: u64,

    /// Detected media type (MIME type), if available
    ///
    /// This is a best-effort detection from the file's leading bytes and should not be
    /// considered authoritative.
    pub media_type: Option<NonEmptyText>,

    /// Last modification time in local time
    pub modified_at: DateTime<Local>,
}

/// Checks that `name` is a bare file name that stays inside its directory.
///
/// # Errors
///
/// Returns `FilesError::InvalidPath` if the name is empty, too long, hidden, or contains
/// any of [`FORBIDDEN_NAME_PATTERNS`].
pub fn validate_file_name(name: &str) -> Result<(), FilesError> {
    if name.trim().is_empty() {
        return Err(FilesError::InvalidPath("file name cannot be empty".into()));
    }

    if name.len() > MAX_FILE_NAME_LEN {
        return Err(FilesError::InvalidPath(format!(
            "file name exceeds {} bytes",
            MAX_FILE_NAME_LEN
        )));
    }

    if name.starts_with('.') {
        return Err(FilesError::InvalidPath(format!(
            "hidden file names are not allowed: {}",
            name
        )));
    }

    if let Some(pattern) = FORBIDDEN_NAME_PATTERNS.iter().find(|p| name.contains(**p)) {
        return Err(FilesError::InvalidPath(format!(
            "file name {:?} contains forbidden sequence {:?}",
            name, pattern
        )));
    }

    Ok(())
}

/// Service for managing the files of one storage directory
#[derive(Debug, Clone)]
pub struct FilesService {
    /// Canonicalised storage directory
    root_directory: PathBuf,
}

impl FilesService {
    /// Creates a new `FilesService` for `root_directory`.
    ///
    /// # Errors
    ///
    /// Returns `FilesError::InvalidRootDirectory` if the directory does not exist, is not a
    /// directory, or cannot be canonicalised.
    pub fn new(root_directory: &Path) -> Result<Self, FilesError> {
        if !root_directory.exists() {
            return Err(FilesError::InvalidRootDirectory(format!(
                "Directory does not exist: {}",
                root_directory.display()
            )));
        }

        if !root_directory.is_dir() {
            return Err(FilesError::InvalidRootDirectory(format!(
                "Path is not a directory: {}",
                root_directory.display()
            )));
        }

        let root_directory = root_directory.canonicalize().map_err(|e| {
            FilesError::InvalidRootDirectory(format!(
                "Cannot canonicalize path {}: {}",
                root_directory.display(),
                e
            ))
        })?;

        Ok(Self { root_directory })
    }

    /// Returns the canonicalised storage directory.
    #[must_use]
    pub fn root_directory(&self) -> &Path {
        &self.root_directory
    }

    /// Resolves `name` to its absolute path inside the storage directory.
    ///
    /// The file does not have to exist.
    pub fn path_of(&self, name: &str) -> Result<PathBuf, FilesError> {
        validate_file_name(name)?;
        Ok(self.root_directory.join(name))
    }

    /// Returns whether `name` exists as a regular file.
    ///
    /// Invalid names are reported as absent.
    pub fn contains(&self, name: &str) -> bool {
        self.path_of(name).map(|p| p.is_file()).unwrap_or(false)
    }

    /// Writes `bytes` to `name`, replacing any previous content.
    ///
    /// # Errors
    ///
    /// Returns `FilesError` if the name is invalid or the write fails.
    pub fn write(&self, name: &str, bytes: &[u8]) -> Result<FileMetadata, FilesError> {
        let path = self.path_of(name)?;

        fs::write(&path, bytes).map_err(|e| {
            FilesError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to write file to {}: {}", path.display(), e),
            ))
        })?;

        tracing::debug!("stored {} ({} bytes)", path.display(), bytes.len());
        self.metadata(name)
    }

    /// Reads the whole content of `name`.
    ///
    /// # Errors
    ///
    /// Returns `FilesError::NotFound` if the file does not exist, or `FilesError::Io` if it
    /// cannot be read.
    pub fn read(&self, name: &str) -> Result<Vec<u8>, FilesError> {
        let path = self.path_of(name)?;

        if !path.is_file() {
            return Err(FilesError::NotFound(name.to_owned()));
        }

        fs::read(&path).map_err(|e| {
            FilesError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read file from {}: {}", path.display(), e),
            ))
        })
    }

    /// Removes `name`.
    ///
    /// Returns `Ok(false)` if the file did not exist.
    pub fn remove(&self, name: &str) -> Result<bool, FilesError> {
        let path = self.path_of(name)?;

        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(FilesError::Io(e)),
        }
    }

    /// Returns metadata for `name`.
    ///
    /// # Errors
    ///
    /// Returns `FilesError::NotFound` if the file does not exist.
    pub fn metadata(&self, name: &str) -> Result<FileMetadata, FilesError> {
        let path = self.path_of(name)?;
        metadata_for(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => FilesError::NotFound(name.to_owned()),
            _ => FilesError::Io(e),
        })
    }

    /// Lists the regular files of the directory, sorted by name.
    ///
    /// If `extension` is given only files with that extension (case-insensitive, without
    /// the dot) are returned. Entries whose metadata cannot be read are skipped with a
    /// warning.
    pub fn list(&self, extension: Option<&str>) -> Result<Vec<FileMetadata>, FilesError> {
        let mut entries = Vec::new();

        for entry in fs::read_dir(&self.root_directory)?.flatten() {
            let path = entry.path();
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };

            if validate_file_name(name).is_err() || !path.is_file() {
                continue;
            }

            if let Some(wanted) = extension {
                let matches = path
                    .extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| e.eq_ignore_ascii_case(wanted));
                if !matches {
                    continue;
                }
            }

            match metadata_for(&path) {
                Ok(meta) => entries.push(meta),
                Err(e) => tracing::warn!("skipping {}: {}", path.display(), e),
            }
        }

        entries.sort_by(|a, b| a.file_name.as_str().cmp(b.file_name.as_str()));
        Ok(entries)
    }
}

fn metadata_for(path: &Path) -> std::io::Result<FileMetadata> {
    let meta = fs::metadata(path)?;
    if !meta.is_file() {
        return Err(std::io::Error::new(
            ErrorKind::NotFound,
            format!("{} is not a regular file", path.display()),
        ));
    }

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .and_then(|n| NonEmptyText::new(n).ok())
        .ok_or_else(|| {
            std::io::Error::new(
                ErrorKind::InvalidInput,
                format!("{} has no usable file name", path.display()),
            )
        })?;

    let media_type = infer::get_from_path(path)
        .ok()
        .flatten()
        .and_then(|kind| NonEmptyText::new(kind.mime_type()).ok());

    Ok(FileMetadata {
        file_name,
        size_bytes: meta.len(),
        media_type,
        modified_at: DateTime::<Local>::from(meta.modified()?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const PNG_HEADER: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];

    fn service(temp: &TempDir) -> FilesService {
        FilesService::new(temp.path()).expect("service should open temp dir")
    }

    #[test]
    fn test_files_service_root_not_exists() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("non-existent");

        let service = FilesService::new(&root);

        assert!(matches!(service, Err(FilesError::InvalidRootDirectory(_))));
    }

    #[test]
    fn test_files_service_root_not_directory() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("file.txt");
        fs::write(&root, "not a directory").unwrap();

        let service = FilesService::new(&root);

        assert!(matches!(service, Err(FilesError::InvalidRootDirectory(_))));
    }

    #[test]
    fn test_write_then_read() {
        let temp = TempDir::new().unwrap();
        let service = service(&temp);

        let meta = service.write("report.docx", b"Hello, World!").unwrap();
        assert_eq!(meta.file_name.as_str(), "report.docx");
        assert_eq!(meta.size_bytes, 13);

        assert_eq!(service.read("report.docx").unwrap(), b"Hello, World!");
    }

    #[test]
    fn test_write_replaces_previous_content() {
        let temp = TempDir::new().unwrap();
        let service = service(&temp);

        service.write("doctor_signature.png", b"first").unwrap();
        service.write("doctor_signature.png", b"second").unwrap();

        assert_eq!(service.read("doctor_signature.png").unwrap(), b"second");
    }

    #[test]
    fn test_read_missing_file_is_not_found() {
        let temp = TempDir::new().unwrap();
        let service = service(&temp);

        assert!(matches!(
            service.read("missing.pdf"),
            Err(FilesError::NotFound(name)) if name == "missing.pdf"
        ));
    }

    #[test]
    fn test_traversal_names_are_rejected() {
        let temp = TempDir::new().unwrap();
        let service = service(&temp);

        for name in ["../secret", "a/b.docx", "a\\b.docx", ".hidden", "", "c:evil", ".."] {
            assert!(
                matches!(service.path_of(name), Err(FilesError::InvalidPath(_))),
                "{name:?} should be rejected"
            );
        }
        assert!(!service.contains("../secret"));
    }

    #[test]
    fn test_remove_reports_whether_file_existed() {
        let temp = TempDir::new().unwrap();
        let service = service(&temp);
        service.write("t.json", b"{}").unwrap();

        assert!(service.remove("t.json").unwrap());
        assert!(!service.remove("t.json").unwrap());
        assert!(!service.contains("t.json"));
    }

    #[test]
    fn test_list_filters_by_extension_and_sorts() {
        let temp = TempDir::new().unwrap();
        let service = service(&temp);
        service.write("b.docx", b"b").unwrap();
        service.write("a.DOCX", b"a").unwrap();
        service.write("c.pdf", b"c").unwrap();
        fs::create_dir(temp.path().join("nested.docx")).unwrap();

        let names: Vec<String> = service
            .list(Some("docx"))
            .unwrap()
            .into_iter()
            .map(|m| m.file_name.into_inner())
            .collect();

        assert_eq!(names, vec!["a.DOCX".to_string(), "b.docx".to_string()]);
        assert_eq!(service.list(None).unwrap().len(), 3);
    }

    #[test]
    fn test_media_type_is_detected() {
        let temp = TempDir::new().unwrap();
        let service = service(&temp);

        let meta = service.write("stamp_signature.png", PNG_HEADER).unwrap();
        assert_eq!(
            meta.media_type.as_ref().map(|m| m.as_str()),
            Some("image/png")
        );

        let meta = service.write("notes.txt", b"plain").unwrap();
        assert!(meta.media_type.is_none());
    }

    #[test]
    fn test_metadata_serializes() {
        let temp = TempDir::new().unwrap();
        let service = service(&temp);
        let meta = service.write("print_20240101_120000.docx", b"x").unwrap();

        let json = serde_json::to_string(&meta).unwrap();
        assert!(json.contains("print_20240101_120000.docx"));
    }
}
