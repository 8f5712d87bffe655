//! MedForm File Storage
//!
//! This crate provides the file storage used by MedForm for generated documents, saved
//! templates and signature images.
//!
//! ## Design Principles
//!
//! - Each [`FilesService`] is bound to exactly one flat directory
//! - Callers address files by bare file name, never by path
//! - Names that could escape the directory are rejected before any I/O happens
//! - Writes replace existing files (last writer wins, no locking)
//!
//! ## Storage Model
//!
//! ```text
//! <base>/
//! ├── documents/          # generated .docx / .pdf
//! ├── saved_templates/    # one .json per template
//! └── signatures/         # <role>_signature.<ext>
//! ```
//!
//! ## Example Usage
//!
//! ```no_run
//! use medform_files::FilesService;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let service = FilesService::new(Path::new("documents"))?;
//! service.write("report.docx", b"...")?;
//! let bytes = service.read("report.docx")?;
//! # Ok(())
//! # }
//! ```

mod constants;
mod files;

pub use constants::FORBIDDEN_NAME_PATTERNS;
pub use files::{validate_file_name, FileMetadata, FilesService};

/// Errors that can occur during file operations
#[derive(Debug, thiserror::Error)]
pub enum FilesError {
    /// Root directory does not exist or is not a directory
    #[error("Invalid root directory: {0}")]
    InvalidRootDirectory(String),

    /// Name validation failed (potential directory traversal or unsafe name)
    #[error("Invalid file name: {0}")]
    InvalidPath(String),

    /// The named file does not exist in the directory
    #[error("File not found: {0}")]
    NotFound(String),

    /// I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
