#[derive(Debug, thiserror::Error)]
pub enum FormError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("failed to create storage directory {path}: {source}", path = path.display())]
    StorageDirCreation {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("file storage error: {0}")]
    Files(medform_files::FilesError),
    #[error("failed to serialize template: {0}")]
    Serialization(serde_json::Error),
    #[error("failed to deserialize template: {0}")]
    Deserialization(serde_json::Error),
    #[error("failed to write document archive: {0}")]
    DocxArchive(#[from] zip::result::ZipError),
    #[error("failed to write document part: {0}")]
    DocxWrite(std::io::Error),
    #[error("unsupported image type: {0}")]
    UnsupportedImageType(String),
    #[error("invalid text: {0}")]
    Text(#[from] medform_types::TextError),
}

impl From<medform_files::FilesError> for FormError {
    fn from(err: medform_files::FilesError) -> Self {
        match err {
            medform_files::FilesError::NotFound(name) => FormError::NotFound(name),
            medform_files::FilesError::InvalidPath(msg) => FormError::InvalidInput(msg),
            other => FormError::Files(other),
        }
    }
}

pub type FormResult<T> = std::result::Result<T, FormError>;
