//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into core services
//! behind an `Arc`. Nothing in this crate reads environment variables while handling a
//! request.

use crate::constants::{
    DEFAULT_CONVERT_TIMEOUT, DOCUMENTS_DIR_NAME, SIGNATURES_DIR_NAME, TEMPLATES_DIR_NAME,
};
use crate::{FormError, FormResult};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    data_dir: PathBuf,
    convert_timeout: Duration,
    soffice_path: Option<PathBuf>,
}

impl CoreConfig {
    /// Create a new `CoreConfig` rooted at `data_dir`.
    ///
    /// Creates the documents, templates and signatures directories if they do not exist.
    ///
    /// # Errors
    ///
    /// Returns `FormError::InvalidInput` for a zero timeout and
    /// `FormError::StorageDirCreation` if a storage directory cannot be created.
    pub fn new(
        data_dir: PathBuf,
        convert_timeout: Duration,
        soffice_path: Option<PathBuf>,
    ) -> FormResult<Self> {
        if convert_timeout.is_zero() {
            return Err(FormError::InvalidInput(
                "convert timeout must be greater than zero".into(),
            ));
        }

        let cfg = Self {
            data_dir,
            convert_timeout,
            soffice_path,
        };

        for dir in [
            cfg.documents_dir(),
            cfg.templates_dir(),
            cfg.signatures_dir(),
        ] {
            std::fs::create_dir_all(&dir)
                .map_err(|source| FormError::StorageDirCreation { path: dir, source })?;
        }

        Ok(cfg)
    }

    /// Convenience constructor with the default timeout and converter lookup.
    pub fn with_defaults(data_dir: PathBuf) -> FormResult<Self> {
        Self::new(data_dir, DEFAULT_CONVERT_TIMEOUT, None)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn documents_dir(&self) -> PathBuf {
        self.data_dir.join(DOCUMENTS_DIR_NAME)
    }

    pub fn templates_dir(&self) -> PathBuf {
        self.data_dir.join(TEMPLATES_DIR_NAME)
    }

    pub fn signatures_dir(&self) -> PathBuf {
        self.data_dir.join(SIGNATURES_DIR_NAME)
    }

    pub fn convert_timeout(&self) -> Duration {
        self.convert_timeout
    }

    /// Explicit headless converter executable, if one was configured.
    pub fn soffice_path(&self) -> Option<&Path> {
        self.soffice_path.as_deref()
    }
}

/// Parse the converter timeout (whole seconds) from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns the default of 60 seconds.
pub fn convert_timeout_from_env_value(value: Option<String>) -> FormResult<Duration> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    match value {
        None => Ok(DEFAULT_CONVERT_TIMEOUT),
        Some(v) => v.parse::<u64>().map(Duration::from_secs).map_err(|_| {
            FormError::InvalidInput(format!("convert timeout is not a whole number: {v}"))
        }),
    }
}

/// Parse a boolean switch such as `MEDFORM_OPEN_BROWSER`.
///
/// Accepts `1/0`, `true/false`, `yes/no`, `on/off` (any case). Missing or blank values
/// yield `default`.
pub fn flag_from_env_value(value: Option<String>, default: bool) -> FormResult<bool> {
    let Some(value) = value.map(|v| v.trim().to_ascii_lowercase()) else {
        return Ok(default);
    };

    match value.as_str() {
        "" => Ok(default),
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(FormError::InvalidInput(format!(
            "expected a boolean switch, got {other:?}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn new_creates_storage_directories() {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let cfg = CoreConfig::with_defaults(temp.path().join("base"))
            .expect("CoreConfig::with_defaults should succeed");

        assert!(cfg.documents_dir().is_dir());
        assert!(cfg.templates_dir().is_dir());
        assert!(cfg.signatures_dir().is_dir());
        assert!(cfg.documents_dir().ends_with(DOCUMENTS_DIR_NAME));
        assert_eq!(cfg.convert_timeout(), Duration::from_secs(60));
        assert!(cfg.soffice_path().is_none());
    }

    #[test]
    fn new_rejects_zero_timeout() {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let err = CoreConfig::new(temp.path().to_path_buf(), Duration::ZERO, None)
            .expect_err("zero timeout should be rejected");

        assert!(matches!(err, FormError::InvalidInput(_)));
    }

    #[test]
    fn new_reports_directory_creation_failure() {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let blocking = temp.path().join("base");
        std::fs::write(&blocking, b"not a directory").unwrap();

        let err = CoreConfig::with_defaults(blocking).expect_err("creation should fail");
        assert!(matches!(err, FormError::StorageDirCreation { .. }));
    }

    #[test]
    fn convert_timeout_parsing() {
        assert_eq!(convert_timeout_from_env_value(None).unwrap(), DEFAULT_CONVERT_TIMEOUT);
        assert_eq!(
            convert_timeout_from_env_value(Some("  ".into())).unwrap(),
            DEFAULT_CONVERT_TIMEOUT
        );
        assert_eq!(
            convert_timeout_from_env_value(Some("90".into())).unwrap(),
            Duration::from_secs(90)
        );
        assert!(convert_timeout_from_env_value(Some("soon".into())).is_err());
    }

    #[test]
    fn flag_parsing() {
        assert!(flag_from_env_value(None, true).unwrap());
        assert!(!flag_from_env_value(Some("off".into()), true).unwrap());
        assert!(flag_from_env_value(Some("YES".into()), false).unwrap());
        assert!(flag_from_env_value(Some("maybe".into()), false).is_err());
    }
}
