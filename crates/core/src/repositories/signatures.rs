use crate::config::CoreConfig;
use crate::constants::SIGNATURE_EXTENSIONS;
use crate::error::{FormError, FormResult};
use crate::image::encode_data_uri;
use medform_files::FilesService;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;

/// Who a stored signature image belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignatureRole {
    Doctor,
    Head,
    Stamp,
}

impl SignatureRole {
    pub const ALL: [SignatureRole; 3] = [SignatureRole::Doctor, SignatureRole::Head, SignatureRole::Stamp];

    pub fn as_str(&self) -> &'static str {
        match self {
            SignatureRole::Doctor => "doctor",
            SignatureRole::Head => "head",
            SignatureRole::Stamp => "stamp",
        }
    }

    fn file_name(&self, extension: &str) -> String {
        format!("{}_signature.{}", self.as_str(), extension)
    }
}

impl FromStr for SignatureRole {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SignatureRole::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| FormError::InvalidInput(format!("unknown signature type: {s}")))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredSignature {
    pub role: SignatureRole,
    pub file_name: String,
    pub data_uri: String,
}

/// Signature and stamp images, at most one per role.
#[derive(Debug, Clone)]
pub struct SignatureService {
    files: FilesService,
}

impl SignatureService {
    pub fn new(cfg: Arc<CoreConfig>) -> FormResult<Self> {
        Ok(Self {
            files: FilesService::new(&cfg.signatures_dir())?,
        })
    }

    /// Stores an uploaded image as the current image for `role`.
    ///
    /// The extension is taken from `original_name` (lowercased) and must be one of
    /// [`SIGNATURE_EXTENSIONS`]. Images stored for the same role under other extensions
    /// are removed.
    pub fn upload(
        &self,
        role: SignatureRole,
        original_name: &str,
        bytes: &[u8],
    ) -> FormResult<StoredSignature> {
        if original_name.trim().is_empty() {
            return Err(FormError::InvalidInput("no file selected".into()));
        }
        let extension = original_name
            .rsplit('.')
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        if !SIGNATURE_EXTENSIONS.contains(&extension.as_str()) {
            return Err(FormError::UnsupportedImageType(extension));
        }

        let file_name = role.file_name(&extension);
        self.files.write(&file_name, bytes)?;
        tracing::info!("stored {} signature as {}", role.as_str(), file_name);

        for other in SIGNATURE_EXTENSIONS.iter().filter(|e| **e != extension) {
            if self.files.remove(&role.file_name(other))? {
                tracing::debug!("replaced previous {} {} image", role.as_str(), other);
            }
        }

        Ok(StoredSignature {
            role,
            data_uri: encode_data_uri(&extension, bytes),
            file_name,
        })
    }

    /// The current image of `role`, if any.
    pub fn get(&self, role: SignatureRole) -> FormResult<Option<StoredSignature>> {
        for extension in SIGNATURE_EXTENSIONS {
            let file_name = role.file_name(extension);
            if !self.files.contains(&file_name) {
                continue;
            }
            let bytes = self.files.read(&file_name)?;
            return Ok(Some(StoredSignature {
                role,
                data_uri: encode_data_uri(extension, &bytes),
                file_name,
            }));
        }
        Ok(None)
    }

    /// Every stored image, in role order.
    pub fn all(&self) -> FormResult<Vec<StoredSignature>> {
        let mut out = Vec::new();
        for role in SignatureRole::ALL {
            if let Some(signature) = self.get(role)? {
                out.push(signature);
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::tests::test_config;

    const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

    #[test]
    fn parses_roles() {
        assert_eq!("Doctor".parse::<SignatureRole>().unwrap(), SignatureRole::Doctor);
        assert_eq!("stamp".parse::<SignatureRole>().unwrap(), SignatureRole::Stamp);
        assert!(matches!(
            "nurse".parse::<SignatureRole>(),
            Err(FormError::InvalidInput(_))
        ));
    }

    #[test]
    fn upload_stores_by_role_and_returns_data_uri() {
        let (_dir, cfg) = test_config();
        let signatures = SignatureService::new(cfg.clone()).unwrap();

        let stored = signatures
            .upload(SignatureRole::Head, "scan.PNG", PNG_BYTES)
            .unwrap();

        assert_eq!(stored.file_name, "head_signature.png");
        assert!(stored.data_uri.starts_with("data:image/png;base64,"));
        assert!(cfg.signatures_dir().join("head_signature.png").is_file());
    }

    #[test]
    fn rejects_unsupported_extensions_and_empty_names() {
        let (_dir, cfg) = test_config();
        let signatures = SignatureService::new(cfg).unwrap();

        assert!(matches!(
            signatures.upload(SignatureRole::Doctor, "sig.bmp", PNG_BYTES),
            Err(FormError::UnsupportedImageType(ext)) if ext == "bmp"
        ));
        assert!(matches!(
            signatures.upload(SignatureRole::Doctor, "signature", PNG_BYTES),
            Err(FormError::UnsupportedImageType(_))
        ));
        assert!(matches!(
            signatures.upload(SignatureRole::Doctor, "", PNG_BYTES),
            Err(FormError::InvalidInput(_))
        ));
    }

    #[test]
    fn new_extension_replaces_previous_image() {
        let (_dir, cfg) = test_config();
        let signatures = SignatureService::new(cfg.clone()).unwrap();

        signatures.upload(SignatureRole::Stamp, "a.png", PNG_BYTES).unwrap();
        signatures.upload(SignatureRole::Stamp, "b.jpg", b"jpeg").unwrap();

        assert!(!cfg.signatures_dir().join("stamp_signature.png").exists());
        let current = signatures.get(SignatureRole::Stamp).unwrap().unwrap();
        assert_eq!(current.file_name, "stamp_signature.jpg");
        assert!(current.data_uri.starts_with("data:image/jpg;base64,"));
    }

    #[test]
    fn failed_write_keeps_previous_image() {
        let (_dir, cfg) = test_config();
        let signatures = SignatureService::new(cfg.clone()).unwrap();

        signatures.upload(SignatureRole::Doctor, "a.png", PNG_BYTES).unwrap();
        std::fs::create_dir(cfg.signatures_dir().join("doctor_signature.jpg")).unwrap();

        assert!(signatures.upload(SignatureRole::Doctor, "b.jpg", b"jpeg").is_err());
        assert!(cfg.signatures_dir().join("doctor_signature.png").is_file());
    }

    #[test]
    fn all_lists_roles_in_order() {
        let (_dir, cfg) = test_config();
        let signatures = SignatureService::new(cfg).unwrap();
        assert!(signatures.all().unwrap().is_empty());

        signatures.upload(SignatureRole::Stamp, "s.gif", b"GIF89a").unwrap();
        signatures.upload(SignatureRole::Doctor, "d.png", PNG_BYTES).unwrap();

        let roles: Vec<SignatureRole> = signatures.all().unwrap().iter().map(|s| s.role).collect();
        assert_eq!(roles, vec![SignatureRole::Doctor, SignatureRole::Stamp]);
    }
}
