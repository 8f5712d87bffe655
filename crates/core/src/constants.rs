//! Constants used throughout the MedForm core crate.
//!
//! Directory names, file-name formats and fixed physical measures live here so storage,
//! mapping and serialisation agree on them.

use std::time::Duration;

/// Directory name for generated documents (native and converted).
pub const DOCUMENTS_DIR_NAME: &str = "documents";

/// Directory name for saved field-record templates.
pub const TEMPLATES_DIR_NAME: &str = "saved_templates";

/// Directory name for signature and stamp images.
pub const SIGNATURES_DIR_NAME: &str = "signatures";

/// Extension of the native word-processing format.
pub const DOCX_EXTENSION: &str = "docx";

/// Extension of the fixed-layout format.
pub const PDF_EXTENSION: &str = "pdf";

/// Extension of template files.
pub const TEMPLATE_EXTENSION: &str = "json";

/// MIME type of the native format.
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// MIME type of the fixed-layout format.
pub const PDF_MIME: &str = "application/pdf";

/// `chrono` format used in generated file names and template ids.
pub const FILE_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// `chrono` format used for modification times in search results.
pub const SEARCH_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Image extensions accepted for signature uploads.
pub const SIGNATURE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif"];

/// Default upper bound for one external converter run.
pub const DEFAULT_CONVERT_TIMEOUT: Duration = Duration::from_secs(60);

/// English Metric Units per inch, the unit of DrawingML extents.
pub const EMU_PER_INCH: u64 = 914_400;

/// Twentieths of a point per centimetre, the unit of page margins.
pub const TWIPS_PER_CM: f64 = 566.929;

/// Fallback placeholder for a missing or undecodable signature image.
pub const SIGNATURE_PLACEHOLDER: &str = "________________";

/// Fallback placeholder for a missing or undecodable stamp image.
pub const STAMP_PLACEHOLDER: &str = "ბ.ა.";
