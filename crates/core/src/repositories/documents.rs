//! Generated document archive.
//!
//! Saving maps the posted record, serialises it and stores `<filename>.docx`. Printing
//! stores `print_<timestamp>.docx` in the print variant and runs it through the
//! [`ConversionPipeline`]; the caller is told whether the stored file is a PDF.

use super::file_timestamp;
use crate::config::CoreConfig;
use crate::constants::{DOCX_EXTENSION, DOCX_MIME, PDF_EXTENSION, PDF_MIME};
use crate::convert::ConversionPipeline;
use crate::docx::write_docx;
use crate::error::FormResult;
use crate::mapper::map_record;
use crate::record::{FieldRecord, FontVariant, Layout};
use chrono::{DateTime, Local, Utc};
use medform_files::FilesService;
use medform_types::FileStem;
use serde_json::{Map, Value};
use std::path::Path;
use std::sync::Arc;

/// Payload key carrying the layout tag.
pub const DOCUMENT_TYPE_KEY: &str = "document_type";
/// Payload key carrying the requested file name (without extension).
pub const FILENAME_KEY: &str = "filename";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedDocument {
    pub file_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintedDocument {
    pub file_name: String,
    pub is_pdf: bool,
}

/// A stored document read back for viewing or download.
#[derive(Debug, Clone)]
pub struct DocumentFile {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Maps `record` and serialises it to DOCX bytes.
pub fn render_docx(
    record: &FieldRecord,
    layout: Layout,
    variant: FontVariant,
    title: &str,
    created: DateTime<Utc>,
) -> FormResult<Vec<u8>> {
    let doc = map_record(record, layout, variant);
    write_docx(&doc, title, created)
}

/// Layout selected by the payload's `document_type`.
pub fn payload_layout(payload: &Map<String, Value>) -> Layout {
    Layout::from_tag(payload.get(DOCUMENT_TYPE_KEY).and_then(Value::as_str))
}

/// Sanitised file stem for a save request, or `document_<timestamp>`.
fn save_stem(payload: &Map<String, Value>, now: DateTime<Local>) -> FormResult<FileStem> {
    let requested = payload.get(FILENAME_KEY).and_then(Value::as_str);
    match requested.map(FileStem::sanitise) {
        Some(Ok(stem)) => return Ok(stem),
        Some(Err(e)) => tracing::warn!("requested file name rejected ({}); using default", e),
        None => {}
    }
    Ok(FileStem::sanitise(format!("document_{}", file_timestamp(now)))?)
}

#[derive(Clone)]
pub struct DocumentService {
    files: FilesService,
    pipeline: Arc<ConversionPipeline>,
}

impl DocumentService {
    /// Creates the service with the standard converter chain.
    pub fn new(cfg: Arc<CoreConfig>) -> FormResult<Self> {
        let pipeline = Arc::new(ConversionPipeline::from_config(&cfg));
        Self::with_pipeline(cfg, pipeline)
    }

    pub fn with_pipeline(cfg: Arc<CoreConfig>, pipeline: Arc<ConversionPipeline>) -> FormResult<Self> {
        Ok(Self {
            files: FilesService::new(&cfg.documents_dir())?,
            pipeline,
        })
    }

    pub fn pipeline(&self) -> &ConversionPipeline {
        &self.pipeline
    }

    pub fn directory(&self) -> &Path {
        self.files.root_directory()
    }

    /// Generates and stores the archive copy of a document.
    ///
    /// An existing file with the same name is overwritten.
    pub fn save(&self, payload: &Map<String, Value>, now: DateTime<Local>) -> FormResult<SavedDocument> {
        let layout = payload_layout(payload);
        let record = FieldRecord::from_map(payload);
        let stem = save_stem(payload, now)?;

        let bytes = render_docx(
            &record,
            layout,
            FontVariant::Archive,
            stem.as_str(),
            now.with_timezone(&Utc),
        )?;
        let file_name = stem.with_extension(DOCX_EXTENSION);
        self.files.write(&file_name, &bytes)?;

        tracing::info!("saved {} as {}", layout.tag(), file_name);
        Ok(SavedDocument { file_name })
    }

    /// Generates the print copy and tries to convert it to PDF.
    ///
    /// Conversion failure is not an error: the DOCX is kept and `is_pdf` is false.
    pub async fn print(
        &self,
        payload: &Map<String, Value>,
        now: DateTime<Local>,
    ) -> FormResult<PrintedDocument> {
        let layout = payload_layout(payload);
        let record = FieldRecord::from_map(payload);
        let stem = format!("print_{}", file_timestamp(now));

        let bytes = render_docx(
            &record,
            layout,
            FontVariant::Print,
            &stem,
            now.with_timezone(&Utc),
        )?;
        let docx_name = format!("{stem}.{DOCX_EXTENSION}");
        self.files.write(&docx_name, &bytes)?;
        let docx_path = self.files.path_of(&docx_name)?;

        let report = self.pipeline.run(&docx_path).await;
        let file_name = report
            .output
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_owned)
            .unwrap_or(docx_name);

        tracing::info!("print copy {} (pdf: {})", file_name, report.is_pdf());
        Ok(PrintedDocument {
            file_name,
            is_pdf: report.is_pdf(),
        })
    }

    pub fn exists(&self, file_name: &str) -> bool {
        self.files.contains(file_name)
    }

    /// Reads a stored document with the content type for its extension.
    ///
    /// `.pdf` files are served as PDF; anything else as DOCX.
    pub fn open(&self, file_name: &str) -> FormResult<DocumentFile> {
        let bytes = self.files.read(file_name)?;
        let is_pdf = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(PDF_EXTENSION));

        Ok(DocumentFile {
            file_name: file_name.to_owned(),
            content_type: if is_pdf { PDF_MIME } else { DOCX_MIME },
            bytes,
        })
    }

    /// Stored `.docx` files, sorted by name.
    pub fn list_docx(&self) -> FormResult<Vec<medform_files::FileMetadata>> {
        Ok(self.files.list(Some(DOCX_EXTENSION))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::{AttemptOutcome, Converter};
    use crate::error::FormError;
    use crate::repositories::tests::{at, test_config};
    use async_trait::async_trait;
    use serde_json::json;

    struct NoConverter;

    #[async_trait]
    impl Converter for NoConverter {
        fn name(&self) -> &'static str {
            "none"
        }
        async fn available(&self) -> bool {
            false
        }
        async fn convert(&self, _docx: &Path) -> AttemptOutcome {
            AttemptOutcome::ToolNotFound
        }
    }

    fn payload(value: serde_json::Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    fn service(cfg: Arc<CoreConfig>) -> DocumentService {
        let pipeline = Arc::new(ConversionPipeline::new(vec![Box::new(NoConverter)]));
        DocumentService::with_pipeline(cfg, pipeline).unwrap()
    }

    #[test]
    fn save_sanitises_requested_name() {
        let (_dir, cfg) = test_config();
        let docs = service(cfg.clone());

        let saved = docs
            .save(
                &payload(json!({"document_type": "form_100", "filename": "../ნინო report!"})),
                at(10, 0, 0),
            )
            .unwrap();

        assert_eq!(saved.file_name, "ნინო report.docx");
        assert!(cfg.documents_dir().join("ნინო report.docx").is_file());
    }

    #[test]
    fn save_defaults_name_from_timestamp() {
        let (_dir, cfg) = test_config();
        let docs = service(cfg);

        let untagged = payload(json!({}));
        assert_eq!(payload_layout(&untagged), Layout::HealthCertificate);
        let saved = docs.save(&untagged, at(10, 0, 0)).unwrap();
        assert_eq!(saved.file_name, "document_20240305_100000.docx");

        let unsafe_only = docs
            .save(&payload(json!({"filename": "../.."})), at(10, 0, 1))
            .unwrap();
        assert_eq!(unsafe_only.file_name, "document_20240305_100001.docx");
    }

    #[test]
    fn saving_twice_with_same_name_overwrites() {
        let (_dir, cfg) = test_config();
        let docs = service(cfg);
        let body = payload(json!({"filename": "same"}));

        docs.save(&body, at(10, 0, 0)).unwrap();
        docs.save(&body, at(11, 0, 0)).unwrap();
        assert_eq!(docs.list_docx().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn print_without_converters_returns_docx() {
        let (_dir, cfg) = test_config();
        let docs = service(cfg.clone());

        let printed = docs
            .print(&payload(json!({"document_type": "form_100"})), at(9, 30, 0))
            .await
            .unwrap();

        assert_eq!(
            printed,
            PrintedDocument {
                file_name: "print_20240305_093000.docx".into(),
                is_pdf: false
            }
        );
        assert!(docs.exists(&printed.file_name));
    }

    #[test]
    fn open_picks_content_type_by_extension() {
        let (_dir, cfg) = test_config();
        std::fs::write(cfg.documents_dir().join("a.pdf"), b"%PDF").unwrap();
        let docs = service(cfg);
        docs.save(&payload(json!({"filename": "b"})), at(10, 0, 0)).unwrap();

        assert_eq!(docs.open("a.pdf").unwrap().content_type, PDF_MIME);
        assert_eq!(docs.open("b.docx").unwrap().content_type, DOCX_MIME);
    }

    #[test]
    fn open_missing_or_escaping_names_fail() {
        let (_dir, cfg) = test_config();
        let docs = service(cfg);

        assert!(matches!(docs.open("missing.docx"), Err(FormError::NotFound(_))));
        assert!(matches!(docs.open("../secret.pdf"), Err(FormError::InvalidInput(_))));
    }

    #[test]
    fn rendering_is_deterministic() {
        let record = FieldRecord::from_value(&json!({"patient_name": "Test Patient"}));
        let created = at(9, 0, 0).with_timezone(&Utc);
        let a = render_docx(&record, Layout::HealthCertificate, FontVariant::Print, "t", created).unwrap();
        let b = render_docx(&record, Layout::HealthCertificate, FontVariant::Print, "t", created).unwrap();
        assert_eq!(a, b);
    }
}
