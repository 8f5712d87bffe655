//! # DOCX → PDF conversion
//!
//! A freshly written DOCX starts in the [`ConversionState::Native`] state. The pipeline
//! offers it to each [`Converter`] in order; the first to produce a PDF moves it to
//! [`ConversionState::Converted`] and the intermediate DOCX is deleted. When every
//! converter reports a non-success outcome the document ends in
//! [`ConversionState::Failed`] and the caller keeps the DOCX. Conversion never returns an
//! error.

mod automation;
mod headless;
mod process;

pub use automation::AutomationConverter;
pub use headless::HeadlessOfficeConverter;

use crate::config::CoreConfig;
use async_trait::async_trait;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Outcome of one converter attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// A PDF was written at the given path.
    Converted(PathBuf),
    /// The converter is not installed on this host.
    ToolNotFound,
    /// The converter did not finish within the configured timeout.
    TimedOut,
    /// The converter ran and failed.
    Failed(String),
}

#[async_trait]
pub trait Converter: Send + Sync {
    /// Short name for logging.
    fn name(&self) -> &'static str;

    /// Whether the converter can run on this host.
    async fn available(&self) -> bool;

    /// Converts `docx`, writing the PDF next to it.
    async fn convert(&self, docx: &Path) -> AttemptOutcome;
}

/// Lifecycle state of a generated document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversionState {
    Native,
    Converted,
    Failed,
}

/// Result of running the pipeline on one document.
#[derive(Debug, Clone)]
pub struct ConversionReport {
    /// The file to hand to the caller: the PDF when converted, otherwise the DOCX.
    pub output: PathBuf,
    pub state: ConversionState,
    /// Each attempted converter with its outcome, in order.
    pub attempts: Vec<(&'static str, AttemptOutcome)>,
}

impl ConversionReport {
    pub fn is_pdf(&self) -> bool {
        self.state == ConversionState::Converted
    }
}

/// Availability of one converter, as reported by [`ConversionPipeline::probe`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConverterStatus {
    pub name: &'static str,
    pub available: bool,
}

/// The PDF path a converter is expected to write for `docx`.
pub(crate) fn expected_pdf(docx: &Path) -> PathBuf {
    docx.with_extension(crate::constants::PDF_EXTENSION)
}

/// Ordered chain of converters.
pub struct ConversionPipeline {
    converters: Vec<Box<dyn Converter>>,
}

impl ConversionPipeline {
    pub fn new(converters: Vec<Box<dyn Converter>>) -> Self {
        Self { converters }
    }

    /// Automation first, then the headless office converter.
    pub fn standard(soffice_path: Option<PathBuf>, timeout: Duration) -> Self {
        Self::new(vec![
            Box::new(AutomationConverter::new(timeout)),
            Box::new(HeadlessOfficeConverter::new(soffice_path, timeout)),
        ])
    }

    pub fn from_config(cfg: &CoreConfig) -> Self {
        Self::standard(
            cfg.soffice_path().map(Path::to_path_buf),
            cfg.convert_timeout(),
        )
    }

    /// Converts `docx` to PDF if any converter succeeds.
    pub async fn run(&self, docx: &Path) -> ConversionReport {
        let mut report = ConversionReport {
            output: docx.to_path_buf(),
            state: ConversionState::Native,
            attempts: Vec::with_capacity(self.converters.len()),
        };

        for converter in &self.converters {
            let outcome = converter.convert(docx).await;
            report.attempts.push((converter.name(), outcome.clone()));

            match outcome {
                AttemptOutcome::Converted(pdf) => {
                    tracing::info!("converted {} with {}", pdf.display(), converter.name());
                    if let Err(e) = std::fs::remove_file(docx) {
                        tracing::warn!(
                            "could not remove intermediate {}: {}",
                            docx.display(),
                            e
                        );
                    }
                    report.output = pdf;
                    report.state = ConversionState::Converted;
                    return report;
                }
                AttemptOutcome::ToolNotFound => {
                    tracing::debug!("{} not available", converter.name());
                }
                AttemptOutcome::TimedOut => {
                    tracing::warn!("{} timed out on {}", converter.name(), docx.display());
                }
                AttemptOutcome::Failed(reason) => {
                    tracing::warn!("{} failed on {}: {}", converter.name(), docx.display(), reason);
                }
            }
        }

        tracing::warn!("no converter produced a PDF; keeping {}", docx.display());
        report.state = ConversionState::Failed;
        report
    }

    /// Reports which converters can run on this host.
    pub async fn probe(&self) -> Vec<ConverterStatus> {
        let mut out = Vec::with_capacity(self.converters.len());
        for converter in &self.converters {
            out.push(ConverterStatus {
                name: converter.name(),
                available: converter.available().await,
            });
        }
        out
    }
}
