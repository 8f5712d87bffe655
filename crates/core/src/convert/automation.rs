use super::process::run_tool;
use super::{expected_pdf, AttemptOutcome, Converter};
use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;
use tokio::process::Command;

/// `wdFormatPDF` in the word processor's automation model.
const PDF_SAVE_FORMAT: u32 = 17;

/// Converts by driving the installed word processor through its automation interface.
///
/// Each call starts a short-lived PowerShell host that opens one automation session,
/// saves the document as PDF and quits the application, even when saving fails. Only
/// available on Windows.
#[derive(Debug, Clone)]
pub struct AutomationConverter {
    timeout: Duration,
}

impl AutomationConverter {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

/// Quotes `path` as a PowerShell single-quoted literal.
fn ps_literal(path: &Path) -> String {
    format!("'{}'", path.display().to_string().replace('\'', "''"))
}

fn script(docx: &Path, pdf: &Path) -> String {
    format!(
        concat!(
            "$ErrorActionPreference = 'Stop'; ",
            "$word = New-Object -ComObject Word.Application; ",
            "$word.Visible = $false; ",
            "try {{ ",
            "$doc = $word.Documents.Open({input}); ",
            "$doc.SaveAs([ref] {output}, [ref] {format}); ",
            "$doc.Close() ",
            "}} finally {{ $word.Quit() }}"
        ),
        input = ps_literal(docx),
        output = ps_literal(pdf),
        format = PDF_SAVE_FORMAT,
    )
}

#[async_trait]
impl Converter for AutomationConverter {
    fn name(&self) -> &'static str {
        "word-automation"
    }

    async fn available(&self) -> bool {
        cfg!(windows)
    }

    async fn convert(&self, docx: &Path) -> AttemptOutcome {
        if !cfg!(windows) {
            return AttemptOutcome::ToolNotFound;
        }

        // Automation needs absolute paths.
        let docx = match std::path::absolute(docx) {
            Ok(path) => path,
            Err(e) => return AttemptOutcome::Failed(format!("cannot resolve path: {e}")),
        };
        let pdf = expected_pdf(&docx);

        let mut command = Command::new("powershell");
        command
            .arg("-NoProfile")
            .arg("-NonInteractive")
            .arg("-Command")
            .arg(script(&docx, &pdf));

        if let Err(outcome) = run_tool(command, self.timeout).await {
            return outcome;
        }

        if pdf.is_file() {
            AttemptOutcome::Converted(pdf)
        } else {
            AttemptOutcome::Failed("automation finished without writing a PDF".into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_quotes_paths() {
        let s = script(Path::new("C:/docs/o'brien.docx"), Path::new("C:/docs/o'brien.pdf"));
        assert!(s.contains("Open('C:/docs/o''brien.docx')"));
        assert!(s.contains("[ref] 'C:/docs/o''brien.pdf', [ref] 17"));
        assert!(s.contains("finally { $word.Quit() }"));
    }

    #[cfg(not(windows))]
    #[tokio::test]
    async fn unavailable_off_windows() {
        let converter = AutomationConverter::new(Duration::from_secs(1));
        assert!(!converter.available().await);
        assert_eq!(
            converter.convert(Path::new("x.docx")).await,
            AttemptOutcome::ToolNotFound
        );
    }
}
