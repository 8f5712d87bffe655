use super::process::{responds_to_version, run_tool};
use super::{expected_pdf, AttemptOutcome, Converter};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::process::Command;

/// Commands probed on the search path outside Windows, in order.
const PATH_COMMANDS: [&str; 2] = ["libreoffice", "soffice"];

/// Upper bound for a `--version` probe.
const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Converts with a headless office suite (`soffice --headless --convert-to pdf`).
#[derive(Debug, Clone)]
pub struct HeadlessOfficeConverter {
    explicit_path: Option<PathBuf>,
    timeout: Duration,
}

impl HeadlessOfficeConverter {
    pub fn new(explicit_path: Option<PathBuf>, timeout: Duration) -> Self {
        Self {
            explicit_path,
            timeout,
        }
    }

    /// Well-known Windows install locations.
    fn windows_candidates() -> Vec<PathBuf> {
        const SUFFIX: &str = r"LibreOffice\program\soffice.exe";
        let mut candidates = vec![
            PathBuf::from(r"C:\Program Files\LibreOffice\program\soffice.exe"),
            PathBuf::from(r"C:\Program Files (x86)\LibreOffice\program\soffice.exe"),
        ];
        for var in ["PROGRAMFILES", "PROGRAMFILES(X86)"] {
            if let Ok(dir) = std::env::var(var) {
                candidates.push(Path::new(&dir).join(SUFFIX));
            }
        }
        candidates
    }

    /// Finds the converter executable, or `None` when none is installed.
    pub async fn locate(&self) -> Option<PathBuf> {
        if let Some(path) = &self.explicit_path {
            if path.is_file() {
                return Some(path.clone());
            }
            tracing::warn!(
                "configured office converter {} does not exist; searching defaults",
                path.display()
            );
        }

        if cfg!(windows) {
            return Self::windows_candidates().into_iter().find(|p| p.is_file());
        }

        for cmd in PATH_COMMANDS {
            let program = PathBuf::from(cmd);
            if responds_to_version(&program, PROBE_TIMEOUT).await {
                return Some(program);
            }
        }
        None
    }
}

#[async_trait]
impl Converter for HeadlessOfficeConverter {
    fn name(&self) -> &'static str {
        "headless-office"
    }

    async fn available(&self) -> bool {
        self.locate().await.is_some()
    }

    async fn convert(&self, docx: &Path) -> AttemptOutcome {
        let Some(tool) = self.locate().await else {
            return AttemptOutcome::ToolNotFound;
        };
        let out_dir = docx.parent().unwrap_or_else(|| Path::new("."));

        let mut command = Command::new(&tool);
        command
            .arg("--headless")
            .arg("--convert-to")
            .arg("pdf")
            .arg("--outdir")
            .arg(out_dir)
            .arg(docx);

        if let Err(outcome) = run_tool(command, self.timeout).await {
            return outcome;
        }

        let pdf = expected_pdf(docx);
        if pdf.is_file() {
            AttemptOutcome::Converted(pdf)
        } else {
            AttemptOutcome::Failed(format!("{} produced no output", tool.display()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn windows_candidates_start_with_fixed_paths() {
        let candidates = HeadlessOfficeConverter::windows_candidates();
        assert!(candidates.len() >= 2);
        assert!(candidates[0].to_string_lossy().ends_with("soffice.exe"));
        assert!(candidates[1].to_string_lossy().contains("(x86)"));
    }

    #[tokio::test]
    async fn explicit_path_is_used_when_present() {
        let dir = tempfile::TempDir::new().unwrap();
        let fake = dir.path().join("soffice");
        std::fs::write(&fake, b"").unwrap();

        let converter = HeadlessOfficeConverter::new(Some(fake.clone()), Duration::from_secs(1));
        assert_eq!(converter.locate().await, Some(fake));
    }
}
