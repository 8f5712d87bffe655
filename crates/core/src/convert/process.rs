use super::AttemptOutcome;
use std::io::ErrorKind;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// Runs an external tool to completion, bounded by `timeout`.
///
/// The child is killed if the timeout elapses. On failure the error is the attempt
/// outcome to report: a missing executable maps to [`AttemptOutcome::ToolNotFound`], a
/// non-zero exit to [`AttemptOutcome::Failed`] carrying the tool's stderr.
pub(super) async fn run_tool(mut command: Command, timeout: Duration) -> Result<(), AttemptOutcome> {
    command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let child = match command.spawn() {
        Ok(child) => child,
        Err(e) if e.kind() == ErrorKind::NotFound => return Err(AttemptOutcome::ToolNotFound),
        Err(e) => return Err(AttemptOutcome::Failed(format!("failed to start: {e}"))),
    };

    match tokio::time::timeout(timeout, child.wait_with_output()).await {
        Err(_) => Err(AttemptOutcome::TimedOut),
        Ok(Err(e)) => Err(AttemptOutcome::Failed(format!("failed to wait: {e}"))),
        Ok(Ok(output)) if output.status.success() => Ok(()),
        Ok(Ok(output)) => {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(AttemptOutcome::Failed(format!(
                "exited with {}: {}",
                output.status,
                stderr.trim()
            )))
        }
    }
}

/// Whether `program --version` runs successfully.
pub(super) async fn responds_to_version(program: &Path, timeout: Duration) -> bool {
    let mut command = Command::new(program);
    command.arg("--version");
    run_tool(command, timeout).await.is_ok()
}
