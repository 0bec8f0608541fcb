//! Bounded execution of external binaries

use std::ffi::OsString;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// Outcome of one external tool invocation
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Whether the process exited with status 0
    pub success: bool,
    /// Exit code, if the process ran to completion
    pub exit_code: Option<i32>,
    /// Captured console output (stdout followed by stderr)
    pub output: String,
}

impl CommandOutput {
    /// Successful invocation with the given console output
    pub fn ok(output: impl Into<String>) -> Self {
        Self {
            success: true,
            exit_code: Some(0),
            output: output.into(),
        }
    }

    /// Failed invocation with the given exit code and console output
    pub fn failed(exit_code: Option<i32>, output: impl Into<String>) -> Self {
        Self {
            success: false,
            exit_code,
            output: output.into(),
        }
    }
}

/// Run `program` with `args`, capturing its output
///
/// Arguments are passed as an argv array; no shell is involved. Stdin is
/// closed so tools never wait for input. If the process outlives `timeout`
/// it is killed and reported as failed. Failing to spawn the process is also
/// reported as a failed invocation rather than an error so callers treat
/// every outcome the same way.
pub async fn run_tool(program: &Path, args: &[OsString], timeout: Duration) -> CommandOutput {
    tracing::debug!(?program, ?args, "running external tool");

    let child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .kill_on_drop(true)
        .output();

    match tokio::time::timeout(timeout, child).await {
        Ok(Ok(output)) => {
            let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
            let stderr = String::from_utf8_lossy(&output.stderr);
            if !stderr.is_empty() {
                if !text.is_empty() && !text.ends_with('\n') {
                    text.push('\n');
                }
                text.push_str(&stderr);
            }
            let text = text.trim_end().to_string();

            let exit_code = output.status.code();
            if output.status.success() {
                tracing::debug!(?program, "external tool finished");
                CommandOutput::ok(text)
            } else {
                tracing::warn!(?program, code = ?exit_code, "external tool failed");
                CommandOutput::failed(exit_code, text)
            }
        }
        Ok(Err(e)) => {
            tracing::warn!(?program, error = %e, "failed to execute external tool");
            CommandOutput::failed(
                None,
                format!("Failed to execute {}: {}", program.display(), e),
            )
        }
        Err(_) => {
            tracing::warn!(?program, ?timeout, "external tool timed out");
            CommandOutput::failed(
                None,
                format!(
                    "{} timed out after {} seconds",
                    program.display(),
                    timeout.as_secs()
                ),
            )
        }
    }
}
