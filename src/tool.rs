//! External tool invocation
//!
//! Every non-trivial audio operation is delegated to an external command-line
//! tool. These helpers run one blocking subprocess at a time and surface
//! failures as errors; callers decide whether a failure skips the item or
//! aborts the run.

use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Resolve a required tool on PATH
///
/// # Errors
///
/// Returns [`Error::ToolMissing`] if the tool is not installed
pub fn require(program: &str) -> Result<PathBuf> {
    which::which(program).map_err(|_| Error::ToolMissing(program.to_string()))
}

/// Check whether a tool is on PATH without failing
#[must_use]
pub fn available(program: &str) -> bool {
    which::which(program).is_ok()
}

/// Run a command, capturing output; error if it exits non-zero
///
/// Returns captured stdout on success.
///
/// # Errors
///
/// Returns error if the command cannot be spawned or exits non-zero
pub async fn run_checked(program: &str, args: &[&str]) -> Result<String> {
    tracing::debug!(program, ?args, "running external tool");

    let output = tokio::process::Command::new(program)
        .args(args)
        .output()
        .await
        .map_err(|e| Error::Tool(format!("failed to run {program}: {e}")))?;

    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(Error::Tool(format!(
            "{program} exited with code {}: {}",
            output.status.code().unwrap_or(-1),
            stderr.trim()
        )))
    }
}

/// Run a long-lived command with inherited stdio (clone, training)
///
/// # Errors
///
/// Returns error if the command cannot be spawned or exits non-zero
pub async fn run_inherited(program: &str, args: &[&str], dir: Option<&Path>) -> Result<()> {
    tracing::debug!(program, ?args, ?dir, "running external tool (inherited stdio)");

    let mut command = tokio::process::Command::new(program);
    command.args(args);
    if let Some(dir) = dir {
        command.current_dir(dir);
    }

    let status = command
        .status()
        .await
        .map_err(|e| Error::Tool(format!("failed to run {program}: {e}")))?;

    if status.success() {
        Ok(())
    } else {
        Err(Error::Tool(format!(
            "{program} exited with code {}",
            status.code().unwrap_or(-1)
        )))
    }
}
