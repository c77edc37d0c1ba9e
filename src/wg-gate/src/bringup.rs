//! Tunnel bring-up via wg-quick

use std::path::Path;
use std::process::{ExitStatus, Stdio};
use tokio::process::Command;
use tracing::{debug, info};

use crate::error::{GateError, Result};

/// Captured result of the bring-up command
#[derive(Debug, Clone)]
pub struct BringupOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl BringupOutput {
    /// Combined stdout followed by stderr, for log capture.
    ///
    /// wg-quick reports its progress on stderr even on success.
    pub fn combined(&self) -> String {
        format!("{}{}", self.stdout, self.stderr)
    }

    /// Fail with [`GateError::Bringup`] when the command exited non-zero.
    pub fn check(&self) -> Result<()> {
        if self.status.success() {
            Ok(())
        } else {
            Err(GateError::Bringup(format!(
                "wg-quick up exited with {}: {}",
                self.status,
                self.stderr.trim()
            )))
        }
    }
}

/// Bring the WireGuard tunnel up for the given client config.
///
/// Runs `sudo wg-quick up <path>` to completion. A spawn failure is the only
/// error here; the exit status travels in the output so the caller can
/// capture the full command log before acting on a non-zero exit.
pub async fn bring_up(client_path: &Path) -> Result<BringupOutput> {
    info!(client = %client_path.display(), "Bringing up WireGuard tunnel");

    let output = Command::new("sudo")
        .args(["wg-quick", "up"])
        .arg(client_path)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(|e| GateError::Bringup(format!("failed to run wg-quick: {e}")))?;

    debug!(status = %output.status, "wg-quick up finished");
    Ok(BringupOutput {
        status: output.status,
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    })
}
