use std::path::PathBuf;
use std::process::Stdio;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::process::Command;
use tokio_util::sync::CancellationToken;
use crate::errors::VermatrixError;
use super::command::{StepCommand, StepOutcome};
use super::locate::which;
use tracing::{debug, warn};

/// Boundary between the orchestrator and the host's processes.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run a command to completion. A non-zero exit is an `Ok` outcome;
    /// errors mean the command could not be run or was cut short.
    async fn run(&self, command: &StepCommand) -> Result<StepOutcome, VermatrixError>;

    /// Resolve an executable name to a path, `None` when it is absent.
    fn locate(&self, program: &str) -> Option<PathBuf>;
}

/// Runs commands as real child processes with inherited stdout/stderr, so
/// tool output reaches the user verbatim.
pub struct SystemRunner {
    timeout: Option<Duration>,
    cancel_token: CancellationToken,
}

impl SystemRunner {
    pub fn new(timeout: Option<Duration>, cancel_token: CancellationToken) -> Self {
        Self { timeout, cancel_token }
    }

    async fn wait_bounded(
        &self,
        child: &mut tokio::process::Child,
    ) -> Option<std::io::Result<std::process::ExitStatus>> {
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, child.wait()).await.ok(),
            None => Some(child.wait().await),
        }
    }
}

impl Default for SystemRunner {
    fn default() -> Self {
        Self::new(None, CancellationToken::new())
    }
}

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(&self, command: &StepCommand) -> Result<StepOutcome, VermatrixError> {
        if self.cancel_token.is_cancelled() {
            return Err(VermatrixError::Cancelled);
        }

        debug!(command = %command, cwd = %command.cwd.display(), "Spawning");
        let start = Instant::now();

        let mut child = Command::new(&command.program)
            .args(&command.args)
            .current_dir(&command.cwd)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| VermatrixError::Spawn {
                program: command.program_name(),
                reason: e.to_string(),
            })?;

        let waited = tokio::select! {
            waited = self.wait_bounded(&mut child) => Some(waited),
            _ = self.cancel_token.cancelled() => None,
        };

        let status = match waited {
            Some(Some(status)) => status?,
            Some(None) => {
                warn!(command = %command, "Step timed out, killing child");
                let _ = child.kill().await;
                return Err(VermatrixError::Timeout(format!(
                    "{} did not finish within {}s",
                    command.program_name(),
                    self.timeout.map(|t| t.as_secs()).unwrap_or_default()
                )));
            }
            None => {
                warn!(command = %command, "Interrupted, killing child");
                let _ = child.kill().await;
                return Err(VermatrixError::Cancelled);
            }
        };

        let outcome = StepOutcome {
            exit_code: status.code(),
            duration_ms: start.elapsed().as_millis() as u64,
        };
        debug!(command = %command.program_name(), exit_code = ?outcome.exit_code, duration_ms = outcome.duration_ms, "Finished");
        Ok(outcome)
    }

    fn locate(&self, program: &str) -> Option<PathBuf> {
        which(program)
    }
}
