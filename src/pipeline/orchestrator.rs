use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use crate::config::validate_versions;
use crate::env::IsolatedEnv;
use crate::errors::VermatrixError;
use crate::models::{RunReport, VersionResult};
use crate::output::{EventSink, RunEvent};
use crate::process::{CommandRunner, StepCommand};
use super::phase::StepName;
use super::state::RunConfig;
use tracing::{debug, info, warn};

/// Name of the check runner installed into every environment.
const CHECK_RUNNER: &str = "pre-commit";

/// Tests each configured version in turn: provision, install, check, tear down.
///
/// Versions run strictly one after another. A failure for one version is
/// recorded and the loop moves on; only fatal errors (bad version list,
/// interruption) end the run early.
pub struct Orchestrator {
    config: RunConfig,
    runner: Arc<dyn CommandRunner>,
    cancel_token: CancellationToken,
    sinks: Vec<Arc<dyn EventSink>>,
}

impl Orchestrator {
    pub fn new(config: RunConfig, runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            config,
            runner,
            cancel_token: CancellationToken::new(),
            sinks: Vec::new(),
        }
    }

    /// Share a cancel token with the runner and the signal handler.
    pub fn with_cancel_token(mut self, token: CancellationToken) -> Self {
        self.cancel_token = token;
        self
    }

    /// Attach an event channel for streaming progress to an async consumer.
    pub fn with_event_channel(self, tx: mpsc::UnboundedSender<RunEvent>) -> Self {
        self.with_sink(Arc::new(tx))
    }

    pub fn with_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    fn emit(&self, event: RunEvent) {
        for sink in &self.sinks {
            sink.handle(&event);
        }
    }

    pub async fn run(&self) -> Result<RunReport, VermatrixError> {
        validate_versions(&self.config.versions)?;

        let started_at = Utc::now();
        let clock = Instant::now();
        info!(
            run_id = %self.config.run_id,
            versions = ?self.config.versions,
            project = %self.config.project_dir.display(),
            "Starting version matrix"
        );
        self.emit(RunEvent::RunStarted {
            run_id: self.config.run_id.to_string(),
            versions: self.config.versions.clone(),
        });

        let mut results: Vec<VersionResult> = Vec::with_capacity(self.config.versions.len());
        for version in &self.config.versions {
            if self.cancel_token.is_cancelled() {
                return Err(VermatrixError::Cancelled);
            }

            let result = self.test_version(version).await?;
            let stop = result.is_failure() && self.config.fail_fast;
            self.emit(RunEvent::VersionFinished { result: result.clone() });
            results.push(result);

            if stop {
                warn!(version = %version, "Stopping after first failure (fail-fast)");
                self.emit(RunEvent::Log {
                    message: format!("fail-fast: not testing versions after {}", version),
                });
                break;
            }
        }

        if self.cancel_token.is_cancelled() {
            return Err(VermatrixError::Cancelled);
        }

        let report = RunReport::new(self.config.run_id, started_at, results);
        info!(
            total = report.summary.total,
            passed = report.summary.passed,
            failed = report.summary.failed,
            skipped = report.summary.skipped,
            "Version matrix completed"
        );
        self.emit(RunEvent::RunCompleted {
            summary: report.summary,
            duration_ms: clock.elapsed().as_millis() as u64,
        });
        Ok(report)
    }

    async fn test_version(&self, version: &str) -> Result<VersionResult, VermatrixError> {
        let interpreter_name = self.config.interpreter_for(version);
        let Some(interpreter) = self.runner.locate(&interpreter_name) else {
            info!(version = %version, interpreter = %interpreter_name, "Interpreter not found, skipping");
            self.emit(RunEvent::VersionSkipped {
                version: version.to_string(),
                interpreter: interpreter_name,
            });
            return Ok(VersionResult::skipped(version));
        };

        let clock = Instant::now();
        info!(version = %version, interpreter = %interpreter.display(), "Testing version");
        self.emit(RunEvent::VersionStarted {
            version: version.to_string(),
            interpreter: interpreter.display().to_string(),
        });

        let env = self.config.env_for(version);
        let outcome = self.provision_and_check(&env, &interpreter).await;

        // Cleanup runs on every path, including failures and interruption
        if let Err(e) = env.teardown().await {
            warn!(version = %version, error = %e, "Environment teardown failed");
            self.emit(RunEvent::Log { message: e.to_string() });
        }

        // A child killed by the same Ctrl-C may exit before the token is seen
        if self.cancel_token.is_cancelled() {
            warn!(version = %version, "Run interrupted");
            return Err(VermatrixError::Cancelled);
        }

        let duration_ms = clock.elapsed().as_millis() as u64;
        match outcome {
            Ok(()) => {
                info!(version = %version, duration_ms, "Version passed");
                Ok(VersionResult::passed(version, duration_ms))
            }
            Err(e) if e.classify().fatal => Err(e),
            Err(e) => {
                warn!(version = %version, error_type = e.classify().error_type, error = %e, "Version failed");
                Ok(VersionResult::failed(version, duration_ms, e.to_string()))
            }
        }
    }

    /// Steps 2 to 4 for one version. Provisioning and check failures both
    /// surface as errors here and are not told apart by the caller.
    async fn provision_and_check(
        &self,
        env: &IsolatedEnv,
        interpreter: &Path,
    ) -> Result<(), VermatrixError> {
        let version = env.version();
        let cwd = self.config.project_dir.as_path();

        if env.remove_stale().await? {
            self.emit(RunEvent::Log {
                message: format!("removed stale {}", env.root().display()),
            });
        }

        self.run_step(version, StepName::CreateEnv, None, env.create_command(interpreter, cwd))
            .await?;

        self.run_step(
            version,
            StepName::UpgradeInstaller,
            None,
            env.pip_command(["install", "--upgrade", "pip"], cwd),
        )
        .await?;

        self.run_step(
            version,
            StepName::InstallProject,
            None,
            env.pip_command(["install", "-e"], cwd)
                .arg(self.config.project_dir.to_string_lossy()),
        )
        .await?;

        let packages = std::iter::once(CHECK_RUNNER.to_string())
            .chain(self.config.extra_packages.iter().cloned());
        self.run_step(
            version,
            StepName::InstallRunner,
            None,
            env.pip_command(["install"], cwd).args(packages),
        )
        .await?;

        self.run_step(
            version,
            StepName::InstallHooks,
            None,
            env.tool_command(
                CHECK_RUNNER,
                ["install-hooks".to_string(), "--config".to_string(), self.config.check_config_arg()],
                cwd,
            ),
        )
        .await?;

        self.run_checks(env).await
    }

    /// The check battery. With no hook list every hook runs in a single pass;
    /// otherwise each hook runs on its own and all of them run even after a failure.
    async fn run_checks(&self, env: &IsolatedEnv) -> Result<(), VermatrixError> {
        let version = env.version();
        let cwd = self.config.project_dir.as_path();
        let config_arg = self.config.check_config_arg();

        if self.config.hooks.is_empty() {
            let command = env.tool_command(
                CHECK_RUNNER,
                ["run", "--all-files", "--config", config_arg.as_str()],
                cwd,
            );
            return self.run_step(version, StepName::RunChecks, None, command).await;
        }

        let mut failed_hooks = Vec::new();
        for hook in &self.config.hooks {
            let command = env.tool_command(
                CHECK_RUNNER,
                ["run", hook.as_str(), "--all-files", "--config", config_arg.as_str()],
                cwd,
            );
            match self.run_step(version, StepName::RunChecks, Some(hook), command).await {
                Ok(()) => {}
                Err(VermatrixError::StepFailed { .. } | VermatrixError::Timeout(_)) => {
                    failed_hooks.push(hook.clone())
                }
                Err(e) => return Err(e),
            }
        }

        if failed_hooks.is_empty() {
            Ok(())
        } else {
            Err(VermatrixError::HooksFailed(failed_hooks))
        }
    }

    async fn run_step(
        &self,
        version: &str,
        step: StepName,
        detail: Option<&String>,
        command: StepCommand,
    ) -> Result<(), VermatrixError> {
        debug!(
            version = %version,
            step = %step,
            purpose = step.definition().description,
            command = %command,
            "Running step"
        );
        self.emit(RunEvent::StepStarted {
            version: version.to_string(),
            step,
            detail: detail.cloned(),
        });

        let result = match self.runner.run(&command).await {
            Ok(outcome) if outcome.success() => {
                self.emit(RunEvent::StepCompleted {
                    version: version.to_string(),
                    step,
                    detail: detail.cloned(),
                    duration_ms: outcome.duration_ms,
                });
                return Ok(());
            }
            Ok(outcome) => VermatrixError::StepFailed { step, exit_code: outcome.exit_code },
            Err(e) => e,
        };

        self.emit(RunEvent::StepFailed {
            version: version.to_string(),
            step,
            detail: detail.cloned(),
            error: result.to_string(),
        });
        Err(result)
    }
}
