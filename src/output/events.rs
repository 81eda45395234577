use crate::models::{RunSummary, VersionResult};
use crate::pipeline::phase::StepName;

/// Messages sent from the orchestrator to whatever is displaying progress.
#[derive(Debug, Clone)]
pub enum RunEvent {
    /// Run started
    RunStarted {
        run_id: String,
        versions: Vec<String>,
    },
    /// Interpreter found, provisioning begins
    VersionStarted {
        version: String,
        interpreter: String,
    },
    /// Interpreter absent on this host
    VersionSkipped {
        version: String,
        interpreter: String,
    },
    StepStarted {
        version: String,
        step: StepName,
        /// Hook id when hooks run one at a time
        detail: Option<String>,
    },
    StepCompleted {
        version: String,
        step: StepName,
        detail: Option<String>,
        duration_ms: u64,
    },
    StepFailed {
        version: String,
        step: StepName,
        detail: Option<String>,
        error: String,
    },
    /// Result recorded and environment torn down
    VersionFinished {
        result: VersionResult,
    },
    RunCompleted {
        summary: RunSummary,
        duration_ms: u64,
    },
    /// Informational message
    Log {
        message: String,
    },
}

impl RunEvent {
    /// Plain one-line description, used for the run log file.
    pub fn describe(&self) -> String {
        match self {
            RunEvent::RunStarted { run_id, versions } => {
                format!("Run {} started for versions {}", run_id, versions.join(", "))
            }
            RunEvent::VersionStarted { version, interpreter } => {
                format!("Testing {} with {}", version, interpreter)
            }
            RunEvent::VersionSkipped { version, interpreter } => {
                format!("Skipping {}: {} not found", version, interpreter)
            }
            RunEvent::StepStarted { version, step, detail } => {
                format!("[{}] {}{}", version, step, suffix(detail))
            }
            RunEvent::StepCompleted { version, step, detail, duration_ms } => {
                format!("[{}] {}{} ok ({}ms)", version, step, suffix(detail), duration_ms)
            }
            RunEvent::StepFailed { version, step, detail, error } => {
                format!("[{}] {}{} failed: {}", version, step, suffix(detail), error)
            }
            RunEvent::VersionFinished { result } => {
                format!("Version {} {}", result.version, result.status)
            }
            RunEvent::RunCompleted { summary, duration_ms } => format!(
                "Run completed in {}ms: total={} passed={} failed={} skipped={}",
                duration_ms, summary.total, summary.passed, summary.failed, summary.skipped
            ),
            RunEvent::Log { message } => message.clone(),
        }
    }
}

fn suffix(detail: &Option<String>) -> String {
    detail.as_ref().map(|d| format!(" ({})", d)).unwrap_or_default()
}
