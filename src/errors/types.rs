use thiserror::Error;

use crate::pipeline::phase::StepName;

#[derive(Debug, Error)]
pub enum VermatrixError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Provisioning error: {0}")]
    Provision(String),

    #[error("Failed to start {program}: {reason}")]
    Spawn { program: String, reason: String },

    #[error("{step} exited with {}", describe_exit(.exit_code))]
    StepFailed { step: StepName, exit_code: Option<i32> },

    #[error("Failing hooks: {}", .0.join(", "))]
    HooksFailed(Vec<String>),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Interrupted")]
    Cancelled,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {}", code),
        None => "no status (terminated by signal)".to_string(),
    }
}
