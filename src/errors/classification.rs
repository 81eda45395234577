use super::types::VermatrixError;

#[derive(Debug, Clone)]
pub struct ErrorClassification {
    pub error_type: &'static str,
    /// Fatal errors abort the whole run; the rest fail only the current version.
    pub fatal: bool,
}

impl VermatrixError {
    /// Classify this error to decide whether it ends the run or just the version being tested.
    pub fn classify(&self) -> ErrorClassification {
        match self {
            // Per-version failures
            VermatrixError::Provision(_) => ErrorClassification {
                error_type: "ProvisioningError",
                fatal: false,
            },
            VermatrixError::Spawn { .. } => ErrorClassification {
                error_type: "SpawnError",
                fatal: false,
            },
            VermatrixError::StepFailed { .. } => ErrorClassification {
                error_type: "StepFailure",
                fatal: false,
            },
            VermatrixError::HooksFailed(_) => ErrorClassification {
                error_type: "CheckFailure",
                fatal: false,
            },
            VermatrixError::Timeout(_) => ErrorClassification {
                error_type: "TimeoutError",
                fatal: false,
            },
            VermatrixError::Io(_) => ErrorClassification {
                error_type: "IoError",
                fatal: false,
            },

            // Run-level failures
            VermatrixError::Config(_) => ErrorClassification {
                error_type: "ConfigError",
                fatal: true,
            },
            VermatrixError::Yaml(_) => ErrorClassification {
                error_type: "YamlError",
                fatal: true,
            },
            VermatrixError::Json(_) => ErrorClassification {
                error_type: "JsonError",
                fatal: true,
            },
            VermatrixError::Cancelled => ErrorClassification {
                error_type: "Interrupted",
                fatal: true,
            },
            VermatrixError::Internal(_) => ErrorClassification {
                error_type: "InternalError",
                fatal: true,
            },
        }
    }

    /// Process exit code used when this error terminates the program.
    pub fn exit_code(&self) -> i32 {
        match self {
            VermatrixError::Config(_) | VermatrixError::Yaml(_) => 2,
            VermatrixError::Cancelled => 130,
            _ => 1,
        }
    }
}
