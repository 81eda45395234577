use serde::{Deserialize, Serialize};

/// Outcome of testing one interpreter version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VersionStatus {
    /// The check battery succeeded.
    Passed,
    /// Provisioning, installation or the check battery failed.
    Failed,
    /// No interpreter for this version was found on the host.
    Skipped,
}

impl VersionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Passed => "PASSED",
            Self::Failed => "FAILED",
            Self::Skipped => "SKIPPED",
        }
    }
}

impl std::fmt::Display for VersionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result recorded for a single version. Never modified after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionResult {
    pub version: String,
    pub status: VersionStatus,
    /// Wall-clock time spent on this version in milliseconds.
    pub duration_ms: u64,
    /// Why the version failed or was skipped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl VersionResult {
    pub fn passed(version: &str, duration_ms: u64) -> Self {
        Self {
            version: version.to_string(),
            status: VersionStatus::Passed,
            duration_ms,
            reason: None,
        }
    }

    pub fn failed(version: &str, duration_ms: u64, reason: impl Into<String>) -> Self {
        Self {
            version: version.to_string(),
            status: VersionStatus::Failed,
            duration_ms,
            reason: Some(reason.into()),
        }
    }

    pub fn skipped(version: &str) -> Self {
        Self {
            version: version.to_string(),
            status: VersionStatus::Skipped,
            duration_ms: 0,
            reason: Some("interpreter not found".to_string()),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.status == VersionStatus::Failed
    }
}
