use serde::{Deserialize, Serialize};

/// Versions tested when neither the config file nor the command line names any.
pub const DEFAULT_VERSIONS: &[&str] = &["3.10", "3.11", "3.12", "3.13"];
pub const DEFAULT_ENV_PREFIX: &str = ".venv-test-";
pub const DEFAULT_INTERPRETER: &str = "python{version}";
pub const DEFAULT_CHECK_CONFIG: &str = ".pre-commit-config.yaml";
pub const VERSION_PLACEHOLDER: &str = "{version}";

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct VermatrixConfig {
    pub versions: Option<Vec<String>>,
    pub project_dir: Option<String>,
    pub work_dir: Option<String>,
    pub env_prefix: Option<String>,
    pub interpreter: Option<String>,
    pub checks: Option<ChecksConfig>,
    /// Zero disables the timeout.
    pub step_timeout_secs: Option<u64>,
    pub fail_fast: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ChecksConfig {
    /// Path of the pre-commit config, relative to the project directory.
    pub config: Option<String>,
    /// Hook ids to run one by one. Empty runs every hook in a single pass.
    pub hooks: Option<Vec<String>>,
    /// Packages installed next to pre-commit.
    pub extra_packages: Option<Vec<String>>,
}
