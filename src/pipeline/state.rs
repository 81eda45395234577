use std::path::PathBuf;
use std::time::Duration;

use uuid::Uuid;
use crate::config::{
    VermatrixConfig, DEFAULT_CHECK_CONFIG, DEFAULT_ENV_PREFIX, DEFAULT_INTERPRETER,
    DEFAULT_VERSIONS, VERSION_PLACEHOLDER,
};
use crate::env::IsolatedEnv;

/// Fully resolved settings for one run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub run_id: Uuid,
    pub versions: Vec<String>,
    pub project_dir: PathBuf,
    /// Parent directory of the per-version environments.
    pub work_dir: PathBuf,
    pub env_prefix: String,
    /// Executable name with a `{version}` placeholder.
    pub interpreter_template: String,
    /// pre-commit config path, relative to `project_dir` unless absolute.
    pub check_config: PathBuf,
    pub hooks: Vec<String>,
    pub extra_packages: Vec<String>,
    pub step_timeout: Option<Duration>,
    pub fail_fast: bool,
}

impl RunConfig {
    /// Defaults overlaid with whatever the config file sets.
    pub fn from_file_config(file: &VermatrixConfig) -> Self {
        let defaults = Self::default();
        let checks = file.checks.clone().unwrap_or_default();

        Self {
            run_id: defaults.run_id,
            versions: file.versions.clone().unwrap_or(defaults.versions),
            project_dir: file.project_dir.as_ref().map(PathBuf::from).unwrap_or(defaults.project_dir),
            work_dir: file.work_dir.as_ref().map(PathBuf::from).unwrap_or(defaults.work_dir),
            env_prefix: file.env_prefix.clone().unwrap_or(defaults.env_prefix),
            interpreter_template: file.interpreter.clone().unwrap_or(defaults.interpreter_template),
            check_config: checks.config.map(PathBuf::from).unwrap_or(defaults.check_config),
            hooks: checks.hooks.unwrap_or_default(),
            extra_packages: checks.extra_packages.unwrap_or_default(),
            step_timeout: file
                .step_timeout_secs
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
            fail_fast: file.fail_fast.unwrap_or(false),
        }
    }

    /// Executable name for a version, e.g. `python3.12`.
    pub fn interpreter_for(&self, version: &str) -> String {
        self.interpreter_template.replace(VERSION_PLACEHOLDER, version)
    }

    pub fn env_for(&self, version: &str) -> IsolatedEnv {
        IsolatedEnv::new(&self.work_dir, &self.env_prefix, version)
    }

    pub fn check_config_arg(&self) -> String {
        self.check_config.to_string_lossy().into_owned()
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            versions: DEFAULT_VERSIONS.iter().map(|v| v.to_string()).collect(),
            project_dir: PathBuf::from("."),
            work_dir: PathBuf::from("."),
            env_prefix: DEFAULT_ENV_PREFIX.to_string(),
            interpreter_template: DEFAULT_INTERPRETER.to_string(),
            check_config: PathBuf::from(DEFAULT_CHECK_CONFIG),
            hooks: Vec::new(),
            extra_packages: Vec::new(),
            step_timeout: None,
            fail_fast: false,
        }
    }
}
