use std::path::{Path, PathBuf};

use crate::cli::commands::{MatrixArgs, RunArgs};
use crate::config::{self, ChecksConfig, VermatrixConfig};
use crate::errors::VermatrixError;
use crate::pipeline::RunConfig;
use tracing::debug;

/// Picked up from the current directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "vermatrix.yaml";

/// Build the run settings for `list` and `clean`.
pub async fn resolve_matrix(args: &MatrixArgs) -> Result<RunConfig, VermatrixError> {
    let file_config = load_file_config(args.config.as_deref()).await?;
    let merged = overlay_matrix_args(file_config, args)?;
    finish(RunConfig::from_file_config(&merged))
}

/// Build the run settings for `run`: CLI flags over config file over defaults.
pub async fn resolve_run(args: &RunArgs) -> Result<RunConfig, VermatrixError> {
    let file_config = load_file_config(args.matrix.config.as_deref()).await?;
    let mut merged = overlay_matrix_args(file_config, &args.matrix)?;

    let mut checks = merged.checks.take().unwrap_or_default();
    overlay_check_args(&mut checks, args);
    merged.checks = Some(checks);

    if args.fail_fast {
        merged.fail_fast = Some(true);
    }
    if let Some(secs) = args.step_timeout {
        merged.step_timeout_secs = Some(secs);
    }

    finish(RunConfig::from_file_config(&merged))
}

async fn load_file_config(explicit: Option<&str>) -> Result<VermatrixConfig, VermatrixError> {
    match explicit {
        Some(path) => config::parse_config(Path::new(path)).await,
        None => {
            let implicit = Path::new(DEFAULT_CONFIG_FILE);
            if implicit.exists() {
                debug!(path = %implicit.display(), "Using config file from current directory");
                config::parse_config(implicit).await
            } else {
                Ok(VermatrixConfig::default())
            }
        }
    }
}

fn overlay_matrix_args(
    mut merged: VermatrixConfig,
    args: &MatrixArgs,
) -> Result<VermatrixConfig, VermatrixError> {
    if let Some(raw) = &args.versions {
        merged.versions = Some(config::parse_version_list(raw)?);
    }
    if let Some(project) = &args.project {
        merged.project_dir = Some(project.clone());
    }
    if let Some(work_dir) = &args.work_dir {
        merged.work_dir = Some(work_dir.clone());
    }
    if let Some(prefix) = &args.env_prefix {
        merged.env_prefix = Some(prefix.clone());
    }
    if let Some(interpreter) = &args.interpreter {
        merged.interpreter = Some(interpreter.clone());
    }

    config::validate_config(&merged)?;
    Ok(merged)
}

fn overlay_check_args(checks: &mut ChecksConfig, args: &RunArgs) {
    if let Some(path) = &args.pre_commit_config {
        checks.config = Some(path.clone());
    }
    if !args.hooks.is_empty() {
        checks.hooks = Some(args.hooks.clone());
    }
    if !args.extra_packages.is_empty() {
        checks.extra_packages = Some(args.extra_packages.clone());
    }
}

/// Make directories absolute and confirm the project exists.
fn finish(mut run_config: RunConfig) -> Result<RunConfig, VermatrixError> {
    config::validate_versions(&run_config.versions)?;

    let cwd = std::env::current_dir()?;
    run_config.project_dir = absolutize(&cwd, &run_config.project_dir);
    run_config.work_dir = absolutize(&cwd, &run_config.work_dir);

    if !run_config.project_dir.is_dir() {
        return Err(VermatrixError::Config(format!(
            "Project directory not found: {}",
            run_config.project_dir.display()
        )));
    }

    Ok(run_config)
}

fn absolutize(base: &Path, path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    };
    // Drop `.` components so environment paths read cleanly in logs
    joined
        .components()
        .filter(|c| !matches!(c, std::path::Component::CurDir))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolutize() {
        let base = Path::new("/home/dev/project");
        assert_eq!(absolutize(base, Path::new(".")), PathBuf::from("/home/dev/project"));
        assert_eq!(absolutize(base, Path::new("./sub")), PathBuf::from("/home/dev/project/sub"));
        assert_eq!(absolutize(base, Path::new("/abs")), PathBuf::from("/abs"));
    }

    #[test]
    fn test_cli_versions_override_file() {
        let file = VermatrixConfig {
            versions: Some(vec!["3.9".into()]),
            ..Default::default()
        };
        let args = MatrixArgs {
            versions: Some("3.12,3.13".into()),
            ..Default::default()
        };
        let merged = overlay_matrix_args(file, &args).unwrap();
        assert_eq!(merged.versions, Some(vec!["3.12".to_string(), "3.13".to_string()]));
    }

    #[test]
    fn test_malformed_cli_versions_are_fatal() {
        let args = MatrixArgs {
            versions: Some("3.12,three".into()),
            ..Default::default()
        };
        let err = overlay_matrix_args(VermatrixConfig::default(), &args).unwrap_err();
        assert!(err.classify().fatal);
    }

    #[test]
    fn test_cli_interpreter_is_validated() {
        let args = MatrixArgs {
            interpreter: Some("python3".into()),
            ..Default::default()
        };
        assert!(overlay_matrix_args(VermatrixConfig::default(), &args).is_err());
    }

    #[test]
    fn test_check_args_override() {
        let mut checks = ChecksConfig {
            config: Some("a.yaml".into()),
            hooks: Some(vec!["ruff".into()]),
            extra_packages: None,
        };
        let args = RunArgs {
            pre_commit_config: Some("b.yaml".into()),
            ..Default::default()
        };
        overlay_check_args(&mut checks, &args);
        assert_eq!(checks.config.as_deref(), Some("b.yaml"));
        assert_eq!(checks.hooks, Some(vec!["ruff".to_string()]));
    }

    #[test]
    fn test_missing_project_dir_is_fatal() {
        let config = RunConfig {
            project_dir: PathBuf::from("/nonexistent/vermatrix/project"),
            ..Default::default()
        };
        assert!(matches!(finish(config), Err(VermatrixError::Config(_))));
    }
}
