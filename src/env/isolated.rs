use std::path::{Path, PathBuf};

use crate::errors::VermatrixError;
use crate::process::StepCommand;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvStatus {
    Present,
    Absent,
}

/// A disposable per-version environment directory.
///
/// The directory name is `<prefix><version>`, unique per version.
#[derive(Debug, Clone)]
pub struct IsolatedEnv {
    version: String,
    root: PathBuf,
}

impl IsolatedEnv {
    pub fn new(work_dir: &Path, prefix: &str, version: &str) -> Self {
        Self {
            version: version.to_string(),
            root: work_dir.join(format!("{}{}", prefix, version)),
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn status(&self) -> EnvStatus {
        if self.root.exists() {
            EnvStatus::Present
        } else {
            EnvStatus::Absent
        }
    }

    pub fn bin_dir(&self) -> PathBuf {
        if cfg!(windows) {
            self.root.join("Scripts")
        } else {
            self.root.join("bin")
        }
    }

    /// Path of an executable installed inside the environment.
    pub fn executable(&self, name: &str) -> PathBuf {
        if cfg!(windows) {
            self.bin_dir().join(format!("{}.exe", name))
        } else {
            self.bin_dir().join(name)
        }
    }

    pub fn python(&self) -> PathBuf {
        self.executable("python")
    }

    /// `<interpreter> -m venv <root>`
    pub fn create_command(&self, interpreter: &Path, cwd: &Path) -> StepCommand {
        StepCommand::new(interpreter, cwd)
            .args(["-m", "venv"])
            .arg(self.root.to_string_lossy())
    }

    /// `python -m pip <args>` using the environment's own interpreter.
    pub fn pip_command<I, S>(&self, args: I, cwd: &Path) -> StepCommand
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        StepCommand::new(self.python(), cwd)
            .args(["-m", "pip"])
            .args(args)
    }

    /// An executable from the environment's bin directory.
    pub fn tool_command<I, S>(&self, tool: &str, args: I, cwd: &Path) -> StepCommand
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        StepCommand::new(self.executable(tool), cwd).args(args)
    }

    /// Remove a directory left over from an earlier run. Returns whether one existed.
    pub async fn remove_stale(&self) -> Result<bool, VermatrixError> {
        if self.status() == EnvStatus::Absent {
            return Ok(false);
        }

        tokio::fs::remove_dir_all(&self.root).await.map_err(|e| {
            VermatrixError::Provision(format!(
                "Failed to remove stale environment {}: {}",
                self.root.display(),
                e
            ))
        })?;
        info!(version = %self.version, path = %self.root.display(), "Removed stale environment");
        Ok(true)
    }

    /// Delete the environment. Succeeds when nothing is there.
    pub async fn teardown(&self) -> Result<(), VermatrixError> {
        match tokio::fs::remove_dir_all(&self.root).await {
            Ok(()) => {
                debug!(version = %self.version, path = %self.root.display(), "Environment removed");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(VermatrixError::Provision(format!(
                "Failed to remove environment {}: {}",
                self.root.display(),
                e
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_names_are_unique_per_version() {
        let work = Path::new("/work");
        let a = IsolatedEnv::new(work, ".venv-test-", "3.11");
        let b = IsolatedEnv::new(work, ".venv-test-", "3.12");
        assert_eq!(a.root(), Path::new("/work/.venv-test-3.11"));
        assert_ne!(a.root(), b.root());
    }

    #[cfg(unix)]
    #[test]
    fn test_command_shapes() {
        let env = IsolatedEnv::new(Path::new("/work"), ".venv-test-", "3.12");
        let project = Path::new("/project");

        let create = env.create_command(Path::new("/usr/bin/python3.12"), project);
        assert_eq!(create.to_string(), "/usr/bin/python3.12 -m venv /work/.venv-test-3.12");

        let pip = env.pip_command(["install", "--upgrade", "pip"], project);
        assert_eq!(pip.to_string(), "/work/.venv-test-3.12/bin/python -m pip install --upgrade pip");

        let hooks = env.tool_command("pre-commit", ["install-hooks"], project);
        assert_eq!(hooks.program, PathBuf::from("/work/.venv-test-3.12/bin/pre-commit"));
        assert_eq!(hooks.cwd, PathBuf::from("/project"));
    }

    #[tokio::test]
    async fn test_remove_stale_environment() {
        let dir = TempDir::new().unwrap();
        let env = IsolatedEnv::new(dir.path(), ".venv-test-", "3.10");
        assert!(!env.remove_stale().await.unwrap());

        std::fs::create_dir_all(env.bin_dir()).unwrap();
        std::fs::write(env.python(), "stale").unwrap();
        assert_eq!(env.status(), EnvStatus::Present);

        assert!(env.remove_stale().await.unwrap());
        assert_eq!(env.status(), EnvStatus::Absent);
    }

    #[tokio::test]
    async fn test_teardown_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let env = IsolatedEnv::new(dir.path(), ".venv-test-", "3.13");
        std::fs::create_dir_all(env.bin_dir()).unwrap();

        env.teardown().await.unwrap();
        assert_eq!(env.status(), EnvStatus::Absent);
        env.teardown().await.unwrap();
    }
}
