use std::path::{Path, PathBuf};

use chrono::Utc;
use tokio::io::AsyncWriteExt;
use crate::errors::VermatrixError;
use crate::output::RunEvent;

/// Append-only, timestamped plain-text log of a run.
pub struct WorkflowLogger {
    path: PathBuf,
}

impl WorkflowLogger {
    pub fn new(path: &Path) -> Self {
        Self { path: path.to_path_buf() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the header, replacing any previous log at the same path.
    pub async fn initialize(&self, run_id: &str) -> Result<(), VermatrixError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let header = format!(
            "# vermatrix run log\n# Run: {}\n# Started: {}\n\n",
            run_id,
            Utc::now().to_rfc3339()
        );
        tokio::fs::write(&self.path, header).await?;
        Ok(())
    }

    pub async fn log_event(&self, event: &RunEvent) -> Result<(), VermatrixError> {
        self.log_line(&event.describe()).await
    }

    pub async fn log_line(&self, message: &str) -> Result<(), VermatrixError> {
        let line = format!("[{}] {}\n", Utc::now().format("%H:%M:%S"), message);
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        Ok(())
    }
}
