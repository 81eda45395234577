use std::path::Path;

use crate::errors::VermatrixError;
use crate::models::RunReport;
use tracing::info;

/// Write the run report as pretty-printed JSON, creating parent directories.
pub async fn write_json_report(report: &RunReport, path: &Path) -> Result<(), VermatrixError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }

    let json = serde_json::to_string_pretty(report)?;
    tokio::fs::write(path, json).await?;
    info!(path = %path.display(), versions = report.results.len(), "Wrote run report");
    Ok(())
}
