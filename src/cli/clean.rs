use console::style;

use crate::cli::commands::MatrixArgs;
use crate::cli::settings;
use crate::env::EnvStatus;
use crate::errors::VermatrixError;
use tracing::info;

pub async fn handle_clean(args: MatrixArgs) -> Result<i32, VermatrixError> {
    let config = settings::resolve_matrix(&args).await?;

    let mut removed = 0;
    for version in &config.versions {
        let env = config.env_for(version);
        if env.status() == EnvStatus::Absent {
            continue;
        }
        env.teardown().await?;
        info!(version = %version, path = %env.root().display(), "Removed leftover environment");
        println!("  {} removed {}", style("✓").green(), env.root().display());
        removed += 1;
    }

    if removed == 0 {
        println!("  {}", style("Nothing to clean").dim());
    }
    Ok(0)
}
