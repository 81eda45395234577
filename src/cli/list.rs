use console::style;

use crate::cli::commands::MatrixArgs;
use crate::cli::settings;
use crate::env::EnvStatus;
use crate::errors::VermatrixError;
use crate::process::{CommandRunner, SystemRunner};

pub async fn handle_list(args: MatrixArgs) -> Result<i32, VermatrixError> {
    let config = settings::resolve_matrix(&args).await?;
    let runner = SystemRunner::default();

    let width = config.versions.iter().map(|v| v.len()).max().unwrap_or(0);
    println!("{}", style("Configured versions:").white().bold());

    let mut found = 0;
    for version in &config.versions {
        let interpreter = config.interpreter_for(version);
        let location = match runner.locate(&interpreter) {
            Some(path) => {
                found += 1;
                style(path.display().to_string()).green().to_string()
            }
            None => style(format!("{} not found", interpreter)).yellow().to_string(),
        };

        let leftover = match config.env_for(version).status() {
            EnvStatus::Present => style("  (leftover environment)").red().dim().to_string(),
            EnvStatus::Absent => String::new(),
        };

        println!("  Python {:<width$}  {}{}", version, location, leftover, width = width);
    }

    println!(
        "\n  {} of {} interpreter(s) available",
        style(found).white().bold(),
        config.versions.len()
    );
    Ok(0)
}
