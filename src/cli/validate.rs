use std::path::PathBuf;

use crate::cli::commands::ValidateArgs;
use crate::config;
use crate::errors::VermatrixError;
use crate::pipeline::RunConfig;

pub async fn handle_validate(args: ValidateArgs) -> Result<i32, VermatrixError> {
    let path = PathBuf::from(&args.config);
    let file_config = config::parse_config(&path).await?;
    let resolved = RunConfig::from_file_config(&file_config);

    println!("Configuration is valid: {}", args.config);
    println!("  versions:    {}", resolved.versions.join(", "));
    println!("  interpreter: {}", resolved.interpreter_template);
    println!("  checks:      {}", resolved.check_config.display());
    if !resolved.hooks.is_empty() {
        println!("  hooks:       {}", resolved.hooks.join(", "));
    }
    Ok(0)
}
