use clap::{Parser, Subcommand, Args};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("VERMATRIX_GIT_HASH"),
    ", built ",
    env!("VERMATRIX_BUILD_DATE"),
    ")"
);

#[derive(Parser)]
#[command(
    name = "vermatrix",
    version,
    long_version = LONG_VERSION,
    about = "Run a project's check battery across multiple interpreter versions"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress lines; only the summary is printed
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the check battery for every configured version
    Run(RunArgs),
    /// Show configured versions and whether each interpreter is installed
    List(MatrixArgs),
    /// Remove environment directories left behind by an interrupted run
    Clean(MatrixArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

/// Options shared by every command that works on the version matrix.
#[derive(Args, Clone, Default)]
pub struct MatrixArgs {
    /// YAML configuration file (defaults to ./vermatrix.yaml when present)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Comma-separated versions, e.g. 3.11,3.12
    #[arg(long)]
    pub versions: Option<String>,

    /// Project directory to install and check
    #[arg(short, long)]
    pub project: Option<String>,

    /// Directory that holds the per-version environments
    #[arg(long)]
    pub work_dir: Option<String>,

    /// Environment directory name prefix
    #[arg(long)]
    pub env_prefix: Option<String>,

    /// Interpreter name template, e.g. "python{version}"
    #[arg(long)]
    pub interpreter: Option<String>,
}

#[derive(Args, Clone, Default)]
pub struct RunArgs {
    #[command(flatten)]
    pub matrix: MatrixArgs,

    /// pre-commit configuration file, relative to the project
    #[arg(long)]
    pub pre_commit_config: Option<String>,

    /// Run only these hook ids, one at a time (repeatable)
    #[arg(long = "hook", value_name = "HOOK_ID")]
    pub hooks: Vec<String>,

    /// Extra package installed next to pre-commit (repeatable)
    #[arg(long = "extra-package", value_name = "PACKAGE")]
    pub extra_packages: Vec<String>,

    /// Stop after the first failing version
    #[arg(long)]
    pub fail_fast: bool,

    /// Kill any single step that runs longer than this many seconds (0 = never)
    #[arg(long, value_name = "SECS")]
    pub step_timeout: Option<u64>,

    /// Write a JSON report to this path
    #[arg(long)]
    pub report: Option<String>,

    /// Write a timestamped run log to this path
    #[arg(long)]
    pub log_file: Option<String>,
}

#[derive(Args, Clone)]
pub struct ValidateArgs {
    /// Config file to validate
    pub config: String,
}
