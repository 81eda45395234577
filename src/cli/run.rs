use std::future::Future;
use std::path::Path;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use crate::audit::WorkflowLogger;
use crate::cli::commands::RunArgs;
use crate::cli::settings;
use crate::errors::VermatrixError;
use crate::output::{RunEvent, TerminalSink};
use crate::pipeline::Orchestrator;
use crate::process::SystemRunner;
use crate::reporting::{render_summary, write_json_report};
use tracing::{info, warn};

pub async fn handle_run(args: RunArgs, quiet: bool) -> Result<i32, VermatrixError> {
    let config = settings::resolve_run(&args).await?;
    info!(
        versions = ?config.versions,
        project = %config.project_dir.display(),
        check_config = %config.check_config.display(),
        "Resolved run settings"
    );

    let cancel_token = CancellationToken::new();
    spawn_interrupt_handler(cancel_token.clone());

    let runner = Arc::new(SystemRunner::new(config.step_timeout, cancel_token.clone()));
    let run_id = config.run_id.to_string();

    let mut orchestrator = Orchestrator::new(config, runner).with_cancel_token(cancel_token);
    if !quiet {
        orchestrator = orchestrator.with_sink(Arc::new(TerminalSink));
    }

    let log_writer = match &args.log_file {
        Some(path) => {
            let logger = WorkflowLogger::new(Path::new(path));
            logger.initialize(&run_id).await?;
            let (tx, rx) = mpsc::unbounded_channel();
            orchestrator = orchestrator.with_event_channel(tx);
            Some(tokio::spawn(write_run_log(logger, rx)))
        }
        None => None,
    };

    let result = orchestrator.run().await;

    // Dropping the orchestrator closes the log channel
    drop(orchestrator);
    if let Some(handle) = log_writer {
        if let Err(e) = handle.await {
            warn!(error = %e, "Run log writer stopped unexpectedly");
        }
    }

    let report = result?;
    println!("{}", render_summary(&report));

    if let Some(path) = &args.report {
        write_json_report(&report, Path::new(path)).await?;
    }

    Ok(report.exit_code())
}

async fn write_run_log(logger: WorkflowLogger, mut rx: mpsc::UnboundedReceiver<RunEvent>) {
    while let Some(event) = rx.recv().await {
        if let Err(e) = logger.log_event(&event).await {
            warn!(path = %logger.path().display(), error = %e, "Failed to write run log");
        }
    }
}

/// First Ctrl-C cancels the run; the orchestrator tears down the current
/// environment before returning. A second Ctrl-C exits immediately.
fn spawn_interrupt_handler(token: CancellationToken) {
    tokio::spawn(async move {
        if watch_interrupts(tokio::signal::ctrl_c, token).await {
            eprintln!("Forced exit, environments may be left behind");
            std::process::exit(130);
        }
    });
}

/// Returns true when a second interrupt arrives after the first cancelled the run.
async fn watch_interrupts<F, Fut>(mut next_signal: F, token: CancellationToken) -> bool
where
    F: FnMut() -> Fut,
    Fut: Future<Output = std::io::Result<()>>,
{
    if next_signal().await.is_err() {
        return false;
    }
    eprintln!("\nInterrupted, cleaning up... (Ctrl-C again to force quit)");
    token.cancel();
    next_signal().await.is_ok()
}
