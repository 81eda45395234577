use console::style;

use crate::models::VersionStatus;
use crate::output::events::RunEvent;
use crate::utils::formatting::format_duration;

/// Render a run event as a styled terminal line.
pub fn render_event(event: &RunEvent) -> String {
    match event {
        RunEvent::RunStarted { run_id, versions } => {
            format!(
                "{} Testing {} version(s): {} {}",
                style("▶").green().bold(),
                versions.len(),
                style(versions.join(", ")).white().bold(),
                style(format!("(run {})", short_id(run_id))).dim(),
            )
        }
        RunEvent::VersionStarted { version, interpreter } => {
            format!(
                "\n{} {} {} {}",
                style("===").cyan().bold(),
                style(format!("Python {}", version)).cyan().bold(),
                style("===").cyan().bold(),
                style(interpreter).dim(),
            )
        }
        RunEvent::VersionSkipped { version, interpreter } => {
            format!(
                "\n{} {} {}",
                style("⊘").yellow(),
                style(format!("Python {} not found, skipping", version)).yellow(),
                style(format!("({})", interpreter)).dim(),
            )
        }
        RunEvent::StepStarted { step, detail, .. } => {
            format!(
                "  {} {}{}",
                style("⏳").yellow(),
                style(step).yellow(),
                style(detail_suffix(detail)).dim(),
            )
        }
        RunEvent::StepCompleted { step, detail, duration_ms, .. } => {
            format!(
                "  {} {}{} ({})",
                style("✓").green(),
                style(step).green(),
                style(detail_suffix(detail)).dim(),
                format_duration(*duration_ms),
            )
        }
        RunEvent::StepFailed { step, detail, error, .. } => {
            format!(
                "  {} {}{} ({})",
                style("✗").red(),
                style(step).red(),
                style(detail_suffix(detail)).dim(),
                style(error).red().dim(),
            )
        }
        RunEvent::VersionFinished { result } => {
            format!(
                "  {} Python {} {} in {}",
                match result.status {
                    VersionStatus::Passed => style("✓").green().bold(),
                    VersionStatus::Failed => style("✗").red().bold(),
                    VersionStatus::Skipped => style("⊘").yellow().bold(),
                },
                result.version,
                render_status_badge(result.status),
                format_duration(result.duration_ms),
            )
        }
        RunEvent::RunCompleted { summary, duration_ms } => {
            let headline = if summary.failed > 0 {
                style("✗ Run finished with failures").red().bold()
            } else {
                style("✓ Run finished").green().bold()
            };
            format!("\n{} {}", headline, style(format_duration(*duration_ms)).dim())
        }
        RunEvent::Log { message } => {
            format!("  {}", style(message).dim())
        }
    }
}

/// Status word colored by outcome.
pub fn render_status_badge(status: VersionStatus) -> String {
    match status {
        VersionStatus::Passed => style(status.as_str()).green().bold().to_string(),
        VersionStatus::Failed => style(status.as_str()).red().bold().to_string(),
        VersionStatus::Skipped => style(status.as_str()).yellow().to_string(),
    }
}

fn detail_suffix(detail: &Option<String>) -> String {
    detail.as_ref().map(|d| format!(" [{}]", d)).unwrap_or_default()
}

fn short_id(run_id: &str) -> &str {
    run_id.get(..8).unwrap_or(run_id)
}
