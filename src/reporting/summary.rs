use console::style;

use crate::models::{RunReport, VersionResult, VersionStatus};
use crate::utils::formatting::format_duration;

const RULE_WIDTH: usize = 48;

/// Render the final summary table: one line per version in run order,
/// then the aggregate counts.
pub fn render_summary(report: &RunReport) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let width = report
        .results
        .iter()
        .map(|r| r.version.len())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    out.push_str(&format!("\n{}\n", style(&rule).cyan()));
    out.push_str(&format!("{}\n", style("Test Summary").white().bold()));
    out.push_str(&format!("{}\n", style(&rule).cyan()));

    for result in &report.results {
        out.push_str(&render_result_line(result, width));
        out.push('\n');
    }

    let summary = &report.summary;
    out.push_str(&format!("{}\n", style("-".repeat(RULE_WIDTH)).dim()));
    out.push_str(&format!(
        "  Total: {}  {}  {}  {}\n",
        style(summary.total).white().bold(),
        style(format!("Passed: {}", summary.passed)).green(),
        if summary.failed > 0 {
            style(format!("Failed: {}", summary.failed)).red().bold()
        } else {
            style(format!("Failed: {}", summary.failed)).dim()
        },
        style(format!("Skipped: {}", summary.skipped)).yellow(),
    ));
    out.push_str(&format!(
        "  {}\n",
        style(format!("Finished in {}", format_duration(report.duration_ms()))).dim()
    ));
    out
}

fn render_result_line(result: &VersionResult, width: usize) -> String {
    let label = format!("Python {:<width$}", result.version, width = width);
    let status = format!("{:<7}", result.status.as_str());
    let status = match result.status {
        VersionStatus::Passed => style(status).green().bold(),
        VersionStatus::Failed => style(status).red().bold(),
        VersionStatus::Skipped => style(status).yellow(),
    };

    let detail = match (result.status, result.reason.as_deref()) {
        (VersionStatus::Skipped, _) => "(not found)".to_string(),
        (VersionStatus::Failed, Some(reason)) => {
            format!("{}  {}", format_duration(result.duration_ms), reason)
        }
        _ => format_duration(result.duration_ms),
    };

    format!("  {}  {}  {}", label, status, style(detail).dim())
}
