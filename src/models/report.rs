use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::version_result::{VersionResult, VersionStatus};

/// Aggregate counts derived from the ordered results.
///
/// `total` counts attempted versions only: skipped versions are reported
/// but never part of the total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl RunSummary {
    pub fn from_results(results: &[VersionResult]) -> Self {
        results.iter().fold(Self::default(), |mut acc, r| {
            match r.status {
                VersionStatus::Passed => acc.passed += 1,
                VersionStatus::Failed => acc.failed += 1,
                VersionStatus::Skipped => acc.skipped += 1,
            }
            acc.total = acc.passed + acc.failed;
            acc
        })
    }

    /// 0 when nothing failed, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.failed > 0 { 1 } else { 0 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub results: Vec<VersionResult>,
    pub summary: RunSummary,
}

impl RunReport {
    pub fn new(run_id: Uuid, started_at: DateTime<Utc>, results: Vec<VersionResult>) -> Self {
        let summary = RunSummary::from_results(&results);
        Self {
            run_id,
            started_at,
            finished_at: Utc::now(),
            results,
            summary,
        }
    }

    pub fn exit_code(&self) -> i32 {
        self.summary.exit_code()
    }

    pub fn duration_ms(&self) -> u64 {
        (self.finished_at - self.started_at).num_milliseconds().max(0) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn results(statuses: &[VersionStatus]) -> Vec<VersionResult> {
        statuses
            .iter()
            .enumerate()
            .map(|(i, s)| {
                let version = format!("3.{}", 10 + i);
                match s {
                    VersionStatus::Passed => VersionResult::passed(&version, 0),
                    VersionStatus::Failed => VersionResult::failed(&version, 0, "checks"),
                    VersionStatus::Skipped => VersionResult::skipped(&version),
                }
            })
            .collect()
    }

    #[test]
    fn test_summary_excludes_skipped_from_total() {
        use VersionStatus::*;
        let summary = RunSummary::from_results(&results(&[Passed, Skipped, Failed, Skipped]));
        assert_eq!(summary.total, 2);
        assert_eq!(summary.passed, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.skipped, 2);
    }

    #[test]
    fn test_summary_total_bounded_by_input() {
        use VersionStatus::*;
        let input = results(&[Passed, Passed, Skipped]);
        let summary = RunSummary::from_results(&input);
        assert!(summary.total <= input.len());
        assert_eq!(summary.total, summary.passed + summary.failed);
    }

    #[test]
    fn test_empty_summary() {
        let summary = RunSummary::from_results(&[]);
        assert_eq!(summary, RunSummary::default());
        assert_eq!(summary.exit_code(), 0);
    }

    #[test]
    fn test_exit_code_law() {
        use VersionStatus::*;
        assert_eq!(RunSummary::from_results(&results(&[Passed, Skipped])).exit_code(), 0);
        assert_eq!(RunSummary::from_results(&results(&[Skipped, Skipped])).exit_code(), 0);
        assert_eq!(RunSummary::from_results(&results(&[Passed, Failed])).exit_code(), 1);
    }

    #[test]
    fn test_report_keeps_result_order() {
        use VersionStatus::*;
        let report = RunReport::new(Uuid::new_v4(), Utc::now(), results(&[Failed, Passed, Skipped]));
        let versions: Vec<&str> = report.results.iter().map(|r| r.version.as_str()).collect();
        assert_eq!(versions, vec!["3.10", "3.11", "3.12"]);
        assert_eq!(report.exit_code(), 1);
    }
}
