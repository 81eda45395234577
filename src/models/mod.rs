pub mod report;
pub mod version_result;

pub use report::{RunReport, RunSummary};
pub use version_result::{VersionResult, VersionStatus};
