pub mod orchestrator;
pub mod phase;
pub mod state;

pub use orchestrator::Orchestrator;
pub use phase::{StepName, STEPS};
pub use state::RunConfig;
