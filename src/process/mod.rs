pub mod command;
pub mod locate;
pub mod runner;

pub use command::{StepCommand, StepOutcome};
pub use runner::{CommandRunner, SystemRunner};
