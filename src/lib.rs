//! Run a project's quality-check battery once per interpreter version, each
//! time inside a fresh, disposable environment, and summarise the outcome.
//!
//! The [`pipeline::Orchestrator`] drives the loop; subprocesses go through the
//! [`process::CommandRunner`] trait so the loop can be exercised without real
//! interpreters.

pub mod audit;
pub mod cli;
pub mod config;
pub mod env;
pub mod errors;
pub mod models;
pub mod output;
pub mod pipeline;
pub mod process;
pub mod reporting;
pub mod utils;
