//! Text front end: command dispatch and the batch/interactive drivers

pub mod command;
pub mod runner;

pub use command::{execute, Outcome, Verb};
pub use runner::Shell;
