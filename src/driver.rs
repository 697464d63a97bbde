//! Replayer build driver
//!
//! Parses the command line and runs the transform and build steps in order.

pub mod cli;
pub mod replayer;

pub use cli::{Cli, ReplayerConfig};
pub use replayer::{ReplayerDriver, RunOutcome};

#[cfg(test)]
mod tests_driver;
