//! Replayer build orchestration
//!
//! Runs the log transform and then hands the generated source to the
//! compiler.

use std::process::ExitStatus;

use log::{debug, warn};

use crate::error::ReplayerError;
use crate::linker::BuildCommand;
use crate::transform::{self, TransformSummary};

use super::cli::{Cli, ReplayerConfig};

/// Result of a driver run.
#[derive(Debug)]
pub struct RunOutcome {
    pub summary: TransformSummary,
    /// `None` when the build step was skipped.
    pub status: Option<ExitStatus>,
}

impl RunOutcome {
    /// Exit code the process should terminate with.
    ///
    /// This is the compiler's own exit code. A compiler killed by a signal
    /// maps to `128 + signal` like the shell reports it.
    pub fn exit_code(&self) -> i32 {
        match self.status {
            None => 0,
            Some(status) => status.code().unwrap_or_else(|| signal_exit_code(status)),
        }
    }
}

#[cfg(unix)]
fn signal_exit_code(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    status.signal().map(|signal| 128 + signal).unwrap_or(1)
}

#[cfg(not(unix))]
fn signal_exit_code(_status: ExitStatus) -> i32 {
    1
}

/// Main replayer driver
pub struct ReplayerDriver {
    config: ReplayerConfig,
}

impl ReplayerDriver {
    /// Create a new driver from CLI arguments
    pub fn new(cli: Cli) -> Self {
        Self::from_config(cli.into_config())
    }

    /// Create a new driver from configuration
    pub fn from_config(config: ReplayerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReplayerConfig {
        &self.config
    }

    /// The compiler invocation this driver would run.
    pub fn build_command(&self) -> BuildCommand {
        BuildCommand::new(&self.config.cpp_path, &self.config.header_dir, &self.config.libraries)
            .with_compiler(self.config.compiler.clone())
    }

    /// Transform the replayer log, then compile and link the result
    pub fn run(&self) -> Result<RunOutcome, ReplayerError> {
        debug!("Verbose output enabled");

        let summary = transform::transform(&self.config.log_path, &self.config.cpp_path)?;

        if self.config.skip_build {
            debug!("Skipping build of {}", self.config.cpp_path.display());
            return Ok(RunOutcome { summary, status: None });
        }

        let status = self.build_command().run()?;
        if status.success() {
            debug!("Build finished with {}", status);
        } else {
            warn!("{} exited with {}", self.config.compiler, status);
        }
        Ok(RunOutcome {
            summary,
            status: Some(status),
        })
    }
}
