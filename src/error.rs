use std::path::PathBuf;

use thiserror::Error;

/// Errors that stop a replayer build before or while the compiler runs.
///
/// Compiler failures are not represented here: they are reported by the
/// compiler itself and surface through its exit status.
#[derive(Debug, Error)]
pub enum ReplayerError {
    #[error("failed to read replayer log {}: {source}", .path.display())]
    ReadLog {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write replayer source {}: {source}", .path.display())]
    WriteSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to execute {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// Prints an error to stderr in the same shape for every failure kind.
pub fn report(err: &ReplayerError) {
    eprintln!("\x1b[31mError\x1b[0m: {}", err);
}
