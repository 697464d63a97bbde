//! Logger setup for verbose output.

use std::io::Write;

use env_logger::{Builder, Env};

/// Installs the global logger.
///
/// Without `verbose` only warnings are shown. `RUST_LOG` still overrides
/// the default filter either way.
///
/// # Arguments
///
/// * `verbose` - Whether verbose mode is enabled.
pub fn init(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    let _ = Builder::from_env(Env::default().default_filter_or(default_filter))
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .try_init();
}
