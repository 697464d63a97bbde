use clap::Parser as ClapParser;
use sai_replayer_build::driver::{Cli, ReplayerDriver};
use sai_replayer_build::{error, logger};
use std::process::exit;

/// The main entry point for the application.
///
/// Parses command-line arguments, transforms the replayer log and builds it.
/// The process exits with the compiler's exit code.
fn main() {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    let driver = ReplayerDriver::new(cli);
    match driver.run() {
        Ok(outcome) => exit(outcome.exit_code()),
        Err(e) => {
            error::report(&e);
            exit(1);
        }
    }
}
