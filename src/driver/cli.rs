//! CLI parsing and configuration module
//!
//! This module handles command-line argument parsing using clap and
//! provides the configuration consumed by the replayer driver.

use clap::Parser as CliParser;
use std::path::PathBuf;

use crate::linker::DEFAULT_COMPILER;

/// CLI interface using clap
#[derive(CliParser, Debug)]
#[command(
    name = "sai_replayer_build",
    version,
    about = "Modifies the internal SAI replayer logs and builds them using GCC."
)]
pub struct Cli {
    /// Input SAI replayer log generated at runtime by the agent
    #[arg(long = "sai_replayer_log", value_name = "FILE", default_value = "sai_replayer.log")]
    pub sai_replayer_log: PathBuf,

    /// Processed C++ file handed to the compiler. The log is written to build
    /// inside the agent, so its entry point is replaced to compile standalone.
    #[arg(long = "sai_replayer_cpp", value_name = "FILE", default_value = "sai_replayer.cpp")]
    pub sai_replayer_cpp: PathBuf,

    /// Directory containing sai.h
    #[arg(long = "sai_headers", value_name = "DIR")]
    pub sai_headers: PathBuf,

    /// SAI implementation library (e.g. libsai.a)
    #[arg(long = "sai_lib", value_name = "FILE")]
    pub sai_lib: PathBuf,

    /// Broadcom SDK library (e.g. libxgs_robo.a)
    #[arg(long = "brcm_lib", value_name = "FILE")]
    pub brcm_lib: PathBuf,

    /// Broadcom PHY mode library (e.g. libphymodepil.a)
    #[arg(long = "brcm_phymode_lib", value_name = "FILE")]
    pub brcm_phymode_lib: PathBuf,

    /// Broadcom EPDM library (e.g. libepdm.a)
    #[arg(long = "brcm_epdm_lib", value_name = "FILE")]
    pub brcm_epdm_lib: PathBuf,

    /// Protobuf library (e.g. libprotobuf.a)
    #[arg(long = "protobuf_lib", value_name = "FILE")]
    pub protobuf_lib: PathBuf,

    /// Additional library appended after the vendor libraries
    #[arg(long = "extra_lib", value_name = "FILE", action = clap::ArgAction::Append)]
    pub extra_libs: Vec<PathBuf>,

    /// Compiler used to build the replayer
    #[arg(long, value_name = "PROGRAM", default_value = DEFAULT_COMPILER)]
    pub compiler: String,

    /// Only write the C++ file, do not compile it
    #[arg(long = "skip_build")]
    pub skip_build: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Configuration for one replayer build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayerConfig {
    pub log_path: PathBuf,
    pub cpp_path: PathBuf,
    pub header_dir: PathBuf,
    /// Link order matters for static archives.
    pub libraries: Vec<PathBuf>,
    pub compiler: String,
    pub skip_build: bool,
    pub verbose: bool,
}

impl Cli {
    /// Convert CLI arguments into a replayer configuration
    pub fn into_config(self) -> ReplayerConfig {
        let mut libraries = vec![
            self.sai_lib,
            self.brcm_lib,
            self.brcm_phymode_lib,
            self.brcm_epdm_lib,
            self.protobuf_lib,
        ];
        libraries.extend(self.extra_libs);

        ReplayerConfig {
            log_path: self.sai_replayer_log,
            cpp_path: self.sai_replayer_cpp,
            header_dir: self.sai_headers,
            libraries,
            compiler: self.compiler,
            skip_build: self.skip_build,
            verbose: self.verbose,
        }
    }
}
