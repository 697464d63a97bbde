//! This module is responsible for compiling and linking the generated replayer source.
//! It composes a single compiler command line and hands it to the shell.

use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use log::debug;

use crate::error::ReplayerError;

/// Compiler used when none is configured.
pub const DEFAULT_COMPILER: &str = "gcc";

/// Runtime libraries the SAI SDK expects, always placed before the vendor libraries.
pub const LINK_FLAGS: [&str; 5] = ["-lm", "-lpthread", "-lrt", "-lstdc++", "-ldl"];

/// A compiler invocation for one replayer source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildCommand {
    pub compiler: String,
    pub source: PathBuf,
    pub header_dir: PathBuf,
    /// Library artifacts, in link order.
    pub libraries: Vec<PathBuf>,
}

impl BuildCommand {
    pub fn new(source: &Path, header_dir: &Path, libraries: &[PathBuf]) -> Self {
        Self {
            compiler: DEFAULT_COMPILER.to_string(),
            source: source.to_path_buf(),
            header_dir: header_dir.to_path_buf(),
            libraries: libraries.to_vec(),
        }
    }

    pub fn with_compiler(mut self, compiler: impl Into<String>) -> Self {
        self.compiler = compiler.into();
        self
    }

    /// Renders the command as one shell command line.
    ///
    /// Words are joined with single spaces and no quoting, so the shell
    /// splits and expands them exactly as written on the command line.
    pub fn to_shell_string(&self) -> String {
        let mut command_line = format!(
            "{} {} -I {}",
            self.compiler,
            self.source.display(),
            self.header_dir.display()
        );
        for flag in LINK_FLAGS {
            command_line.push(' ');
            command_line.push_str(flag);
        }
        for lib in &self.libraries {
            command_line.push(' ');
            command_line.push_str(&lib.to_string_lossy());
        }
        command_line
    }

    /// Prints the command and runs it through `sh -c`, waiting for it to finish.
    ///
    /// The compiler's output goes straight to the inherited stdout/stderr.
    /// Its exit status is returned as is.
    pub fn run(&self) -> Result<ExitStatus, ReplayerError> {
        let command_line = self.to_shell_string();
        println!("{}", command_line);

        if let Some(program) = self.compiler.split_whitespace().next() {
            if find_program(program).is_none() {
                debug!("'{}' was not found in PATH", program);
            }
        }

        debug!("Spawning sh -c for {}", self.source.display());
        Command::new("sh")
            .arg("-c")
            .arg(&command_line)
            .status()
            .map_err(|source| ReplayerError::Spawn {
                program: "sh".to_string(),
                source,
            })
    }
}

/// Compiles `source` against the SAI headers in `header_dir` and links it
/// with `libraries` in the given order, using the default compiler.
pub fn build(source: &Path, header_dir: &Path, libraries: &[PathBuf]) -> Result<ExitStatus, ReplayerError> {
    BuildCommand::new(source, header_dir, libraries).run()
}

/// Looks `program` up the way the shell would.
///
/// Names containing a slash are checked directly instead of searching `PATH`.
///
/// # Returns
///
/// The resolved path, or `None` if the program could not be found.
pub fn find_program(program: &str) -> Option<PathBuf> {
    if program.contains('/') {
        let path = PathBuf::from(program);
        return path.is_file().then_some(path);
    }

    let path_var = std::env::var_os("PATH")?;
    std::env::split_paths(&path_var)
        .map(|dir| dir.join(program))
        .find(|candidate| candidate.is_file())
}
