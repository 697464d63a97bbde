//! Builds standalone SAI replayer binaries from agent replayer logs.

/// Contains the replayer driver and its command line.
pub mod driver;
/// Contains the error types for the application.
pub mod error;
/// Contains the compiler invocation.
pub mod linker;
/// Contains the logger.
pub mod logger;
pub mod transform;
