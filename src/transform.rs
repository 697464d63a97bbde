//! Rewrites a SAI replayer log into a standalone C++ translation unit.
//!
//! The replayer log is generated to be compiled inside the agent tree. Three
//! kinds of lines tie it to that tree:
//! - `#include` directives for internal headers
//! - the `void run_trace()` entry point
//! - the `namespace facebook::fboss` wrapper
//!
//! Everything else is a recorded SAI call (or the braces around it) and is
//! copied byte for byte.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use log::{debug, info};
use thiserror::Error;

use crate::error::ReplayerError;

/// Prefix of the include lines that are collapsed into [`HEADER_BLOCK`].
pub const INCLUDE_PREFIX: &[u8] = b"#include";

/// Prefix of the trace replay function declaration.
pub const ENTRY_POINT_PREFIX: &[u8] = b"void run_trace()";

/// Lines containing this token are dropped.
pub const NAMESPACE_TOKEN: &[u8] = b"namespace facebook::fboss";

/// Replacement for the trace replay function declaration.
pub const MAIN_OPENING: &str = "int main() {\n";

/// Headers needed to compile the replayed calls outside the agent.
pub const HEADER_BLOCK: &str = "#include <stdio.h>
#include <stdlib.h>
#include <string.h>
#include <unordered_map>

extern \"C\" {
#include <sai.h>
}
";

/// Counters collected during one transform run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransformSummary {
    pub lines_read: usize,
    pub lines_emitted: usize,
    pub includes_collapsed: usize,
    pub entry_points_rewritten: usize,
    pub namespace_lines_dropped: usize,
}

/// What happens to a single log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineAction {
    EmitHeader,
    DropInclude,
    RewriteEntryPoint,
    DropNamespace,
    PassThrough,
}

fn classify(line: &[u8], header_written: bool) -> LineAction {
    if line.starts_with(INCLUDE_PREFIX) {
        if header_written {
            LineAction::DropInclude
        } else {
            LineAction::EmitHeader
        }
    } else if line.starts_with(ENTRY_POINT_PREFIX) {
        LineAction::RewriteEntryPoint
    } else if contains(line, NAMESPACE_TOKEN) {
        LineAction::DropNamespace
    } else {
        LineAction::PassThrough
    }
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|window| window == needle)
}

/// Transforms the log at `log_path` and writes the result to `cpp_path`,
/// replacing any existing file.
pub fn transform(log_path: &Path, cpp_path: &Path) -> Result<TransformSummary, ReplayerError> {
    debug!("Transforming {} into {}", log_path.display(), cpp_path.display());

    let log_file = File::open(log_path).map_err(|source| ReplayerError::ReadLog {
        path: log_path.to_path_buf(),
        source,
    })?;
    let cpp_file = File::create(cpp_path).map_err(|source| ReplayerError::WriteSource {
        path: cpp_path.to_path_buf(),
        source,
    })?;

    let mut reader = BufReader::new(log_file);
    let mut writer = BufWriter::new(cpp_file);
    let summary = transform_stream(&mut reader, &mut writer).map_err(|err| match err {
        StreamError::Read(source) => ReplayerError::ReadLog {
            path: log_path.to_path_buf(),
            source,
        },
        StreamError::Write(source) => ReplayerError::WriteSource {
            path: cpp_path.to_path_buf(),
            source,
        },
    })?;

    info!(
        "Wrote {} ({} of {} lines kept, {} includes collapsed, {} entry points rewritten, {} namespace lines dropped)",
        cpp_path.display(),
        summary.lines_emitted,
        summary.lines_read,
        summary.includes_collapsed,
        summary.entry_points_rewritten,
        summary.namespace_lines_dropped
    );
    Ok(summary)
}

/// I/O failure from [`transform_stream`], split by which side failed.
#[derive(Debug, Error)]
pub enum StreamError {
    #[error("read failed: {0}")]
    Read(#[source] io::Error),
    #[error("write failed: {0}")]
    Write(#[source] io::Error),
}

/// Streams log lines from `reader` to `writer`, rewriting the structural
/// markers and copying every other line unchanged.
///
/// `writer` is flushed before returning.
pub fn transform_stream<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
) -> Result<TransformSummary, StreamError> {
    let mut summary = TransformSummary::default();
    let mut header_written = false;
    let mut line = Vec::new();

    loop {
        line.clear();
        let n = reader.read_until(b'\n', &mut line).map_err(StreamError::Read)?;
        if n == 0 {
            break;
        }
        summary.lines_read += 1;

        match classify(&line, header_written) {
            LineAction::EmitHeader => {
                writer.write_all(HEADER_BLOCK.as_bytes()).map_err(StreamError::Write)?;
                header_written = true;
                summary.includes_collapsed += 1;
            }
            LineAction::DropInclude => summary.includes_collapsed += 1,
            LineAction::RewriteEntryPoint => {
                writer.write_all(MAIN_OPENING.as_bytes()).map_err(StreamError::Write)?;
                summary.entry_points_rewritten += 1;
                summary.lines_emitted += 1;
            }
            LineAction::DropNamespace => summary.namespace_lines_dropped += 1,
            LineAction::PassThrough => {
                writer.write_all(&line).map_err(StreamError::Write)?;
                summary.lines_emitted += 1;
            }
        }
    }

    writer.flush().map_err(StreamError::Write)?;
    Ok(summary)
}
