use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reformatting instance files.
///
/// Every variant is fatal: a failure inside one conversion aborts the rest of
/// the directory scan, and the output file of the failing conversion may be
/// left behind in a truncated state.
#[derive(Error, Debug)]
pub enum ReformatError {
    /// The input file (or the directory being scanned) could not be read.
    #[error("failed to read {0}: {1}")]
    Read(PathBuf, #[source] io::Error),

    /// The sibling `.csv` output could not be created or written.
    #[error("failed to write CSV output for {0}: {1}")]
    Write(PathBuf, #[source] io::Error),

    /// A data line carried fewer than the two space-separated fields an edge
    /// needs. Line numbers are 1-based and count the skipped header.
    #[error("{path}:{line}: expected at least 2 space-separated fields")]
    MalformedLine { path: PathBuf, line: usize },
}
