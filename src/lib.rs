//! Batch reformatting of graph benchmark instances into CSV.
//!
//! Instance collections ship two plain-text formats, told apart by filename
//! suffix: `.gr` files carry a graph as an edge list, `.td` files carry a
//! tree decomposition as bag declarations plus tree edges. Both are rewritten
//! into a CSV form where `a,b` rows are edges and `id,,payload` rows (empty
//! middle column) declare a vertex or a bag. Each input `X` gets a sibling
//! output `X.csv`.
//!
//! Inputs are assumed well-formed and trusted: beyond splitting lines into
//! fields there is no validation, and the first malformed line aborts the
//! whole run.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

/// Conversion of `.td` tree-decomposition files.
pub mod decomposition;

/// Conversion of `.gr` graph files.
pub mod graph;

mod error;

pub use error::ReformatError;

/// Number of CSV rows written by a single conversion, split by record kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowCounts {
    /// Edge rows (`a,b`).
    pub edges: usize,
    /// Declaration rows (`id,,payload`).
    pub declarations: usize,
}

/// Scans `dir` (non-recursively) and reformats every entry whose name ends in
/// `.gr` or `.td`, writing a sibling `.csv` file for each. Other entries are
/// skipped silently.
///
/// Entries are handled in directory-listing order; the first failing
/// conversion aborts the remaining scan and may leave a truncated `.csv`
/// behind. Directories are not filtered out: a directory literally named
/// `*.gr` or `*.td` is dispatched like a file and fails on open.
pub fn reformat_directory(dir: &Path) -> Result<(), ReformatError> {
    let entries = fs::read_dir(dir).map_err(|e| ReformatError::Read(dir.to_path_buf(), e))?;

    for entry in entries {
        let entry = entry.map_err(|e| ReformatError::Read(dir.to_path_buf(), e))?;
        let path = entry.path();
        let name = entry.file_name();
        let name = name.to_string_lossy();

        if name.ends_with(".gr") {
            let counts = graph::reformat_graph_file(&path)?;
            info!(
                "{}: wrote {} edge rows, {} vertex rows",
                path.display(),
                counts.edges,
                counts.declarations
            );
        } else if name.ends_with(".td") {
            let counts = decomposition::reformat_td_file(&path)?;
            info!(
                "{}: wrote {} edge rows, {} bag rows",
                path.display(),
                counts.edges,
                counts.declarations
            );
        } else {
            debug!("{}: skipped", path.display());
        }
    }

    Ok(())
}

/// Appends `.csv` to the full input name, so `ex001.gr` maps to `ex001.gr.csv`.
pub(crate) fn csv_sibling(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".csv");
    PathBuf::from(name)
}

/// Splits a data line on single spaces and returns its first two fields.
/// Lines with fewer than two fields (including blank lines) are malformed.
pub(crate) fn split_edge<'a>(
    line: &'a str,
    origin: &Path,
    line_number: usize,
) -> Result<(&'a str, &'a str), ReformatError> {
    let mut fields = line.split(' ');
    match (fields.next(), fields.next()) {
        (Some(a), Some(b)) => Ok((a, b)),
        _ => Err(ReformatError::MalformedLine {
            path: origin.to_path_buf(),
            line: line_number,
        }),
    }
}
