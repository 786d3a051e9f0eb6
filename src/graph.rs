use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::{split_edge, ReformatError, RowCounts};

/// Reformats the `.gr` file at `path` into a sibling file named
/// `<path>.csv`, creating or overwriting it.
///
/// See [reformat_graph](reformat_graph) for the format handled.
pub fn reformat_graph_file(path: &Path) -> Result<RowCounts, ReformatError> {
    let input = File::open(path).map_err(|e| ReformatError::Read(path.to_path_buf(), e))?;
    let output = File::create(crate::csv_sibling(path))
        .map_err(|e| ReformatError::Write(path.to_path_buf(), e))?;

    reformat_graph(BufReader::new(input), BufWriter::new(output), path)
}

/// Converts a graph edge-list stream into its CSV representation.
///
/// The first line is a header and is skipped unread. Every following line is
/// split on single spaces; the first two fields form an undirected edge and
/// are emitted immediately as `u,v`, preserving input order. Once the stream
/// is exhausted, one `<vertex>,,1` row is written per distinct endpoint seen,
/// in unspecified set order. The trailing `1` is a fixed default vertex
/// weight expected by the consuming toolchain, not a computed value.
///
/// `origin` names the input in errors; it is never opened here.
pub fn reformat_graph<R, W>(input: R, mut output: W, origin: &Path) -> Result<RowCounts, ReformatError>
where
    R: BufRead,
    W: Write,
{
    let read_err = |e| ReformatError::Read(origin.to_path_buf(), e);
    let write_err = |e| ReformatError::Write(origin.to_path_buf(), e);

    let mut vertices = HashSet::new();
    let mut edges = 0usize;

    for (index, line) in input.lines().enumerate() {
        let line = line.map_err(read_err)?;
        if index == 0 {
            // header line, content unused
            continue;
        }

        let (u, v) = split_edge(&line, origin, index + 1)?;
        vertices.insert(u.to_owned());
        vertices.insert(v.to_owned());

        writeln!(output, "{},{}", u, v).map_err(write_err)?;
        edges += 1;
    }

    let declarations = vertices.len();
    for vertex in &vertices {
        writeln!(output, "{},,1", vertex).map_err(write_err)?;
    }
    output.flush().map_err(write_err)?;

    Ok(RowCounts {
        edges,
        declarations,
    })
}
