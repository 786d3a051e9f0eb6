use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::{split_edge, ReformatError, RowCounts};

/// Reformats the `.td` file at `path` into a sibling file named
/// `<path>.csv`, creating or overwriting it.
///
/// See [reformat_decomposition](reformat_decomposition) for the format handled.
pub fn reformat_td_file(path: &Path) -> Result<RowCounts, ReformatError> {
    let input = File::open(path).map_err(|e| ReformatError::Read(path.to_path_buf(), e))?;
    let output = File::create(crate::csv_sibling(path))
        .map_err(|e| ReformatError::Write(path.to_path_buf(), e))?;

    reformat_decomposition(BufReader::new(input), BufWriter::new(output), path)
}

/// Converts a tree-decomposition stream into its CSV representation.
///
/// The first line is a header and is skipped unread. A line starting with the
/// prefix `b ` declares a bag: the field after the prefix is the bag id, the
/// rest is the bag's content. A later declaration for the same id replaces
/// the earlier one. Every other line is a tree edge between two bag ids;
/// edges keep their input order and duplicates are preserved.
///
/// Output is all edges as `a,b` rows, then one `<bagId>,,<v1;v2;...>` row per
/// bag in unspecified map order. A bag declared without content emits an
/// empty content column. Content vertices must not contain `;`.
///
/// `origin` names the input in errors; it is never opened here.
pub fn reformat_decomposition<R, W>(
    input: R,
    mut output: W,
    origin: &Path,
) -> Result<RowCounts, ReformatError>
where
    R: BufRead,
    W: Write,
{
    let read_err = |e| ReformatError::Read(origin.to_path_buf(), e);
    let write_err = |e| ReformatError::Write(origin.to_path_buf(), e);

    let mut bags: HashMap<String, Vec<String>> = HashMap::new();
    let mut edges: Vec<(String, String)> = Vec::new();

    for (index, line) in input.lines().enumerate() {
        let line = line.map_err(read_err)?;
        if index == 0 {
            // header line, content unused
            continue;
        }

        if let Some(rest) = line.strip_prefix("b ") {
            let mut fields = rest.split(' ');
            // split always yields at least one field, "b " alone gives an
            // empty id with no content
            let id = fields.next().unwrap_or_default().to_owned();
            let content = fields.map(|v| v.to_owned()).collect();
            bags.insert(id, content);
        } else {
            let (a, b) = split_edge(&line, origin, index + 1)?;
            edges.push((a.to_owned(), b.to_owned()));
        }
    }

    for (a, b) in &edges {
        writeln!(output, "{},{}", a, b).map_err(write_err)?;
    }

    let declarations = bags.len();
    for (id, content) in &bags {
        writeln!(output, "{},,{}", id, content.join(";")).map_err(write_err)?;
    }
    output.flush().map_err(write_err)?;

    Ok(RowCounts {
        edges: edges.len(),
        declarations,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::fs;
    use std::path::Path;

    use super::*;

    fn run(input: &str) -> (Vec<String>, RowCounts) {
        let mut out = Vec::new();
        let counts =
            reformat_decomposition(input.as_bytes(), &mut out, Path::new("test.td")).unwrap();
        let lines = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| l.to_owned())
            .collect();
        (lines, counts)
    }

    #[test]
    fn edges_in_order_then_bag_rows() {
        let (lines, counts) = run("s td 2 2 3\nb 1 1 2\nb 2 2 3\n1 2\n");

        assert_eq!(counts, RowCounts { edges: 1, declarations: 2 });
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "1,2");

        let trailer = lines[1..].iter().cloned().collect::<HashSet<_>>();
        let expected = ["1,,1;2", "2,,2;3"]
            .iter()
            .map(|s| s.to_string())
            .collect::<HashSet<_>>();
        assert_eq!(trailer, expected);
    }

    #[test]
    fn bag_without_content_emits_empty_column() {
        let (lines, counts) = run("header\nb 7\n");

        assert_eq!(counts, RowCounts { edges: 0, declarations: 1 });
        assert_eq!(lines, vec!["7,,".to_owned()]);
    }

    #[test]
    fn later_bag_declaration_replaces_earlier() {
        let (lines, counts) = run("header\nb 1 4 5\nb 1 9\n");

        assert_eq!(counts.declarations, 1);
        assert_eq!(lines, vec!["1,,9".to_owned()]);
    }

    #[test]
    fn duplicate_edges_are_preserved() {
        let (lines, counts) = run("header\n1 2\n1 2\n");

        assert_eq!(counts, RowCounts { edges: 2, declarations: 0 });
        assert_eq!(lines, vec!["1,2".to_owned(), "1,2".to_owned()]);
    }

    #[test]
    fn bare_b_line_is_an_edge_and_fatal() {
        // "b" without the trailing space is not a bag declaration
        let mut out = Vec::new();
        let res = reformat_decomposition("header\nb\n".as_bytes(), &mut out, Path::new("x.td"));

        assert!(matches!(res, Err(ReformatError::MalformedLine { line: 2, .. })));
    }

    #[test]
    fn single_field_edge_line_is_fatal() {
        let mut out = Vec::new();
        let err = reformat_decomposition(
            "header\nb 1 1 2\n3\n".as_bytes(),
            &mut out,
            Path::new("bad.td"),
        )
        .unwrap_err();

        match err {
            ReformatError::MalformedLine { path, line } => {
                assert_eq!(path, Path::new("bad.td"));
                assert_eq!(line, 3);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn file_wrapper_appends_csv_suffix() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("ex001.td");
        fs::write(&input, "s td 1 2 2\nb 1 1 2\n").unwrap();

        let counts = reformat_td_file(&input).unwrap();
        assert_eq!(counts, RowCounts { edges: 0, declarations: 1 });

        let written = fs::read_to_string(dir.path().join("ex001.td.csv")).unwrap();
        assert_eq!(written, "1,,1;2\n");
    }
}
