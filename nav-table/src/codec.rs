//! Parses and emits the navigation table embedded in an index topic's body.
//!
//! The table lives below a marker line (`# Navigation` by default); the
//! `preamble` above it is human-authored and preserved verbatim across a
//! parse/emit round trip.

use crate::error::Error;
use crate::types::{Navlink, TableRow, TablePath};

const DEFAULT_MARKER: &str = "# Navigation";
const HEADER: &str = "| Level | Path | Navlink |";
const SEPARATOR: &str = "| -- | -- | -- |";

/// Parses an index topic body into its preamble and navigation rows, using
/// the default `# Navigation` marker.
pub fn parse(body: &str) -> Result<(String, Vec<TableRow>), Error> {
    parse_with_marker(body, DEFAULT_MARKER)
}

/// As [`parse`], but with a caller-supplied marker literal.
pub fn parse_with_marker(body: &str, marker: &str) -> Result<(String, Vec<TableRow>), Error> {
    let split_at = match body.find(marker) {
        Some(index) => index,
        None => return Ok((body.to_string(), Vec::new())),
    };

    let preamble = body[..split_at].to_string();
    let rest = &body[split_at + marker.len()..];

    let mut rows = Vec::new();
    for line in rest.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(row) = parse_row(line)? {
            rows.push(row);
        }
    }

    Ok((preamble, rows))
}

/// Parses a single `| level | path | [title](link) |` line.
///
/// Returns `Ok(None)` for lines that don't structurally match the row
/// syntax (header/separator lines) -- tolerated rather than rejected. A
/// line that *does* match the cell structure but whose level column isn't
/// a positive integer is a malformed table error.
fn parse_row(line: &str) -> Result<Option<TableRow>, Error> {
    if !line.starts_with('|') || !line.ends_with('|') {
        return Ok(None);
    }

    let cells: Vec<&str> = line.split('|').map(str::trim).collect();
    // Splitting "| a | b | c |" on '|' yields ["", "a", "b", "c", ""].
    if cells.len() != 5 || !cells[0].is_empty() || !cells[4].is_empty() {
        return Ok(None);
    }

    let (level_cell, path_cell, navlink_cell) = (cells[1], cells[2], cells[3]);

    let navlink = match parse_navlink_cell(navlink_cell) {
        Some(navlink) => navlink,
        None => return Ok(None),
    };

    let level: u32 = match level_cell.parse() {
        Ok(level) if level > 0 => level,
        Ok(level) => {
            return Err(Error::MalformedRow {
                line: line.to_string(),
                reason: format!("level must be a positive integer, got {level}"),
            })
        }
        Err(_) => {
            return Err(Error::MalformedRow {
                line: line.to_string(),
                reason: format!("level column {level_cell:?} is not an integer"),
            })
        }
    };

    Ok(Some(TableRow::new(
        level,
        TablePath::new(path_cell),
        navlink,
    )))
}

/// Parses a `[title](link)` cell. Returns `None` if the cell isn't in that
/// bracket/paren form at all (the tolerance case); an empty link is a valid
/// group row.
fn parse_navlink_cell(cell: &str) -> Option<Navlink> {
    let rest = cell.strip_prefix('[')?;
    let close_bracket = rest.find(']')?;
    let title = &rest[..close_bracket];

    let rest = &rest[close_bracket + 1..];
    let rest = rest.strip_prefix('(')?;
    let rest = rest.strip_suffix(')')?;

    Some(Navlink {
        title: title.to_string(),
        link: if rest.is_empty() {
            None
        } else {
            Some(rest.to_string())
        },
    })
}

/// Emits an index topic body from a preamble and ordered rows, using the
/// default `# Navigation` marker. This is the exact inverse of [`parse`] for
/// any `(preamble, rows)` pair it produced.
pub fn emit(preamble: &str, rows: &[TableRow]) -> String {
    emit_with_marker(preamble, rows, DEFAULT_MARKER)
}

/// As [`emit`], but with a caller-supplied marker literal.
pub fn emit_with_marker(preamble: &str, rows: &[TableRow], marker: &str) -> String {
    let mut body = String::with_capacity(preamble.len() + rows.len() * 64);
    body.push_str(preamble);
    body.push_str(marker);
    body.push('\n');
    body.push_str(HEADER);
    body.push('\n');
    body.push_str(SEPARATOR);
    body.push('\n');
    for row in rows {
        body.push_str(&emit_row(row));
        body.push('\n');
    }
    body
}

fn emit_row(row: &TableRow) -> String {
    format!(
        "| {} | {} | [{}]({}) |",
        row.level,
        row.path,
        row.navlink.title,
        row.navlink.link.as_deref().unwrap_or("")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(level: u32, path: &str, title: &str) -> TableRow {
        TableRow::new(level, TablePath::new(path), Navlink::group(title))
    }

    fn doc(level: u32, path: &str, title: &str, link: &str) -> TableRow {
        TableRow::new(level, TablePath::new(path), Navlink::document(title, link))
    }

    #[test]
    fn parse_preserves_preamble_and_rows() {
        let body = "hello there\n\n# Navigation\n\
            | Level | Path | Navlink |\n\
            | -- | -- | -- |\n\
            | 1 | group-1 | [Group 1]() |\n\
            | 2 | group-1-doc-1 | [Doc One](/t/doc-slug/42) |\n";

        let (preamble, rows) = parse(body).unwrap();

        assert_eq!(preamble, "hello there\n\n");
        assert_eq!(
            rows,
            vec![
                group(1, "group-1", "Group 1"),
                doc(2, "group-1-doc-1", "Doc One", "/t/doc-slug/42"),
            ]
        );
    }

    #[test]
    fn parse_ignores_missing_table() {
        let (preamble, rows) = parse("just a preamble, no table yet\n").unwrap();
        assert_eq!(preamble, "just a preamble, no table yet\n");
        assert!(rows.is_empty());
    }

    #[test]
    fn parse_rejects_non_positive_level() {
        let body = "# Navigation\n| 0 | foo | [Foo]() |\n";
        let err = parse(body).unwrap_err();
        assert!(matches!(err, Error::MalformedRow { .. }));
    }

    #[test]
    fn round_trip_emit_then_parse() {
        let preamble = "some preamble\n".to_string();
        let rows = vec![
            group(1, "group-1", "Group 1"),
            doc(2, "group-1-doc-1", "Doc One", "/t/doc-slug/42"),
        ];

        let body = emit(&preamble, &rows);
        let (parsed_preamble, parsed_rows) = parse(&body).unwrap();

        assert_eq!(parsed_preamble, preamble);
        assert_eq!(parsed_rows, rows);
    }

    #[test]
    fn round_trip_parse_then_emit_is_stable() {
        let body = "preamble\n# Navigation\n\
            | Level | Path | Navlink |\n\
            | -- | -- | -- |\n\
            | 1 | doc | [Doc](/t/doc/1) |\n";

        let (preamble, rows) = parse(body).unwrap();
        let re_emitted = emit(&preamble, &rows);

        assert_eq!(re_emitted, body);
    }
}
