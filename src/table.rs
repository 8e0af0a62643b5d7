//! Two-row coordinate table I/O (requires the `std` feature).
//!
//! The interactive front-end persists its point set as a plain numeric text
//! table: line 0 holds the x coordinates, line 1 the y coordinates,
//! whitespace-separated. Blank lines and `#` comment lines are skipped on
//! read.
//!
//! ```text
//! # two_clusters.txt
//! 0.1 0.2 0.15 0.9 0.8
//! 0.2 0.1 0.15 0.8 0.9
//! ```
//!
//! This module is a convenience for front-ends and tools; the engine itself
//! never reads or writes anything. Values round-trip exactly (the writer
//! emits the shortest representation that parses back to the same `f64`).

use std::io::{BufRead, Write};
use std::path::Path;
use std::string::String;
use std::vec::Vec;

use crate::point::Point;

/// Errors from reading or writing the two-row table format.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// Underlying I/O failure.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// A token could not be parsed as a number.
    #[error("line {line}: '{token}' is not a number")]
    Parse {
        /// 1-based line number in the input.
        line: usize,
        /// The offending token.
        token: String,
    },

    /// The input does not contain exactly two data rows.
    #[error("expected exactly 2 coordinate rows, found {found}")]
    RowCount {
        /// Number of data rows found.
        found: usize,
    },

    /// The x and y rows have different lengths.
    #[error("coordinate rows differ in length: {xs} x values, {ys} y values")]
    ColumnMismatch {
        /// Number of x values.
        xs: usize,
        /// Number of y values.
        ys: usize,
    },
}

/// Parse points from the two-row table format.
///
/// Requires exactly two data rows of equal length. An input with no data
/// rows at all (an empty point set saved by the front-end) yields an empty
/// vector.
pub fn read_points<R: BufRead>(reader: R) -> Result<Vec<Point>, TableError> {
    let mut rows: Vec<Vec<f64>> = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let mut row = Vec::new();
        for token in trimmed.split_whitespace() {
            let value: f64 = token.parse().map_err(|_| TableError::Parse {
                line: idx + 1,
                token: token.into(),
            })?;
            row.push(value);
        }
        rows.push(row);
    }

    // No data rows at all is an empty point set (what the writer emits for
    // one, and what a fresh front-end saves before any clicks).
    if rows.is_empty() {
        return Ok(Vec::new());
    }
    if rows.len() != 2 {
        return Err(TableError::RowCount { found: rows.len() });
    }
    let (xs, ys) = (&rows[0], &rows[1]);
    if xs.len() != ys.len() {
        return Err(TableError::ColumnMismatch { xs: xs.len(), ys: ys.len() });
    }

    Ok(xs.iter().zip(ys).map(|(&x, &y)| Point::new(x, y)).collect())
}

/// Write points in the two-row table format.
pub fn write_points<W: Write>(mut writer: W, points: &[Point]) -> Result<(), TableError> {
    for coordinate in [|p: &Point| p.x, |p: &Point| p.y] {
        let mut first = true;
        for p in points {
            if !first {
                write!(writer, " ")?;
            }
            write!(writer, "{}", coordinate(p))?;
            first = false;
        }
        writeln!(writer)?;
    }
    Ok(())
}

/// Read points from a file at `path`.
pub fn load_points<P: AsRef<Path>>(path: P) -> Result<Vec<Point>, TableError> {
    let file = std::fs::File::open(path)?;
    read_points(std::io::BufReader::new(file))
}

/// Write points to a file at `path`, replacing any existing content.
pub fn save_points<P: AsRef<Path>>(path: P, points: &[Point]) -> Result<(), TableError> {
    let file = std::fs::File::create(path)?;
    write_points(std::io::BufWriter::new(file), points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_two_row_table() {
        let input = "1.0 2.5 -3\n0.5 1.5 2.0\n";
        let points = read_points(Cursor::new(input)).unwrap();
        assert_eq!(
            points,
            vec![Point::new(1.0, 0.5), Point::new(2.5, 1.5), Point::new(-3.0, 2.0)]
        );
    }

    #[test]
    fn test_read_skips_comments_and_blank_lines() {
        let input = "# saved point set\n\n1 2\n\n# y row follows\n3 4\n";
        let points = read_points(Cursor::new(input)).unwrap();
        assert_eq!(points, vec![Point::new(1.0, 3.0), Point::new(2.0, 4.0)]);
    }

    #[test]
    fn test_read_rejects_wrong_row_count() {
        match read_points(Cursor::new("1 2 3\n")) {
            Err(TableError::RowCount { found: 1 }) => {}
            other => panic!("expected RowCount, got {:?}", other),
        }
        match read_points(Cursor::new("1\n2\n3\n")) {
            Err(TableError::RowCount { found: 3 }) => {}
            other => panic!("expected RowCount, got {:?}", other),
        }
    }

    #[test]
    fn test_read_rejects_length_mismatch() {
        match read_points(Cursor::new("1 2 3\n4 5\n")) {
            Err(TableError::ColumnMismatch { xs: 3, ys: 2 }) => {}
            other => panic!("expected ColumnMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_read_reports_bad_token_with_line() {
        match read_points(Cursor::new("1 oops\n2 3\n")) {
            Err(TableError::Parse { line: 1, token }) => assert_eq!(token, "oops"),
            other => panic!("expected Parse, got {:?}", other),
        }
    }

    #[test]
    fn test_write_then_read_round_trips_exactly() {
        let points = vec![
            Point::new(0.1, 0.2),
            Point::new(-1.5, 3.25),
            Point::new(1.0 / 3.0, 2.0 / 7.0),
        ];
        let mut buffer = Vec::new();
        write_points(&mut buffer, &points).unwrap();
        let restored = read_points(Cursor::new(buffer)).unwrap();
        assert_eq!(restored, points);
    }

    #[test]
    fn test_empty_point_set_round_trips() {
        let mut buffer = Vec::new();
        write_points(&mut buffer, &[]).unwrap();
        let restored = read_points(Cursor::new(buffer)).unwrap();
        assert!(restored.is_empty());
    }
}
