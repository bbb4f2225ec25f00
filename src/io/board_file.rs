//! Plain-text puzzle files
//!
//! ```text
//! # comment
//! 3 3              rows cols
//! 1 0 0 2          east north west south, one copy
//! 3 4 1 2 2        ... with an explicit count
//! h 1 0 5          fix the horizontal edge at (1, 0) to label 5
//! v 0 2 -          free the vertical edge at (0, 2)
//! ```
//!
//! Constraint lines are only needed where they differ from the default of
//! a flat perimeter and free internal edges.

use std::fmt::Write as _;
use std::path::Path;
use std::sync::Arc;

use crate::algorithm::definition::Definition;
use crate::io::configuration::{FLAT_EDGE, MAX_GRID_DIMENSION};
use crate::io::error::{Result, TilingError};
use crate::spatial::edges::{Edge, EdgeSet};
use crate::spatial::piece::Piece;

/// Parse a puzzle from its text form
///
/// # Errors
///
/// Returns [`TilingError::Parse`] with the offending line number if the
/// header is missing, a line is malformed, a value is out of range, or a
/// constraint lies outside the board
pub fn parse_board(text: &str, edges: Arc<EdgeSet>) -> Result<Definition> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, strip_comment(line)))
        .filter(|(_, line)| !line.is_empty());

    let (header_line, header) = lines.next().ok_or(TilingError::Parse {
        line: 0,
        reason: "missing 'rows cols' header".to_string(),
    })?;
    let dims = parse_numbers::<usize>(header_line, header)?;
    let [rows, cols] = dims.as_slice() else {
        return Err(parse_error(header_line, "header must be 'rows cols'"));
    };
    let (rows, cols) = (*rows, *cols);
    if rows == 0 || cols == 0 || rows > MAX_GRID_DIMENSION || cols > MAX_GRID_DIMENSION {
        return Err(parse_error(
            header_line,
            &format!("board {rows}x{cols} must have dimensions in 1..={MAX_GRID_DIMENSION}"),
        ));
    }

    let mut definition = Definition::new(rows, cols, edges);
    for (number, line) in lines {
        match line.split_whitespace().next() {
            Some("h") => {
                let (row, col, value) = parse_constraint(number, line)?;
                definition
                    .set_horizontal_constraint(row, col, value)
                    .map_err(|error| parse_error(number, &error))?;
            }
            Some("v") => {
                let (row, col, value) = parse_constraint(number, line)?;
                definition
                    .set_vertical_constraint(row, col, value)
                    .map_err(|error| parse_error(number, &error))?;
            }
            _ => {
                let values = parse_numbers::<u32>(number, line)?;
                let (labels, count) = match values.as_slice() {
                    [e, n, w, s] => ([*e, *n, *w, *s], 1),
                    [e, n, w, s, count] => ([*e, *n, *w, *s], *count),
                    _ => {
                        return Err(parse_error(number, "piece line must be 'e n w s [count]'"));
                    }
                };
                let mut piece = [FLAT_EDGE; 4];
                for (slot, label) in piece.iter_mut().zip(labels) {
                    *slot = Edge::try_from(label)
                        .map_err(|error| parse_error(number, &format!("label {label}: {error}")))?;
                }
                definition.add_piece(Piece(piece), count);
            }
        }
    }

    log::debug!(
        "parsed {rows}x{cols} board with {} pieces",
        definition.piece_count()
    );
    Ok(definition)
}

/// Read and parse a puzzle file
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not parse
pub fn read_board(path: &Path, edges: Arc<EdgeSet>) -> Result<Definition> {
    let text = std::fs::read_to_string(path).map_err(|source| TilingError::FileSystem {
        path: path.to_path_buf(),
        operation: "read board",
        source,
    })?;
    parse_board(&text, edges)
}

/// Render a puzzle in its text form
///
/// Constraint lines are written only where they differ from the default.
pub fn format_board(definition: &Definition) -> String {
    let (rows, cols) = (definition.rows(), definition.cols());
    let mut text = format!("{rows} {cols}\n");

    for (piece, count) in definition.pieces() {
        let [east, north, west, south] = piece.edges();
        if *count == 1 {
            let _ = writeln!(text, "{east} {north} {west} {south}");
        } else {
            let _ = writeln!(text, "{east} {north} {west} {south} {count}");
        }
    }

    for ((row, col), constraint) in definition.horizontal_constraints().indexed_iter() {
        let default = (col == 0 || col == cols).then_some(FLAT_EDGE);
        if *constraint != default {
            let _ = writeln!(text, "h {row} {col} {}", format_constraint(*constraint));
        }
    }
    for ((row, col), constraint) in definition.vertical_constraints().indexed_iter() {
        let default = (row == 0 || row == rows).then_some(FLAT_EDGE);
        if *constraint != default {
            let _ = writeln!(text, "v {row} {col} {}", format_constraint(*constraint));
        }
    }

    text
}

/// Write a puzzle file, creating parent directories as needed
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written
pub fn write_board(definition: &Definition, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| TilingError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source,
        })?;
    }
    std::fs::write(path, format_board(definition)).map_err(|source| TilingError::FileSystem {
        path: path.to_path_buf(),
        operation: "write board",
        source,
    })
}

fn strip_comment(line: &str) -> &str {
    line.split_once('#').map_or(line, |(content, _)| content).trim()
}

fn parse_numbers<T: std::str::FromStr>(line: usize, text: &str) -> Result<Vec<T>>
where
    T::Err: std::fmt::Display,
{
    text.split_whitespace()
        .map(|token| {
            token
                .parse::<T>()
                .map_err(|error| parse_error(line, &format!("'{token}': {error}")))
        })
        .collect()
}

fn parse_constraint(line: usize, text: &str) -> Result<(usize, usize, Option<Edge>)> {
    let tokens: Vec<&str> = text.split_whitespace().skip(1).collect();
    let [row, col, value] = tokens.as_slice() else {
        return Err(parse_error(line, "constraint line must be 'h|v row col label'"));
    };
    let row = row
        .parse::<usize>()
        .map_err(|error| parse_error(line, &format!("row '{row}': {error}")))?;
    let col = col
        .parse::<usize>()
        .map_err(|error| parse_error(line, &format!("column '{col}': {error}")))?;
    let value = if value.starts_with('-') {
        None
    } else {
        Some(
            value
                .parse::<Edge>()
                .map_err(|error| parse_error(line, &format!("label '{value}': {error}")))?,
        )
    };
    Ok((row, col, value))
}

fn format_constraint(constraint: Option<Edge>) -> String {
    constraint.map_or_else(|| "-".to_string(), |edge| edge.to_string())
}

fn parse_error(line: usize, reason: impl ToString) -> TilingError {
    TilingError::Parse {
        line,
        reason: reason.to_string(),
    }
}
