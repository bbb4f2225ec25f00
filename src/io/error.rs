//! Error types for puzzle construction, solving and generation

use std::collections::TryReserveError;
use std::fmt;
use std::path::PathBuf;

/// Main error type for all tiling operations
#[derive(Debug)]
pub enum TilingError {
    /// Input array or board has the wrong dimensions
    InvalidShape {
        /// Which input was malformed
        what: &'static str,
        /// Shape that was required
        expected: String,
        /// Shape that was supplied
        found: String,
    },

    /// Board with no cells
    EmptyBoard {
        /// Requested number of rows
        rows: usize,
        /// Requested number of columns
        cols: usize,
    },

    /// Orientation indices no longer fit the 8-bit search stack
    TooManyOrientations {
        /// Distinct orientations the definition expands to
        orientations: usize,
        /// Largest supported orientation count
        limit: usize,
    },

    /// Piece input carries more distinct shapes than can be indexed
    TooManyPieces {
        /// Distinct canonical pieces supplied
        pieces: usize,
        /// Largest supported canonical piece count
        limit: usize,
    },

    /// A solver table could not be allocated
    Allocation {
        /// Name of the table being built
        table: &'static str,
        /// Underlying allocation failure
        source: TryReserveError,
    },

    /// Edge label tables violate the symmetry rules
    InvalidEdgeSet {
        /// Description of the violated rule
        reason: String,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Row/column outside of an edge or constraint array
    IndexOutOfBounds {
        /// Array being accessed
        what: &'static str,
        /// Requested row
        row: usize,
        /// Requested column
        col: usize,
        /// Rows in the array
        rows: usize,
        /// Columns in the array
        cols: usize,
    },

    /// Neighbouring pieces do not present matching edges
    Incompatible {
        /// Row of the offending cell
        row: usize,
        /// Column of the offending cell
        col: usize,
        /// Which neighbour disagreed
        reason: String,
    },

    /// Board file could not be parsed
    Parse {
        /// One-based line number
        line: usize,
        /// Description of the problem
        reason: String,
    },

    /// Generation loop reached its attempt cap without accepting a board
    GenerationExhausted {
        /// Boards sampled before giving up
        attempts: usize,
    },

    /// Failed to save a rendered board to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for TilingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidShape {
                what,
                expected,
                found,
            } => {
                write!(f, "Invalid {what} shape: expected {expected}, found {found}")
            }
            Self::EmptyBoard { rows, cols } => {
                write!(f, "Board {rows}x{cols} has no cells")
            }
            Self::TooManyOrientations {
                orientations,
                limit,
            } => {
                write!(
                    f,
                    "Pieces expand to {orientations} orientations (limit: {limit})"
                )
            }
            Self::TooManyPieces { pieces, limit } => {
                write!(f, "{pieces} distinct pieces supplied (limit: {limit})")
            }
            Self::Allocation { table, source } => {
                write!(f, "Failed to allocate {table} table: {source}")
            }
            Self::InvalidEdgeSet { reason } => {
                write!(f, "Invalid edge set: {reason}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::IndexOutOfBounds {
                what,
                row,
                col,
                rows,
                cols,
            } => {
                write!(
                    f,
                    "Position ({row}, {col}) is outside the {what} array ({rows}x{cols})"
                )
            }
            Self::Incompatible { row, col, reason } => {
                write!(f, "Piece at ({row}, {col}) does not fit: {reason}")
            }
            Self::Parse { line, reason } => {
                write!(f, "Parse error on line {line}: {reason}")
            }
            Self::GenerationExhausted { attempts } => {
                write!(f, "No acceptable board found after {attempts} attempts")
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for TilingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Allocation { source, .. } => Some(source),
            Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for tiling results
pub type Result<T> = std::result::Result<T, TilingError>;

impl From<std::io::Error> for TilingError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> TilingError {
    TilingError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invalid shape error from two printable shapes
pub fn invalid_shape(
    what: &'static str,
    expected: &impl fmt::Debug,
    found: &impl fmt::Debug,
) -> TilingError {
    TilingError::InvalidShape {
        what,
        expected: format!("{expected:?}"),
        found: format!("{found:?}"),
    }
}

/// Allocate a vector of `len` copies of `value`, reporting failure instead of aborting
///
/// # Errors
///
/// Returns [`TilingError::Allocation`] if the memory cannot be reserved
pub fn try_filled_vec<T: Clone>(len: usize, value: T, table: &'static str) -> Result<Vec<T>> {
    let mut storage = Vec::new();
    storage
        .try_reserve_exact(len)
        .map_err(|source| TilingError::Allocation { table, source })?;
    storage.resize(len, value);
    Ok(storage)
}
