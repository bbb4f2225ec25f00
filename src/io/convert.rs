//! Array contracts for exchanging pieces, constraints and solutions
//!
//! Pieces travel as `(count, 4)` label arrays, constraints as signed arrays
//! where a negative value leaves an edge free, and solutions as
//! `(rows, cols, 4)` label arrays in the same edge order as the input pieces.

use std::collections::BTreeSet;
use std::sync::Arc;

use ndarray::{Array2, Array3, ArrayView2};

use crate::algorithm::definition::Definition;
use crate::io::configuration::MAX_CANONICAL_PIECES;
use crate::io::error::{Result, TilingError, invalid_shape};
use crate::spatial::edges::{Edge, EdgeSet};
use crate::spatial::piece::Piece;

/// Read pieces from a `(count, 4)` label array
///
/// # Errors
///
/// Returns an error if the inner dimension is not 4
pub fn pieces_from_array(pieces: ArrayView2<'_, Edge>) -> Result<Vec<Piece>> {
    if pieces.ncols() != 4 {
        return Err(invalid_shape("piece", &("_", 4), &pieces.dim()));
    }
    Ok(pieces
        .rows()
        .into_iter()
        .map(|row| {
            let mut edges = [0; 4];
            for (slot, &edge) in edges.iter_mut().zip(row.iter()) {
                *slot = edge;
            }
            Piece(edges)
        })
        .collect())
}

/// Build a definition from raw piece and constraint arrays
///
/// The board is `rows x cols` with `rows = horizontal.nrows()` and
/// `cols = vertical.ncols()`; each row of `pieces` contributes one copy.
///
/// # Errors
///
/// Returns an error if:
/// - The piece array is not `(count, 4)`
/// - The constraint arrays disagree on the board shape or describe no cells
/// - More than 255 distinct canonical pieces are supplied
/// - A constraint value does not fit an edge label
pub fn definition_from_arrays(
    pieces: ArrayView2<'_, Edge>,
    horizontal: ArrayView2<'_, i16>,
    vertical: ArrayView2<'_, i16>,
    edges: Arc<EdgeSet>,
) -> Result<Definition> {
    let pieces = pieces_from_array(pieces)?;

    let rows = horizontal.nrows();
    let cols = vertical.ncols();
    if rows == 0 || cols == 0 {
        return Err(TilingError::EmptyBoard { rows, cols });
    }

    let shapes: BTreeSet<Piece> = pieces.iter().map(|piece| piece.canonical(&edges)).collect();
    if shapes.len() > MAX_CANONICAL_PIECES {
        return Err(TilingError::TooManyPieces {
            pieces: shapes.len(),
            limit: MAX_CANONICAL_PIECES,
        });
    }

    let mut definition = Definition::new(rows, cols, edges);
    definition.set_constraints(horizontal, vertical)?;
    for piece in pieces {
        definition.add_piece(piece, 1);
    }
    Ok(definition)
}

/// Flatten a tiling into a `(rows, cols, 4)` label array
pub fn solution_to_array(solution: &Array2<Piece>) -> Array3<Edge> {
    let (rows, cols) = solution.dim();
    Array3::from_shape_fn((rows, cols, 4), |(row, col, side)| {
        solution
            .get([row, col])
            .and_then(|piece| piece.0.get(side).copied())
            .unwrap_or_default()
    })
}
