//! Declarative puzzle: board shape, piece multiset and edge constraints
//!
//! Constraint arrays mirror the [`Grid`](crate::spatial::grid::Grid) edge
//! arrays: `horizontal` is `(rows, cols + 1)`, `vertical` is `(rows + 1, cols)`,
//! and a fixed value is the label seen from the left/top cell. `None` leaves
//! an edge free. Perimeter edges start fixed to the flat label.

use std::collections::BTreeMap;
use std::sync::Arc;

use ndarray::{Array2, ArrayView2};

use crate::io::configuration::FLAT_EDGE;
use crate::io::error::{Result, TilingError, invalid_shape};
use crate::spatial::edges::{Edge, EdgeSet};
use crate::spatial::grid::Grid;
use crate::spatial::piece::Piece;

/// Puzzle specification consumed by [`Problem`](crate::algorithm::problem::Problem)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Definition {
    rows: usize,
    cols: usize,
    pieces: BTreeMap<Piece, u32>,
    horizontal: Array2<Option<Edge>>,
    vertical: Array2<Option<Edge>>,
    edges: Arc<EdgeSet>,
}

impl Definition {
    /// Empty puzzle with a flat perimeter and free internal edges
    pub fn new(rows: usize, cols: usize, edges: Arc<EdgeSet>) -> Self {
        let horizontal = Array2::from_shape_fn((rows, cols + 1), |(_, col)| {
            (col == 0 || col == cols).then_some(FLAT_EDGE)
        });
        let vertical = Array2::from_shape_fn((rows + 1, cols), |(row, _)| {
            (row == 0 || row == rows).then_some(FLAT_EDGE)
        });

        Self {
            rows,
            cols,
            pieces: BTreeMap::new(),
            horizontal,
            vertical,
            edges,
        }
    }

    /// Replace every constraint from raw signed arrays
    ///
    /// Negative values leave an edge free; other values fix it.
    ///
    /// # Errors
    ///
    /// Returns an error if an array has the wrong shape or a value does not
    /// fit an edge label
    pub fn set_constraints(
        &mut self,
        horizontal: ArrayView2<'_, i16>,
        vertical: ArrayView2<'_, i16>,
    ) -> Result<()> {
        let expected_horizontal = (self.rows, self.cols + 1);
        if horizontal.dim() != expected_horizontal {
            return Err(invalid_shape(
                "horizontal constraint",
                &expected_horizontal,
                &horizontal.dim(),
            ));
        }
        let expected_vertical = (self.rows + 1, self.cols);
        if vertical.dim() != expected_vertical {
            return Err(invalid_shape(
                "vertical constraint",
                &expected_vertical,
                &vertical.dim(),
            ));
        }

        let horizontal = convert_constraints(horizontal)?;
        let vertical = convert_constraints(vertical)?;
        self.horizontal = horizontal;
        self.vertical = vertical;
        Ok(())
    }

    /// Fix every edge, perimeter included, to the labels of a board
    ///
    /// # Errors
    ///
    /// Returns an error if the board shape differs from this definition
    pub fn constrain_all_from_grid(&mut self, grid: &Grid) -> Result<()> {
        let expected = (self.rows, self.cols);
        let found = (grid.rows(), grid.cols());
        if found != expected {
            return Err(invalid_shape("constraining grid", &expected, &found));
        }
        self.horizontal = grid.horizontal().mapv(Some);
        self.vertical = grid.vertical().mapv(Some);
        Ok(())
    }

    /// Number of rows
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Edge label domain of the puzzle
    pub const fn edge_set(&self) -> &Arc<EdgeSet> {
        &self.edges
    }

    /// Add `count` copies of a piece to the multiset
    ///
    /// Pieces are keyed by their exact labels; orientations of one shape
    /// are merged when the puzzle is compiled.
    pub fn add_piece(&mut self, piece: Piece, count: u32) {
        let entry = self.pieces.entry(piece).or_insert(0);
        *entry = entry.saturating_add(count);
    }

    /// Piece multiset
    pub const fn pieces(&self) -> &BTreeMap<Piece, u32> {
        &self.pieces
    }

    /// Total number of pieces supplied
    pub fn piece_count(&self) -> u64 {
        self.pieces.values().map(|&count| u64::from(count)).sum()
    }

    /// Constraint on the left/right boundary stored at `(row, col)`
    pub fn horizontal_constraint(&self, row: usize, col: usize) -> Option<Edge> {
        self.horizontal.get([row, col]).copied().flatten()
    }

    /// Constraint on the top/bottom boundary stored at `(row, col)`
    pub fn vertical_constraint(&self, row: usize, col: usize) -> Option<Edge> {
        self.vertical.get([row, col]).copied().flatten()
    }

    /// Fix or free the left/right boundary stored at `(row, col)`
    ///
    /// # Errors
    ///
    /// Returns an error if the position is outside `(rows, cols + 1)`
    pub fn set_horizontal_constraint(
        &mut self,
        row: usize,
        col: usize,
        value: Option<Edge>,
    ) -> Result<()> {
        let (rows, cols) = self.horizontal.dim();
        let slot = self
            .horizontal
            .get_mut([row, col])
            .ok_or(TilingError::IndexOutOfBounds {
                what: "horizontal constraint",
                row,
                col,
                rows,
                cols,
            })?;
        *slot = value;
        Ok(())
    }

    /// Fix or free the top/bottom boundary stored at `(row, col)`
    ///
    /// # Errors
    ///
    /// Returns an error if the position is outside `(rows + 1, cols)`
    pub fn set_vertical_constraint(
        &mut self,
        row: usize,
        col: usize,
        value: Option<Edge>,
    ) -> Result<()> {
        let (rows, cols) = self.vertical.dim();
        let slot = self
            .vertical
            .get_mut([row, col])
            .ok_or(TilingError::IndexOutOfBounds {
                what: "vertical constraint",
                row,
                col,
                rows,
                cols,
            })?;
        *slot = value;
        Ok(())
    }

    /// Left/right boundary constraints, shape `(rows, cols + 1)`
    pub const fn horizontal_constraints(&self) -> &Array2<Option<Edge>> {
        &self.horizontal
    }

    /// Top/bottom boundary constraints, shape `(rows + 1, cols)`
    pub const fn vertical_constraints(&self) -> &Array2<Option<Edge>> {
        &self.vertical
    }

    /// Mutable left/right boundary constraints
    pub const fn horizontal_constraints_mut(&mut self) -> &mut Array2<Option<Edge>> {
        &mut self.horizontal
    }

    /// Mutable top/bottom boundary constraints
    pub const fn vertical_constraints_mut(&mut self) -> &mut Array2<Option<Edge>> {
        &mut self.vertical
    }

    /// Constraints on the four sides of a cell, as seen from inside the cell
    ///
    /// Left and top values are stored from the neighbour's side and are
    /// turned around with `opposite`.
    pub fn cell_constraints(&self, row: usize, col: usize) -> [Option<Edge>; 4] {
        let opposite = |edge: Edge| self.edges.opposite(edge);
        [
            self.horizontal_constraint(row, col + 1),
            self.vertical_constraint(row, col).map(opposite),
            self.horizontal_constraint(row, col).map(opposite),
            self.vertical_constraint(row + 1, col),
        ]
    }
}

fn convert_constraints(raw: ArrayView2<'_, i16>) -> Result<Array2<Option<Edge>>> {
    let mut converted = Array2::from_elem(raw.dim(), None);
    for ((row, col), &value) in raw.indexed_iter() {
        if value < 0 {
            continue;
        }
        let edge = Edge::try_from(value).map_err(|source| TilingError::InvalidParameter {
            parameter: "constraint",
            value: value.to_string(),
            reason: format!("at ({row}, {col}): {source}"),
        })?;
        if let Some(slot) = converted.get_mut([row, col]) {
            *slot = Some(edge);
        }
    }
    Ok(converted)
}
