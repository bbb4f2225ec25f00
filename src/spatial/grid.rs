//! Dense boards stored as shared edge arrays
//!
//! A board of `rows x cols` cells keeps two edge arrays instead of a per-cell
//! piece array, so each physical edge is stored exactly once:
//! - `horizontal` has shape `(rows, cols + 1)` and holds the left/right
//!   boundary of every cell
//! - `vertical` has shape `(rows + 1, cols)` and holds the top/bottom
//!   boundary of every cell
//!
//! A stored value is the edge as presented by the cell on its left (or
//! above). The cell on the other side sees the `opposite` label, which is
//! how cell pieces are derived on demand.

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::sync::Arc;

use ndarray::Array2;

use crate::algorithm::definition::Definition;
use crate::io::error::{Result, TilingError, invalid_shape};
use crate::spatial::edges::{Edge, EdgeSet};
use crate::spatial::piece::{Piece, Side};

/// Board described by its shared edges
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    horizontal: Array2<Edge>,
    vertical: Array2<Edge>,
    edges: Arc<EdgeSet>,
}

impl Grid {
    /// Create a board whose edges are all flat
    pub fn new(rows: usize, cols: usize, edges: Arc<EdgeSet>) -> Self {
        Self {
            horizontal: Array2::zeros((rows, cols + 1)),
            vertical: Array2::zeros((rows + 1, cols)),
            edges,
        }
    }

    /// Create a board from explicit edge arrays
    ///
    /// # Errors
    ///
    /// Returns an error if `horizontal` is not `(rows, cols + 1)` and
    /// `vertical` is not `(rows + 1, cols)` for the same `rows` and `cols`
    pub fn from_edges(
        horizontal: Array2<Edge>,
        vertical: Array2<Edge>,
        edges: Arc<EdgeSet>,
    ) -> Result<Self> {
        let (rows, h_cols) = horizontal.dim();
        if h_cols == 0 {
            return Err(invalid_shape(
                "horizontal edge",
                &"(rows, cols + 1)",
                &horizontal.dim(),
            ));
        }
        let expected_vertical = (rows + 1, h_cols - 1);
        if vertical.dim() != expected_vertical {
            return Err(invalid_shape(
                "vertical edge",
                &expected_vertical,
                &vertical.dim(),
            ));
        }

        Ok(Self {
            horizontal,
            vertical,
            edges,
        })
    }

    /// Assemble a board from per-cell pieces
    ///
    /// # Errors
    ///
    /// Returns an error if two neighbouring pieces do not interlock
    pub fn from_pieces(pieces: &Array2<Piece>, edges: Arc<EdgeSet>) -> Result<Self> {
        for ((row, col), piece) in pieces.indexed_iter() {
            let neighbours = [
                (Side::West, "west", col.checked_sub(1).map(|left| [row, left])),
                (Side::North, "north", row.checked_sub(1).map(|above| [above, col])),
            ];
            for (side, name, index) in neighbours {
                let Some(neighbour) = index.and_then(|index| pieces.get(index)) else {
                    continue;
                };
                let facing = neighbour.edge(side.facing());
                if !edges.matches(facing, piece.edge(side)) {
                    return Err(TilingError::Incompatible {
                        row,
                        col,
                        reason: format!("{name} edge {} against {facing}", piece.edge(side)),
                    });
                }
            }
        }

        Ok(Self::assemble(pieces, edges))
    }

    /// Assemble a board from pieces already known to interlock
    pub(crate) fn assemble(pieces: &Array2<Piece>, edges: Arc<EdgeSet>) -> Self {
        let (rows, cols) = pieces.dim();
        let mut grid = Self::new(rows, cols, edges);

        for ((row, col), piece) in pieces.indexed_iter() {
            if col == 0 {
                if let Some(edge) = grid.horizontal.get_mut([row, 0]) {
                    *edge = grid.edges.opposite(piece.west());
                }
            }
            if row == 0 {
                if let Some(edge) = grid.vertical.get_mut([0, col]) {
                    *edge = grid.edges.opposite(piece.north());
                }
            }
            if let Some(edge) = grid.horizontal.get_mut([row, col + 1]) {
                *edge = piece.east();
            }
            if let Some(edge) = grid.vertical.get_mut([row + 1, col]) {
                *edge = piece.south();
            }
        }

        grid
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.horizontal.nrows()
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.vertical.ncols()
    }

    /// Edge label domain of this board
    pub const fn edge_set(&self) -> &Arc<EdgeSet> {
        &self.edges
    }

    /// Left/right cell boundaries, shape `(rows, cols + 1)`
    pub const fn horizontal(&self) -> &Array2<Edge> {
        &self.horizontal
    }

    /// Top/bottom cell boundaries, shape `(rows + 1, cols)`
    pub const fn vertical(&self) -> &Array2<Edge> {
        &self.vertical
    }

    /// Mutable left/right cell boundaries
    pub const fn horizontal_mut(&mut self) -> &mut Array2<Edge> {
        &mut self.horizontal
    }

    /// Mutable top/bottom cell boundaries
    pub const fn vertical_mut(&mut self) -> &mut Array2<Edge> {
        &mut self.vertical
    }

    /// Redraw every internal edge from `sampler`
    ///
    /// Perimeter edges keep their current labels.
    pub fn randomize<S>(&mut self, mut sampler: S)
    where
        S: FnMut() -> Edge,
    {
        let (rows, cols) = (self.rows(), self.cols());
        for row in 0..rows {
            for col in 1..cols {
                if let Some(edge) = self.horizontal.get_mut([row, col]) {
                    *edge = sampler();
                }
            }
        }
        for row in 1..rows {
            for col in 0..cols {
                if let Some(edge) = self.vertical.get_mut([row, col]) {
                    *edge = sampler();
                }
            }
        }
    }

    /// Piece occupying a cell, or `None` outside the board
    pub fn at(&self, row: usize, col: usize) -> Option<Piece> {
        if row >= self.rows() || col >= self.cols() {
            return None;
        }
        let east = *self.horizontal.get([row, col + 1])?;
        let north = *self.vertical.get([row, col])?;
        let west = *self.horizontal.get([row, col])?;
        let south = *self.vertical.get([row + 1, col])?;

        Some(Piece::new(
            east,
            self.edges.opposite(north),
            self.edges.opposite(west),
            south,
        ))
    }

    /// All cell pieces as a `(rows, cols)` array
    pub fn pieces(&self) -> Array2<Piece> {
        Array2::from_shape_fn((self.rows(), self.cols()), |(row, col)| {
            self.at(row, col).unwrap_or_default()
        })
    }

    /// Cell pieces in row-major order
    pub fn cells(&self) -> Vec<Piece> {
        self.pieces().into_iter().collect()
    }

    /// Quarter turn clockwise; a `rows x cols` board becomes `cols x rows`
    ///
    /// Cell `(y, x)` moves to `(x, rows - 1 - y)` and its piece is rotated.
    #[must_use]
    pub fn rotate(&self) -> Self {
        let (rows, cols) = (self.rows(), self.cols());
        let mut result = Self::new(cols, rows, Arc::clone(&self.edges));

        for ((row, col), &edge) in self.horizontal.indexed_iter() {
            if let Some(target) = result.vertical.get_mut([col, rows - 1 - row]) {
                *target = edge;
            }
        }
        // Vertical edges change sides: the stored value is now seen from the right
        for ((row, col), &edge) in self.vertical.indexed_iter() {
            if let Some(target) = result.horizontal.get_mut([col, rows - row]) {
                *target = self.edges.opposite(edge);
            }
        }

        result
    }

    /// Transpose across the main diagonal, mirroring every label
    ///
    /// Cell `(y, x)` moves to `(x, y)` and its piece is flipped.
    #[must_use]
    pub fn flip(&self) -> Self {
        let (rows, cols) = (self.rows(), self.cols());
        let mut result = Self::new(cols, rows, Arc::clone(&self.edges));

        for ((row, col), &edge) in self.horizontal.indexed_iter() {
            if let Some(target) = result.vertical.get_mut([col, row]) {
                *target = self.edges.flip(edge);
            }
        }
        for ((row, col), &edge) in self.vertical.indexed_iter() {
            if let Some(target) = result.horizontal.get_mut([col, row]) {
                *target = self.edges.flip(edge);
            }
        }

        result
    }

    /// The 8 images of the board under rotation and reflection
    ///
    /// Same order as [`Piece::orbit`].
    pub fn orbit(&self) -> Vec<Self> {
        let mut images = Vec::with_capacity(8);
        let mut current = self.clone();
        for _ in 0..4 {
            let next = current.rotate();
            images.push(current);
            current = next;
        }
        current = self.flip();
        for _ in 0..4 {
            let next = current.rotate();
            images.push(current);
            current = next;
        }
        images
    }

    /// Smallest image of the board, comparing cell pieces in row-major order
    ///
    /// Boards that are the same up to rotation and reflection share a
    /// canonical form. Ties between images of different shapes go to the
    /// board with fewer rows.
    #[must_use]
    pub fn canonical(&self) -> Self {
        self.orbit()
            .into_iter()
            .map(|image| ((image.cells(), image.rows()), image))
            .min_by(|a, b| a.0.cmp(&b.0))
            .map_or_else(|| self.clone(), |(_, image)| image)
    }

    /// Check whether two cells hold the same piece shape
    pub fn has_duplicate(&self) -> bool {
        let mut seen = HashSet::new();
        self.pieces()
            .iter()
            .any(|piece| !seen.insert(piece.canonical(&self.edges)))
    }

    /// Count of each canonical piece on the board
    pub fn piece_census(&self) -> BTreeMap<Piece, usize> {
        let mut census = BTreeMap::new();
        for piece in &self.pieces() {
            *census.entry(piece.canonical(&self.edges)).or_insert(0) += 1;
        }
        census
    }

    /// Puzzle asking for every tiling that uses exactly this board's pieces
    ///
    /// Perimeter constraints follow this board's perimeter (flat unless the
    /// caller changed it); internal edges are left free.
    pub fn to_definition(&self) -> Definition {
        let mut definition = Definition::new(self.rows(), self.cols(), Arc::clone(&self.edges));
        for piece in &self.pieces() {
            definition.add_piece(*piece, 1);
        }

        let (rows, cols) = (self.rows(), self.cols());
        for ((row, col), constraint) in definition.horizontal_constraints_mut().indexed_iter_mut() {
            if col == 0 || col == cols {
                *constraint = self.horizontal.get([row, col]).copied();
            }
        }
        for ((row, col), constraint) in definition.vertical_constraints_mut().indexed_iter_mut() {
            if row == 0 || row == rows {
                *constraint = self.vertical.get([row, col]).copied();
            }
        }

        definition
    }

    /// Puzzle fixing every edge to this board's labels
    ///
    /// Counts the tilings that realise exactly this edge layout, which
    /// differ from the board only by swapping identical pieces.
    pub fn to_constrained_definition(&self) -> Definition {
        let mut definition = self.to_definition();
        *definition.horizontal_constraints_mut() = self.horizontal.mapv(Some);
        *definition.vertical_constraints_mut() = self.vertical.mapv(Some);
        definition
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (row_index, row) in self.pieces().rows().into_iter().enumerate() {
            if row_index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "[")?;
            for (col_index, piece) in row.iter().enumerate() {
                if col_index > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{piece}")?;
            }
            write!(f, "]")?;
        }
        write!(f, "]")
    }
}
