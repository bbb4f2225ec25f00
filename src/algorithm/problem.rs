//! Compiled puzzle and resumable exhaustive tiling search
//!
//! Compilation turns a [`Definition`] into dense tables:
//! - every distinct orientation of every canonical piece, indexed `0..N`
//! - the canonical piece behind each orientation, indexed `0..C`
//! - pairwise compatibility of orientations placed side by side or stacked
//! - per-cell acceptance of each orientation under the fixed edges
//! - remaining multiplicity of each canonical piece
//!
//! The search fills cells in row-major order on an explicit placement stack.
//! The stack starts with one guard row of the flat sentinel (orientation 0)
//! so `depth - cols` always names the cell above. Each call to
//! [`Problem::find_next`] resumes where the previous solution left off.

use std::collections::BTreeMap;
use std::iter::FusedIterator;
use std::sync::Arc;

use ndarray::{Array2, Array3};

use crate::algorithm::bitset::BitMatrix;
use crate::algorithm::definition::Definition;
use crate::io::configuration::MAX_ORIENTATIONS;
use crate::io::convert::solution_to_array;
use crate::io::error::{Result, TilingError, try_filled_vec};
use crate::spatial::edges::{Edge, EdgeSet};
use crate::spatial::grid::Grid;
use crate::spatial::piece::{Piece, Side};

/// Position of the search state machine between calls
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchState {
    /// The orientation on top of the stack has not been tested yet
    Probing,
    /// The stack holds a complete tiling that must be retracted before advancing
    Solved,
    /// Every placement has been tried; no further solutions exist
    Exhausted,
}

/// Searchable instance compiled from a [`Definition`]
#[derive(Clone, Debug)]
pub struct Problem {
    rows: usize,
    cols: usize,
    orientations: Vec<Piece>,
    canonical_pieces: Vec<Piece>,
    canonical: Vec<u8>,
    supply: Vec<u32>,
    remaining: Vec<u32>,
    accept: BitMatrix,
    horizontal_match: BitMatrix,
    vertical_match: BitMatrix,
    stack: Vec<u8>,
    depth: usize,
    state: SearchState,
    edges: Arc<EdgeSet>,
}

impl Problem {
    /// Compile a definition into lookup tables and an empty search stack
    ///
    /// Solvability is not checked here: an unsolvable definition simply
    /// yields no solutions.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The board has no cells
    /// - The pieces expand to more than 255 orientations
    /// - A table cannot be allocated
    pub fn new(definition: &Definition) -> Result<Self> {
        let (rows, cols) = (definition.rows(), definition.cols());
        if rows == 0 || cols == 0 {
            return Err(TilingError::EmptyBoard { rows, cols });
        }
        let edges = Arc::clone(definition.edge_set());

        // The flat square is always registered, it doubles as the stack sentinel
        let mut shapes: BTreeMap<Piece, u32> = BTreeMap::new();
        shapes.insert(Piece::FLAT, 0);
        for (&piece, &count) in definition.pieces() {
            let entry = shapes.entry(piece.canonical(&edges)).or_insert(0);
            *entry = entry.saturating_add(count);
        }

        let mut oriented: BTreeMap<Piece, Piece> = BTreeMap::new();
        for &shape in shapes.keys() {
            for orientation in shape.orientations(&edges) {
                oriented.insert(orientation, shape);
            }
        }
        if oriented.len() > MAX_ORIENTATIONS {
            return Err(TilingError::TooManyOrientations {
                orientations: oriented.len(),
                limit: MAX_ORIENTATIONS,
            });
        }

        let shape_index: BTreeMap<Piece, u8> = shapes
            .keys()
            .enumerate()
            .map(|(index, &shape)| (shape, index as u8))
            .collect();
        let canonical_pieces: Vec<Piece> = shapes.keys().copied().collect();
        let supply: Vec<u32> = shapes.values().copied().collect();
        let orientations: Vec<Piece> = oriented.keys().copied().collect();
        let canonical: Vec<u8> = oriented
            .values()
            .map(|shape| shape_index.get(shape).copied().unwrap_or(0))
            .collect();

        let count = orientations.len();
        let mut horizontal_match = BitMatrix::try_new(count, count, false, "horizontal match")?;
        let mut vertical_match = BitMatrix::try_new(count, count, false, "vertical match")?;
        for (a, first) in orientations.iter().enumerate() {
            for (b, second) in orientations.iter().enumerate() {
                horizontal_match.set(a, b, edges.matches(first.east(), second.west()));
                vertical_match.set(a, b, edges.matches(first.south(), second.north()));
            }
        }

        let cells = rows.saturating_mul(cols);
        let mut accept = BitMatrix::try_new(cells, count, true, "acceptance")?;
        for row in 0..rows {
            for col in 0..cols {
                let constraints = definition.cell_constraints(row, col);
                for (index, orientation) in orientations.iter().enumerate() {
                    let allowed = Side::ALL
                        .iter()
                        .zip(constraints)
                        .all(|(&side, fixed)| fixed.is_none_or(|edge| orientation.edge(side) == edge));
                    if !allowed {
                        accept.set(row * cols + col, index, false);
                    }
                }
            }
        }

        let stack = try_filled_vec(
            rows.saturating_add(1).saturating_mul(cols),
            0u8,
            "placement stack",
        )?;
        let remaining = supply.clone();

        log::debug!(
            "compiled {rows}x{cols} problem: {} shapes, {count} orientations, {} accepted placements",
            canonical_pieces.len(),
            accept.count()
        );

        Ok(Self {
            rows,
            cols,
            orientations,
            canonical_pieces,
            canonical,
            supply,
            remaining,
            accept,
            horizontal_match,
            vertical_match,
            stack,
            depth: cols,
            state: SearchState::Probing,
            edges,
        })
    }

    /// Advance to the next complete tiling
    ///
    /// Returns `true` with the tiling readable through [`Problem::solution`],
    /// or `false` once the search space is exhausted. Exhaustion is
    /// permanent: later calls keep returning `false`.
    pub fn find_next(&mut self) -> bool {
        let last = self.stack.len().saturating_sub(1);
        let top = self.orientations.len().saturating_sub(1);

        loop {
            match self.state {
                SearchState::Exhausted => return false,
                SearchState::Probing if self.fits() => {
                    if self.depth == last {
                        self.state = SearchState::Solved;
                        return true;
                    }
                    self.take(self.slot(self.depth));
                    self.depth += 1;
                    self.set_slot(self.depth, 0);
                    continue;
                }
                SearchState::Probing | SearchState::Solved => {}
            }
            self.state = SearchState::Probing;

            // Retract every depth whose orientations are used up
            while self.slot(self.depth) as usize >= top {
                if self.depth == self.cols {
                    self.state = SearchState::Exhausted;
                    return false;
                }
                self.depth -= 1;
                self.give_back(self.slot(self.depth));
            }

            self.set_slot(self.depth, self.slot(self.depth) + 1);
        }
    }

    /// Iterate over the remaining solutions
    pub const fn solutions(&mut self) -> Solutions<'_> {
        Solutions { problem: self }
    }

    /// Count further solutions, stopping once `cutoff` have been found
    pub fn count_solutions(&mut self, cutoff: usize) -> usize {
        let mut count = 0;
        while count < cutoff && self.find_next() {
            count += 1;
        }
        count
    }

    /// Current tiling as cell pieces, if the last call found one
    pub fn solution(&self) -> Option<Array2<Piece>> {
        (self.state == SearchState::Solved).then(|| {
            Array2::from_shape_fn((self.rows, self.cols), |(row, col)| {
                let orientation = self.slot((row + 1) * self.cols + col);
                self.orientations
                    .get(orientation as usize)
                    .copied()
                    .unwrap_or_default()
            })
        })
    }

    /// Current tiling as a `(rows, cols, 4)` label array
    pub fn solution_array(&self) -> Option<Array3<Edge>> {
        self.solution().map(|pieces| solution_to_array(&pieces))
    }

    /// Current tiling as a board
    pub fn solution_grid(&self) -> Option<Grid> {
        self.solution()
            .map(|pieces| Grid::assemble(&pieces, Arc::clone(&self.edges)))
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

    /// Search state after the last call
    pub const fn state(&self) -> SearchState {
        self.state
    }

    /// Check whether the search has run out of solutions
    pub fn is_exhausted(&self) -> bool {
        self.state == SearchState::Exhausted
    }

    /// Every placeable orientation, indexed by orientation number
    pub fn orientations(&self) -> &[Piece] {
        &self.orientations
    }

    /// Canonical pieces, indexed by shape number
    pub fn canonical_pieces(&self) -> &[Piece] {
        &self.canonical_pieces
    }

    /// Shape number behind an orientation
    pub fn shape_of(&self, orientation: usize) -> Option<usize> {
        self.canonical.get(orientation).map(|&shape| shape as usize)
    }

    /// Supplied multiplicity of each shape
    pub fn supply(&self) -> &[u32] {
        &self.supply
    }

    /// Multiplicity of each shape not currently placed on the stack
    pub fn remaining(&self) -> &[u32] {
        &self.remaining
    }

    /// Check whether an orientation satisfies the fixed edges of a cell
    pub fn accepts(&self, row: usize, col: usize, orientation: usize) -> bool {
        col < self.cols && self.accept.get(row * self.cols + col, orientation)
    }

    /// Check whether orientation `right` may sit directly right of `left`
    pub fn horizontal_match(&self, left: usize, right: usize) -> bool {
        self.horizontal_match.get(left, right)
    }

    /// Check whether orientation `below` may sit directly under `above`
    pub fn vertical_match(&self, above: usize, below: usize) -> bool {
        self.vertical_match.get(above, below)
    }

    fn slot(&self, depth: usize) -> u8 {
        self.stack.get(depth).copied().unwrap_or(0)
    }

    fn set_slot(&mut self, depth: usize, orientation: u8) {
        if let Some(slot) = self.stack.get_mut(depth) {
            *slot = orientation;
        }
    }

    fn fits(&self) -> bool {
        let cell = self.depth - self.cols;
        let candidate = self.slot(self.depth) as usize;

        let available = self
            .shape_of(candidate)
            .and_then(|shape| self.remaining.get(shape))
            .is_some_and(|&count| count > 0);
        if !available || !self.accept.get(cell, candidate) {
            return false;
        }

        // First row and first column rely on the acceptance table alone
        let left_ok = cell % self.cols == 0
            || self
                .horizontal_match
                .get(self.slot(self.depth - 1) as usize, candidate);
        let above_ok = cell < self.cols
            || self
                .vertical_match
                .get(self.slot(self.depth - self.cols) as usize, candidate);
        left_ok && above_ok
    }

    fn take(&mut self, orientation: u8) {
        if let Some(count) = self
            .shape_of(orientation as usize)
            .and_then(|shape| self.remaining.get_mut(shape))
        {
            *count = count.saturating_sub(1);
        }
    }

    fn give_back(&mut self, orientation: u8) {
        if let Some(count) = self
            .shape_of(orientation as usize)
            .and_then(|shape| self.remaining.get_mut(shape))
        {
            *count += 1;
        }
    }
}

/// Iterator over the remaining solutions of a [`Problem`]
///
/// Yields each tiling as a `(rows, cols)` array of pieces.
pub struct Solutions<'a> {
    problem: &'a mut Problem,
}

impl Iterator for Solutions<'_> {
    type Item = Array2<Piece>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.problem.find_next() {
            self.problem.solution()
        } else {
            None
        }
    }
}

impl FusedIterator for Solutions<'_> {}
