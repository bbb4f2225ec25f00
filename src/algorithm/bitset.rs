use bitvec::prelude::*;
use std::fmt;

use crate::io::error::{Result, try_filled_vec};

/// Fixed-size row-major bit matrix for solver lookup tables
///
/// Backs the pairwise compatibility tables (`orientations x orientations`)
/// and the acceptance table (`cells x orientations`). Out-of-range reads
/// report `false`, so a missing entry never admits a placement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitMatrix {
    bits: BitVec,
    rows: usize,
    cols: usize,
}

impl BitMatrix {
    /// Allocate a matrix with every bit set to `value`
    ///
    /// # Errors
    ///
    /// Returns an allocation error if the backing storage cannot be reserved
    /// or its size overflows
    pub fn try_new(rows: usize, cols: usize, value: bool, table: &'static str) -> Result<Self> {
        let len = rows.saturating_mul(cols);
        let words = len.div_ceil(usize::BITS as usize);
        let fill = if value { usize::MAX } else { 0 };

        let mut bits = BitVec::from_vec(try_filled_vec(words, fill, table)?);
        bits.truncate(len);

        Ok(Self { bits, rows, cols })
    }

    /// Number of rows
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Test one bit
    pub fn get(&self, row: usize, col: usize) -> bool {
        if row >= self.rows || col >= self.cols {
            return false;
        }
        self.bits.get(row * self.cols + col).as_deref() == Some(&true)
    }

    /// Set one bit, ignoring positions outside the matrix
    pub fn set(&mut self, row: usize, col: usize, value: bool) {
        if row < self.rows && col < self.cols {
            self.bits.set(row * self.cols + col, value);
        }
    }

    /// Count set bits in one row
    pub fn count_row(&self, row: usize) -> usize {
        let start = row.saturating_mul(self.cols);
        self.bits
            .get(start..start.saturating_add(self.cols))
            .map_or(0, |slice| slice.count_ones())
    }

    /// Count all set bits
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Column indices of the set bits in one row
    pub fn row_ones(&self, row: usize) -> Vec<usize> {
        let start = row.saturating_mul(self.cols);
        self.bits
            .get(start..start.saturating_add(self.cols))
            .map_or_else(Vec::new, |slice| slice.iter_ones().collect())
    }
}

impl fmt::Display for BitMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BitMatrix({}x{}, {} set)",
            self.rows,
            self.cols,
            self.count()
        )
    }
}
