//! Generation and verification of edge-matching tiling puzzles
//!
//! A board is a grid of square pieces whose four edges carry labels; two
//! neighbouring pieces fit when their shared edge labels are opposite. The
//! crate canonicalises pieces and boards under the 8 symmetries of the
//! square, enumerates every tiling of a board from a finite piece multiset,
//! and samples random boards whose pieces admit only a few tilings.

#![forbid(unsafe_code)]

/// Puzzle definitions, the tiling search and the board generator
pub mod algorithm;
/// Input/output operations and error handling
pub mod io;
/// Edge labels, pieces and boards
pub mod spatial;

pub use io::error::{Result, TilingError};
