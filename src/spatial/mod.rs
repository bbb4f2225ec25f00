//! Spatial data structures
//!
//! This module contains:
//! - Edge label domains with their opposite and mirror relations
//! - Pieces and their rotations and reflections
//! - Boards stored as shared edge arrays

/// Edge label domains
pub mod edges;
/// Board storage, transformation and canonical forms
pub mod grid;
/// Pieces and their symmetry orbit
pub mod piece;

pub use edges::{Edge, EdgeSet, EdgeSetBuilder};
pub use grid::Grid;
pub use piece::{Piece, Side};
