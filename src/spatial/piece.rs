//! Four-sided pieces and their dihedral symmetry
//!
//! A piece lists its edge labels in the order east, north, west, south.
//! Rotation is a cyclic shift of that list; reflection transposes the piece
//! across its main diagonal and mirrors every label. Together they generate
//! the 8 orientations of a piece, the smallest of which is its canonical form.

use std::fmt;

use crate::spatial::edges::{Edge, EdgeSet};

/// Side of a square cell, in piece storage order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// Right side
    East = 0,
    /// Top side
    North = 1,
    /// Left side
    West = 2,
    /// Bottom side
    South = 3,
}

impl Side {
    /// All sides in storage order
    pub const ALL: [Self; 4] = [Self::East, Self::North, Self::West, Self::South];

    /// Side facing this one across a shared edge
    pub const fn facing(self) -> Self {
        match self {
            Self::East => Self::West,
            Self::North => Self::South,
            Self::West => Self::East,
            Self::South => Self::North,
        }
    }
}

/// Ordered edge labels of one piece
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Piece(pub [Edge; 4]);

impl Piece {
    /// Piece with four flat edges, used as the search sentinel
    pub const FLAT: Self = Self([0; 4]);

    /// Create a piece from its east, north, west and south labels
    pub const fn new(east: Edge, north: Edge, west: Edge, south: Edge) -> Self {
        Self([east, north, west, south])
    }

    /// Labels in storage order
    pub const fn edges(self) -> [Edge; 4] {
        self.0
    }

    /// Label on one side
    pub const fn edge(self, side: Side) -> Edge {
        let [east, north, west, south] = self.0;
        match side {
            Side::East => east,
            Side::North => north,
            Side::West => west,
            Side::South => south,
        }
    }

    /// Right label
    pub const fn east(self) -> Edge {
        self.edge(Side::East)
    }

    /// Top label
    pub const fn north(self) -> Edge {
        self.edge(Side::North)
    }

    /// Left label
    pub const fn west(self) -> Edge {
        self.edge(Side::West)
    }

    /// Bottom label
    pub const fn south(self) -> Edge {
        self.edge(Side::South)
    }

    /// Quarter turn clockwise: the north label moves to the east side
    #[must_use]
    pub const fn rotate(self) -> Self {
        let [east, north, west, south] = self.0;
        Self([north, west, south, east])
    }

    /// Reflect across the main diagonal, mirroring every label
    #[must_use]
    pub fn flip(self, edges: &EdgeSet) -> Self {
        let [east, north, west, south] = self.0;
        Self([
            edges.flip(south),
            edges.flip(west),
            edges.flip(north),
            edges.flip(east),
        ])
    }

    /// The 8 images under rotation and reflection, duplicates included
    ///
    /// Order: identity, 1-3 quarter turns, flip, flip followed by 1-3 quarter turns.
    pub fn orbit(self, edges: &EdgeSet) -> [Self; 8] {
        let mut images = [self; 8];
        let mut current = self;
        for image in images.iter_mut().take(4) {
            *image = current;
            current = current.rotate();
        }
        current = self.flip(edges);
        for image in images.iter_mut().skip(4) {
            *image = current;
            current = current.rotate();
        }
        images
    }

    /// Distinct orientations, sorted
    pub fn orientations(self, edges: &EdgeSet) -> Vec<Self> {
        let mut images = self.orbit(edges).to_vec();
        images.sort_unstable();
        images.dedup();
        images
    }

    /// Lexicographically smallest orientation
    #[must_use]
    pub fn canonical(self, edges: &EdgeSet) -> Self {
        self.orbit(edges).into_iter().min().unwrap_or(self)
    }

    /// Check whether two pieces are the same physical shape
    pub fn same_shape(self, other: Self, edges: &EdgeSet) -> bool {
        self.canonical(edges) == other.canonical(edges)
    }
}

impl From<[Edge; 4]> for Piece {
    fn from(edges: [Edge; 4]) -> Self {
        Self(edges)
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [east, north, west, south] = self.0;
        write!(f, "[{east}, {north}, {west}, {south}]")
    }
}
