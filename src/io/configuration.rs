//! Solver limits and runtime configuration defaults

// Edge label conventions
/// Label of a flat (border) edge
pub const FLAT_EDGE: u8 = 0;
/// Raw constraint value meaning "no constraint on this edge"
pub const UNCONSTRAINED: i16 = -1;

// Orientation indices are stored in a byte-wide stack
/// Maximum number of distinct orientations a problem may expand to
pub const MAX_ORIENTATIONS: usize = 255;
/// Maximum number of distinct canonical pieces accepted from array input
pub const MAX_CANONICAL_PIECES: usize = 255;

// A board is unique up to symmetry when it has at most as many solutions
// as the dihedral group has elements
/// Solutions counted before a candidate board is abandoned
pub const SOLUTION_CUTOFF: usize = 9;
/// Largest solution count still accepted as a unique board
pub const MAX_SYMMETRIC_SOLUTIONS: usize = 8;

// Default values for configurable parameters
/// Seed used when none is given
pub const DEFAULT_SEED: u64 = 1;
/// Default board height
pub const DEFAULT_ROWS: usize = 4;
/// Default board width
pub const DEFAULT_COLS: usize = 4;
/// Number of male/female label pairs in the default edge set
pub const DEFAULT_PAIRS: u8 = 2;
/// Boards sampled by one generator before giving up
pub const DEFAULT_MAX_ATTEMPTS: usize = 1_000_000;
/// Worker threads used by parallel generation
pub const DEFAULT_WORKERS: usize = 4;
/// Boards requested from the generator
pub const DEFAULT_BOARDS: usize = 1;

// Board size limit
/// Maximum allowed board dimension
pub const MAX_GRID_DIMENSION: usize = 64;
/// Largest generated board whose asymmetric pieces all fit the orientation index
pub const MAX_GENERATED_CELLS: usize = (MAX_ORIENTATIONS - 1) / 8;

// Rendering settings
/// Side length of one rendered cell in pixels
pub const CELL_PIXELS: u32 = 48;
/// Thickness of the coloured edge strip in pixels
pub const EDGE_PIXELS: u32 = 8;

// Progress bar display settings
/// Workers shown with an individual progress line
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;
/// Attempts between two progress refreshes
pub const PROGRESS_REFRESH_ATTEMPTS: usize = 256;
