/// Dense bit matrix backing the solver lookup tables
pub mod bitset;
/// Board shape, piece multiset and edge constraints of a puzzle
pub mod definition;
/// Random board generation, sequential and parallel
pub mod generator;
/// Compiled puzzle and resumable tiling search
pub mod problem;

pub use definition::Definition;
pub use generator::{GeneratedBoard, Generator, GeneratorConfig};
pub use problem::{Problem, SearchState};
