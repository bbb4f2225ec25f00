/// Plain-text puzzle files
pub mod board_file;
/// Command-line interface
pub mod cli;
/// Limits and default parameters
pub mod configuration;
/// Array contracts for pieces, constraints and solutions
pub mod convert;
/// Error taxonomy
pub mod error;
/// PNG rendering of boards
pub mod image;
/// Terminal progress for generation workers
pub mod progress;
