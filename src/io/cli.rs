//! Command-line interface for generating and solving edge-matching puzzles

use crate::algorithm::generator::{GeneratedBoard, GeneratorConfig, generate_parallel};
use crate::algorithm::problem::Problem;
use crate::io::board_file::{read_board, write_board};
use crate::io::configuration::{
    DEFAULT_BOARDS, DEFAULT_COLS, DEFAULT_MAX_ATTEMPTS, DEFAULT_PAIRS, DEFAULT_ROWS, DEFAULT_SEED,
    DEFAULT_WORKERS, MAX_SYMMETRIC_SOLUTIONS, SOLUTION_CUTOFF,
};
use crate::io::error::Result;
use crate::io::image::export_grid_as_png;
use crate::io::progress::ProgressManager;
use crate::spatial::edges::{Edge, EdgeSet};
use crate::spatial::piece::Piece;
use clap::{Args, Parser, Subcommand};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "edgematch")]
#[command(
    author,
    version,
    about = "Generate and verify edge-matching tiling puzzles"
)]
/// Command-line arguments for the puzzle tool
pub struct Cli {
    /// Operation to run
    #[command(subcommand)]
    pub command: Command,

    /// Suppress progress output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available operations
#[derive(Subcommand)]
pub enum Command {
    /// Generate boards whose pieces tile them in at most 8 ways
    Generate(GenerateArgs),
    /// Enumerate the tilings of a puzzle file
    Solve(SolveArgs),
}

/// Edge label domain selection shared by all operations
#[derive(Args, Clone, Copy)]
pub struct EdgeArgs {
    /// Number of male/female label pairs
    #[arg(short, long, default_value_t = DEFAULT_PAIRS)]
    pub pairs: u8,

    /// Use the 32-label jigsaw catalogue instead of plain pairs
    #[arg(long)]
    pub standard: bool,
}

impl EdgeArgs {
    /// Build the selected label domain
    ///
    /// # Errors
    ///
    /// Returns an error if the number of pairs does not fit the label range
    pub fn edge_set(self) -> Result<Arc<EdgeSet>> {
        let edges = if self.standard {
            EdgeSet::standard()
        } else {
            EdgeSet::pairs(self.pairs)?
        };
        Ok(Arc::new(edges))
    }
}

/// Arguments of the `generate` operation
#[derive(Args)]
// Independent on/off switches
#[allow(clippy::struct_excessive_bools)]
pub struct GenerateArgs {
    /// Board height (rows x cols may not exceed 31 cells)
    #[arg(short = 'H', long, default_value_t = DEFAULT_ROWS)]
    pub rows: usize,

    /// Board width
    #[arg(short = 'W', long, default_value_t = DEFAULT_COLS)]
    pub cols: usize,

    /// Label domain
    #[command(flatten)]
    pub edges: EdgeArgs,

    /// Labels drawn for internal edges, comma separated (default: every non-flat label)
    #[arg(short, long, value_delimiter = ',')]
    pub labels: Vec<Edge>,

    /// Add the opposite and mirrored images of the given labels
    #[arg(long)]
    pub close_labels: bool,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Candidates drawn per worker before giving up
    #[arg(short = 'a', long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: usize,

    /// Worker threads
    #[arg(short = 'j', long, default_value_t = DEFAULT_WORKERS)]
    pub workers: usize,

    /// Boards to generate
    #[arg(short = 'n', long, default_value_t = DEFAULT_BOARDS)]
    pub boards: usize,

    /// Keep candidates where two cells share a piece shape
    #[arg(long)]
    pub allow_duplicates: bool,

    /// Directory receiving one puzzle file per board
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also render each board as PNG next to its puzzle file
    #[arg(long)]
    pub png: bool,
}

impl GenerateArgs {
    /// Generation parameters for the selected label domain
    pub fn config(&self, edges: &EdgeSet) -> GeneratorConfig {
        let labels = if self.labels.is_empty() {
            let limit = Edge::try_from(edges.len()).unwrap_or(Edge::MAX);
            (1..limit).collect()
        } else {
            self.labels.clone()
        };

        GeneratorConfig {
            rows: self.rows,
            cols: self.cols,
            labels,
            seed: self.seed,
            max_attempts: self.max_attempts,
            solution_cutoff: SOLUTION_CUTOFF,
            max_solutions: MAX_SYMMETRIC_SOLUTIONS,
            allow_duplicates: self.allow_duplicates,
            close_labels: self.close_labels,
        }
    }
}

/// Arguments of the `solve` operation
#[derive(Args)]
pub struct SolveArgs {
    /// Puzzle file to solve
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Label domain
    #[command(flatten)]
    pub edges: EdgeArgs,

    /// Stop after this many solutions
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Print every solution found
    #[arg(long)]
    pub print: bool,

    /// Render the first solution to this PNG file
    #[arg(long, value_name = "PNG")]
    pub png: Option<PathBuf>,
}

/// Outcome of the `solve` operation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SolveSummary {
    /// Tilings found
    pub solutions: usize,
    /// Tilings that remain different up to rotation and reflection
    pub distinct: usize,
    /// Whether the search ran to completion
    pub exhausted: bool,
}

/// Runs the selected operation with progress reporting
pub struct Runner {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl Runner {
    /// Create a runner for the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = (!cli.quiet).then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Run the selected operation
    ///
    /// # Errors
    ///
    /// Returns an error if the operation fails
    pub fn run(&mut self) -> Result<()> {
        match &self.cli.command {
            Command::Generate(args) => {
                let boards = generate(args, self.progress_manager.as_mut())?;
                print_boards(&boards);
                if let Some(ref output) = args.output {
                    save_boards(&boards, output, args.png)?;
                }
                Ok(())
            }
            Command::Solve(args) => {
                let summary = solve(args)?;
                print_summary(&summary);
                Ok(())
            }
        }
    }
}

/// Generate boards as requested, ordered by worker
///
/// # Errors
///
/// Returns an error if the parameters are invalid or no worker finds
/// enough boards within its attempt cap
pub fn generate(
    args: &GenerateArgs,
    progress: Option<&mut ProgressManager>,
) -> Result<Vec<(usize, GeneratedBoard)>> {
    let edges = args.edges.edge_set()?;
    let config = args.config(&edges);
    let start_time = Instant::now();

    let progress: Option<&ProgressManager> = match progress {
        Some(pm) => {
            pm.initialize(args.workers, args.boards);
            Some(pm)
        }
        None => None,
    };

    let mut boards = Vec::with_capacity(args.boards);
    generate_parallel(
        &config,
        &edges,
        args.workers,
        args.boards,
        |worker, attempts| {
            if let Some(pm) = progress {
                pm.update_worker(worker, attempts);
            }
        },
        |worker, board| {
            if let Some(pm) = progress {
                pm.board_found(worker, board.attempts, board.solutions);
            }
            boards.push((worker, board));
        },
    )?;

    if let Some(pm) = progress {
        pm.finish();
    }
    log::info!(
        "generated {} boards in {:.2?}",
        boards.len(),
        start_time.elapsed()
    );

    boards.sort_by_key(|(worker, _)| *worker);
    Ok(boards)
}

/// Enumerate the tilings of a puzzle file
///
/// # Errors
///
/// Returns an error if the file cannot be read or compiled, or the
/// image cannot be written
// Allow print for user-facing solution listing
#[allow(clippy::print_stdout)]
pub fn solve(args: &SolveArgs) -> Result<SolveSummary> {
    let edges = args.edges.edge_set()?;
    let definition = read_board(&args.file, edges)?;
    let mut problem = Problem::new(&definition)?;

    let limit = args.limit.unwrap_or(usize::MAX);
    let mut solutions = 0;
    let mut distinct: BTreeSet<(Vec<Piece>, usize)> = BTreeSet::new();

    while solutions < limit && problem.find_next() {
        solutions += 1;
        let Some(grid) = problem.solution_grid() else {
            continue;
        };
        if solutions == 1 {
            if let Some(ref path) = args.png {
                export_grid_as_png(&grid, path)?;
            }
        }
        if args.print {
            println!("{grid}");
        }
        let canonical = grid.canonical();
        distinct.insert((canonical.cells(), canonical.rows()));
    }

    Ok(SolveSummary {
        solutions,
        distinct: distinct.len(),
        exhausted: problem.is_exhausted(),
    })
}

/// Write each board as a puzzle file, and optionally a PNG, into `directory`
///
/// # Errors
///
/// Returns an error if a file cannot be written
pub fn save_boards(
    boards: &[(usize, GeneratedBoard)],
    directory: &Path,
    png: bool,
) -> Result<()> {
    for (index, (_, board)) in boards.iter().enumerate() {
        let stem = format!("board_{index:03}");
        write_board(
            &board.grid.to_definition(),
            &directory.join(format!("{stem}.txt")),
        )?;
        if png {
            export_grid_as_png(&board.grid, &directory.join(format!("{stem}.png")))?;
        }
    }
    Ok(())
}

// Allow print for user-facing results
#[allow(clippy::print_stdout)]
fn print_boards(boards: &[(usize, GeneratedBoard)]) {
    for (worker, board) in boards {
        println!(
            "# worker {worker}, seed {}, {} attempts, {} solutions",
            board.seed, board.attempts, board.solutions
        );
        println!("{}", board.grid);
    }
}

// Allow print for user-facing results
#[allow(clippy::print_stdout)]
fn print_summary(summary: &SolveSummary) {
    let completeness = if summary.exhausted {
        "complete"
    } else {
        "stopped at limit"
    };
    println!(
        "{} solutions, {} distinct up to symmetry ({completeness})",
        summary.solutions, summary.distinct
    );
}
