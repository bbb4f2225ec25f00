//! Random board generation with a bounded uniqueness check
//!
//! A candidate board is drawn by filling every internal edge from the
//! configured labels, redrawn while two cells share a piece shape, and then
//! handed to the solver. Its solution count is capped at the cutoff; a
//! board whose count stays within the accepted maximum is unique up to the
//! symmetries of the square.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rayon::iter::{IntoParallelIterator, ParallelIterator};

use crate::algorithm::problem::Problem;
use crate::io::configuration::{
    DEFAULT_COLS, DEFAULT_MAX_ATTEMPTS, DEFAULT_ROWS, DEFAULT_SEED, FLAT_EDGE, MAX_GENERATED_CELLS,
    MAX_GRID_DIMENSION, MAX_SYMMETRIC_SOLUTIONS, PROGRESS_REFRESH_ATTEMPTS, SOLUTION_CUTOFF,
};
use crate::io::error::{Result, TilingError, invalid_parameter};
use crate::spatial::edges::{Edge, EdgeSet};
use crate::spatial::grid::Grid;

/// Parameters of the generation loop
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Board height
    pub rows: usize,
    /// Board width
    pub cols: usize,
    /// Labels drawn for internal edges, uniformly and with repetition
    pub labels: Vec<Edge>,
    /// Seed of the sampling generator
    pub seed: u64,
    /// Candidate boards drawn before giving up
    pub max_attempts: usize,
    /// Solutions counted before a candidate is abandoned
    pub solution_cutoff: usize,
    /// Largest solution count still accepted
    pub max_solutions: usize,
    /// Keep candidates where two cells share a piece shape
    pub allow_duplicates: bool,
    /// Extend `labels` with their opposite and mirrored images
    pub close_labels: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            labels: vec![1, 2, 3, 4],
            seed: DEFAULT_SEED,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            solution_cutoff: SOLUTION_CUTOFF,
            max_solutions: MAX_SYMMETRIC_SOLUTIONS,
            allow_duplicates: false,
            close_labels: false,
        }
    }
}

impl GeneratorConfig {
    /// Check the parameters before any board is drawn
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A board dimension is zero or above the size limit
    /// - The board has more cells than the orientation index can hold
    ///   once every piece contributes 8 orientations
    /// - No label is given
    /// - The attempt cap is zero
    /// - The accepted maximum is not below the cutoff
    pub fn validate(&self) -> Result<()> {
        for (parameter, value) in [("rows", self.rows), ("cols", self.cols)] {
            if value == 0 || value > MAX_GRID_DIMENSION {
                return Err(invalid_parameter(
                    parameter,
                    &value,
                    &format!("must be in 1..={MAX_GRID_DIMENSION}"),
                ));
            }
        }
        let cells = self.rows * self.cols;
        if cells > MAX_GENERATED_CELLS {
            return Err(invalid_parameter(
                "cells",
                &cells,
                &format!("must be at most {MAX_GENERATED_CELLS}"),
            ));
        }
        if self.labels.is_empty() {
            return Err(invalid_parameter(
                "labels",
                &"[]",
                &"at least one label is required",
            ));
        }
        if self.max_attempts == 0 {
            return Err(invalid_parameter("max_attempts", &0, &"must be positive"));
        }
        if self.max_solutions >= self.solution_cutoff {
            return Err(invalid_parameter(
                "max_solutions",
                &self.max_solutions,
                &format!("must be below the cutoff {}", self.solution_cutoff),
            ));
        }
        Ok(())
    }
}

/// Board accepted by the generation loop
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedBoard {
    /// The accepted board
    pub grid: Grid,
    /// Tilings found for its piece set, at most the accepted maximum
    pub solutions: usize,
    /// Candidates drawn to find it, including this one
    pub attempts: usize,
    /// Seed of the generator that produced it
    pub seed: u64,
}

/// Seeded sampler of boards with few solutions
pub struct Generator {
    config: GeneratorConfig,
    edges: Arc<EdgeSet>,
    labels: Vec<Edge>,
    rng: StdRng,
    attempts: usize,
}

impl Generator {
    /// Create a generator for a validated configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid
    pub fn new(config: GeneratorConfig, edges: Arc<EdgeSet>) -> Result<Self> {
        config.validate()?;
        let labels = if config.close_labels {
            edges.closure(&config.labels)
        } else {
            config.labels.clone()
        };
        let rng = StdRng::seed_from_u64(config.seed);

        Ok(Self {
            config,
            edges,
            labels,
            rng,
            attempts: 0,
        })
    }

    /// Configuration in use
    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Labels actually drawn for internal edges
    pub fn labels(&self) -> &[Edge] {
        &self.labels
    }

    /// Candidates drawn over the lifetime of this generator
    pub const fn attempts(&self) -> usize {
        self.attempts
    }

    /// Draw one candidate board with a flat perimeter
    pub fn sample_grid(&mut self) -> Grid {
        let mut grid = Grid::new(self.config.rows, self.config.cols, Arc::clone(&self.edges));
        let (labels, rng) = (&self.labels, &mut self.rng);
        grid.randomize(|| labels.choose(&mut *rng).copied().unwrap_or(FLAT_EDGE));
        self.attempts += 1;
        grid
    }

    /// Draw candidates until one is accepted
    ///
    /// # Errors
    ///
    /// Returns an error if the attempt cap is reached or a candidate
    /// cannot be compiled
    pub fn next_board(&mut self) -> Result<GeneratedBoard> {
        let stop = AtomicBool::new(false);
        self.next_board_until(&stop, |_| {})?
            .ok_or(TilingError::GenerationExhausted {
                attempts: self.config.max_attempts,
            })
    }

    /// Draw candidates until one is accepted or `stop` is raised
    ///
    /// `observe` receives the number of candidates drawn for this board at
    /// regular intervals. Returns `Ok(None)` when stopped externally.
    ///
    /// # Errors
    ///
    /// Returns an error if the attempt cap is reached or a candidate
    /// cannot be compiled
    pub fn next_board_until<F>(
        &mut self,
        stop: &AtomicBool,
        mut observe: F,
    ) -> Result<Option<GeneratedBoard>>
    where
        F: FnMut(usize),
    {
        for attempt in 1..=self.config.max_attempts {
            if stop.load(Ordering::Relaxed) {
                return Ok(None);
            }
            if attempt % PROGRESS_REFRESH_ATTEMPTS == 0 {
                observe(attempt);
            }

            let grid = self.sample_grid();
            if !self.config.allow_duplicates && grid.has_duplicate() {
                continue;
            }

            let mut problem = Problem::new(&grid.to_definition())?;
            let solutions = problem.count_solutions(self.config.solution_cutoff);
            if solutions > self.config.max_solutions {
                log::trace!("rejected candidate {attempt}: at least {solutions} solutions");
                continue;
            }

            observe(attempt);
            log::info!(
                "accepted {}x{} board after {attempt} attempts with {solutions} solutions",
                grid.rows(),
                grid.cols()
            );
            return Ok(Some(GeneratedBoard {
                grid,
                solutions,
                attempts: attempt,
                seed: self.config.seed,
            }));
        }

        Err(TilingError::GenerationExhausted {
            attempts: self.config.max_attempts,
        })
    }
}

/// Run independent generators on `workers` threads until `boards` are found
///
/// Worker `id` is seeded with `seed * workers + id`. Accepted boards are
/// handed to `sink` one at a time together with the worker id; the first
/// `boards` boards win and the remaining workers are stopped. `progress`
/// receives `(worker, attempts)` updates. Returns the number of boards
/// delivered.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the thread pool cannot
/// be built, or every worker fails before enough boards are found
pub fn generate_parallel<P, S>(
    config: &GeneratorConfig,
    edges: &Arc<EdgeSet>,
    workers: usize,
    boards: usize,
    progress: P,
    sink: S,
) -> Result<usize>
where
    P: Fn(usize, usize) + Sync,
    S: FnMut(usize, GeneratedBoard) + Send,
{
    config.validate()?;
    if workers == 0 {
        return Err(invalid_parameter("workers", &workers, &"must be positive"));
    }
    if boards == 0 {
        return Ok(0);
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .map_err(|error| invalid_parameter("workers", &workers, &error))?;

    let stop = AtomicBool::new(false);
    let delivered = AtomicUsize::new(0);
    let sink = Mutex::new(sink);

    log::debug!("starting {workers} generation workers for {boards} boards");
    let outcomes: Vec<Result<()>> = pool.install(|| {
        (0..workers)
            .into_par_iter()
            .map(|worker| -> Result<()> {
                let worker_config = GeneratorConfig {
                    seed: config
                        .seed
                        .wrapping_mul(workers as u64)
                        .wrapping_add(worker as u64),
                    ..config.clone()
                };
                let mut generator = Generator::new(worker_config, Arc::clone(edges))?;

                while let Some(board) =
                    generator.next_board_until(&stop, |attempts| progress(worker, attempts))?
                {
                    let mut sink = sink.lock().unwrap_or_else(PoisonError::into_inner);
                    if delivered.load(Ordering::SeqCst) >= boards {
                        break;
                    }
                    (*sink)(worker, board);
                    if delivered.fetch_add(1, Ordering::SeqCst) + 1 >= boards {
                        stop.store(true, Ordering::SeqCst);
                    }
                }
                Ok(())
            })
            .collect()
    });

    let delivered = delivered.into_inner();
    if delivered < boards {
        if let Some(error) = outcomes.into_iter().find_map(Result::err) {
            return Err(error);
        }
    }
    Ok(delivered)
}
