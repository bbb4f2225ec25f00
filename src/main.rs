//! CLI entry point for the edge-matching puzzle generator and solver

use clap::Parser;
use edgematch::io::cli::{Cli, Runner};

fn main() -> edgematch::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let mut runner = Runner::new(cli);
    runner.run()
}
