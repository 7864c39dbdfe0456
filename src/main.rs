mod board;
mod deadsquares;
mod grid;
mod heuristic;
mod levels;
mod pqueue;
mod pushgen;
mod reach;
mod solver;
mod tunnel;
mod visited;
mod zobrist;

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use board::{Board, Render};
use solver::{solve, SolveResult, SolverOpts};

/// A Sokoban puzzle solver.
#[derive(Parser)]
#[command(about = "Solves Sokoban levels by push-space search")]
struct Args {
    /// 1-based index of the level to solve, within the `screens` directory.
    #[arg(default_value_t = 1)]
    level: usize,

    /// Node budget; the search has no intrinsic limit without this.
    #[arg(short = 'n', long)]
    max_nodes: Option<usize>,

    /// Disable dead-square pruning.
    #[arg(long)]
    no_dead_squares: bool,

    /// Disable tunnel (corridor macro-move) detection.
    #[arg(long)]
    no_tunnels: bool,

    /// Print the solved board.
    #[arg(short, long)]
    print_board: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    if args.level == 0 {
        error!("level numbers are 1-based; 0 is not valid");
        return ExitCode::FAILURE;
    }

    let screens_dir = Path::new("screens");
    let files = match levels::discover_level_files(screens_dir) {
        Ok(files) => files,
        Err(e) => {
            error!(error = %e, dir = %screens_dir.display(), "failed to read levels directory");
            return ExitCode::FAILURE;
        }
    };

    if files.is_empty() {
        error!(dir = %screens_dir.display(), "no level files found");
        return ExitCode::FAILURE;
    }

    let mut all_levels = Vec::new();
    for file in &files {
        match levels::load_levels(file) {
            Ok(parsed) => all_levels.extend(parsed),
            Err(e) => {
                error!(error = %e, file = %file.display(), "failed to parse level file");
                return ExitCode::FAILURE;
            }
        }
    }

    let Some(level) = all_levels.get(args.level - 1) else {
        error!(
            requested = args.level,
            available = all_levels.len(),
            "level index out of range"
        );
        return ExitCode::FAILURE;
    };

    let (board, initial) = match Board::new(level) {
        Ok(pair) => pair,
        Err(e) => {
            error!(error = %e, "level failed validation");
            return ExitCode::FAILURE;
        }
    };

    let opts = SolverOpts {
        max_nodes: args.max_nodes,
        dead_squares: !args.no_dead_squares,
        tunnels: !args.no_tunnels,
    };

    match solve(&board, &initial, opts) {
        SolveResult::Solved { pushes, final_state } => {
            info!(steps = pushes.len(), "solved");
            println!("solved in {} pushes", pushes.len());
            if args.print_board {
                print!("{}", Render(&board, &final_state));
            }
            ExitCode::SUCCESS
        }
        SolveResult::Exhausted => {
            println!("no solution exists");
            ExitCode::FAILURE
        }
        SolveResult::BudgetExceeded => {
            println!("node budget exceeded before a solution was found");
            ExitCode::FAILURE
        }
    }
}
