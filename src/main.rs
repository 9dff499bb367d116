use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;

use alphametic::errors::PuzzleError;
use alphametic::puzzle::{self, Puzzle};
use alphametic::solver::{self, SolveOutcome};

/// Alphametic puzzle solver: two 4-letter addends and their 5-letter sum
/// (e.g. SEND + MORE = MONEY), each letter standing for a unique digit
#[derive(Parser, Debug)]
#[command(author, version, long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ")"), about, long_about = None)]
struct Cli {
    /// Path to the puzzle file (13 letters; line breaks are ignored)
    puzzle: String,

    /// Path of the result file to write
    #[arg(short, long, default_value = "result.txt")]
    output: String,
}

/// Entry point of the alphametic CLI solver.
///
/// Delegates to [`try_main`], catching any errors and printing them
/// in a user-friendly way before exiting with code 1.
fn main() -> ExitCode {
    // Set up logging
    let debug_enabled = std::env::var("ALPHAMETIC_DEBUG").is_ok();
    alphametic::log::init_logger(debug_enabled);

    log::info!(
        "Starting alphametic solver {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH")
    );

    if let Err(e) = try_main() {
        // Print the error message to stderr, with detailed formatting if
        // it's a PuzzleError
        if let Some(puzzle_err) = e.downcast_ref::<PuzzleError>() {
            eprintln!("Error: {}", puzzle_err.display_detailed());
        } else {
            eprintln!("Error: {e}");
        }
        // Exit explicitly with a nonzero code so scripts can detect failure
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Core application logic for the alphametic CLI solver.
///
/// Steps:
/// 1. Parse CLI arguments with Clap.
/// 2. Load and validate the 13-letter puzzle from disk.
/// 3. Build the CSP and run the backtracking search.
/// 4. Write the result file (three digit words, or `failure`).
/// 5. Print performance metrics (timings, search counters) on stderr.
///
/// Returns `Ok(())` on success or an error (e.g., malformed puzzle,
/// unreadable file) which bubbles up to [`main`].
fn try_main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let cli = Cli::parse();

    // 1. Load and validate the puzzle
    let t_load = Instant::now();
    let puzzle = Puzzle::load_from_path(&cli.puzzle)?;
    let load_secs = t_load.elapsed().as_secs_f64();

    // 2. Build the constraint store and search
    let mut csp = puzzle.build_csp();
    let t_solve = Instant::now();
    let result = solver::solve(&mut csp);
    let solve_secs = t_solve.elapsed().as_secs_f64();

    // 3. Report the outcome on stdout and in the result file
    match &result.outcome {
        SolveOutcome::Solved(assignment) => {
            let words = puzzle::solved_words(&csp, assignment)
                .ok_or("solver returned an incomplete assignment")?;
            println!("{words}");
            puzzle::write_result(&cli.output, Some(&words))?;
        }
        SolveOutcome::Failure => {
            println!("failure");
            puzzle::write_result(&cli.output, None)?;
        }
    }

    // 4. Print diagnostics (timings, search counters) to stderr
    eprintln!(
        "Loaded puzzle in {:.3}s; solved in {:.3}s ({} nodes, {} backtracks); result written to {}.",
        load_secs, solve_secs, result.stats.nodes, result.stats.backtracks, cli.output
    );

    Ok(())
}
