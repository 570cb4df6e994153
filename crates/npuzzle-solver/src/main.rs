//! CLI entry point for the N-puzzle solver.
//!
//! Usage:
//!   npuzzle-solver solve <puzzle.txt> [options]
//!   npuzzle-solver solve --stdin [options]
//!   npuzzle-solver inspect <puzzle.json>
//!
//! Options:
//!   --format <text|json>  Input format (default: inferred from extension)
//!   --dedupe              Skip boards that were already expanded
//!   --json                Print a JSON report instead of the board listing
//!   -v, --verbose         Log search progress (RUST_LOG overrides)

use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use log::error;
use serde::Serialize;

use npuzzle_solver::loader::{load_path, load_str, Format, LoadError};
use npuzzle_solver::{Board, Slide, Solver, SolverConfig};

/// Exit code for a board whose input could not be used.
const EXIT_INPUT_ERROR: u8 = 2;

#[derive(Parser)]
#[command(name = "npuzzle-solver")]
#[command(about = "Optimal A* solver for the N-puzzle")]
#[command(version)]
struct Cli {
    /// Log search progress at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct InputArgs {
    /// Path to the puzzle file (use --stdin to read from stdin)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Read the puzzle from stdin instead of a file
    #[arg(long, conflicts_with = "file")]
    stdin: bool,

    /// Input format; inferred from the file extension when omitted
    #[arg(long, value_enum)]
    format: Option<Format>,
}

#[derive(Subcommand)]
enum Commands {
    /// Find a shortest solution, or report that none exists
    Solve {
        #[command(flatten)]
        input: InputArgs,

        /// Keep a visited set so no board is expanded twice
        #[arg(long)]
        dedupe: bool,

        /// Print a JSON report
        #[arg(long)]
        json: bool,
    },
    /// Print a board with its heuristics and twin
    Inspect {
        #[command(flatten)]
        input: InputArgs,
    },
}

/// JSON report for a solve
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SolveOutput<'a> {
    solvable: bool,
    moves: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    solution: Option<&'a [Board]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    slides: Option<Vec<Slide>>,
    nodes_expanded: usize,
    nodes_created: usize,
    time_elapsed_ms: u64,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match cli.command {
        Commands::Solve {
            input,
            dedupe,
            json,
        } => {
            let board = match read_board(&input) {
                Ok(board) => board,
                Err(e) => {
                    error!("failed to load puzzle: {e}");
                    return ExitCode::from(EXIT_INPUT_ERROR);
                }
            };

            let config = SolverConfig {
                dedupe_visited: dedupe,
            };
            let solver = match Solver::try_new(board, &config) {
                Ok(solver) => solver,
                Err(e) => {
                    error!("{e}");
                    return ExitCode::from(EXIT_INPUT_ERROR);
                }
            };

            if json {
                let output = format_result(&solver);
                match serde_json::to_string_pretty(&output) {
                    Ok(text) => println!("{text}"),
                    Err(e) => {
                        error!("failed to serialize report: {e}");
                        return ExitCode::FAILURE;
                    }
                }
            } else {
                print_solution(&solver);
            }

            if solver.is_solvable() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Commands::Inspect { input } => {
            let board = match read_board(&input) {
                Ok(Some(board)) => board,
                Ok(None) => {
                    error!("no board in input");
                    return ExitCode::from(EXIT_INPUT_ERROR);
                }
                Err(e) => {
                    error!("failed to load puzzle: {e}");
                    return ExitCode::from(EXIT_INPUT_ERROR);
                }
            };
            print_inspection(&board);
            ExitCode::SUCCESS
        }
    }
}

fn read_board(input: &InputArgs) -> Result<Option<Board>, LoadError> {
    if input.stdin {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        load_str(&buffer, input.format.unwrap_or(Format::Text))
    } else if let Some(path) = &input.file {
        load_path(path, input.format)
    } else {
        Ok(None)
    }
}

fn print_solution(solver: &Solver) {
    match solver.solution() {
        Some(boards) => {
            println!("Minimum number of moves = {}", solver.moves());
            for board in boards {
                println!("{board}");
            }
        }
        None => println!("No solution possible"),
    }
}

fn print_inspection(board: &Board) {
    print!("{board}");
    println!("hamming   = {}", board.hamming());
    println!("manhattan = {}", board.manhattan());
    println!("goal      = {}", board.is_goal());
    println!();
    println!("twin:");
    print!("{}", board.twin());
}

fn format_result(solver: &Solver) -> SolveOutput<'_> {
    let stats = solver.stats();
    SolveOutput {
        solvable: solver.is_solvable(),
        moves: solver.moves(),
        solution: solver.solution(),
        slides: solver.slides(),
        nodes_expanded: stats.nodes_expanded,
        nodes_created: stats.nodes_created,
        time_elapsed_ms: stats.time_elapsed_ms,
    }
}
