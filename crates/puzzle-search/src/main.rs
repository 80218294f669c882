//! CLI entry point for the puzzle search engine.
//!
//! Usage:
//!   puzzle-search solve <puzzle.json> [options]
//!   puzzle-search solve --stdin [options]
//!   puzzle-search difficulty <puzzle.json> [options]
//!
//! Options:
//!   --solver <dfs|bfs>     Search strategy (default: bfs)
//!   --timeout <seconds>    Maximum search time
//!   --max-depth <n>        Maximum depth explored by DFS (for `difficulty`,
//!                          only the sudoku uniqueness check)
//!   --max-states <n>       Maximum states held by BFS
//!
//! Exit codes: 0 solution found, 1 no solution, 2 bad input or aborted search.
//! Set `RUST_LOG=debug` (or `trace`) to follow the search on stderr.

use std::io::{self, Read};
use std::path::PathBuf;
use std::process;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use log::{error, info};
use serde::Serialize;

use puzzle_search::{
    classify, Difficulty, InputError, LoadedPuzzle, Puzzle, PuzzleDocument, SearchError,
    SearchStats, SolverConfig, SolverKind,
};

#[derive(Parser)]
#[command(name = "puzzle-search")]
#[command(about = "Depth-first and breadth-first search over full-information puzzles")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct InputArgs {
    /// Path to puzzle JSON file (use --stdin to read from stdin)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Read puzzle from stdin instead of file
    #[arg(long)]
    stdin: bool,
}

#[derive(Args)]
struct LimitArgs {
    /// Maximum search time in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Maximum number of moves explored depth-first (difficulty: sudoku uniqueness check only)
    #[arg(long)]
    max_depth: Option<usize>,

    /// Maximum number of states held breadth-first
    #[arg(long)]
    max_states: Option<usize>,
}

impl LimitArgs {
    fn to_config(&self) -> SolverConfig {
        SolverConfig {
            timeout: self.timeout.map(Duration::from_secs),
            max_depth: self.max_depth,
            max_states: self.max_states,
            cancel: None,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Search for a path from the puzzle to a solved state
    Solve {
        #[command(flatten)]
        input: InputArgs,

        /// Search strategy
        #[arg(long, value_enum, default_value = "bfs")]
        solver: SolverKind,

        #[command(flatten)]
        limits: LimitArgs,
    },
    /// Classify a puzzle by the length of its shortest solution
    Difficulty {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        limits: LimitArgs,
    },
}

/// Output format for `solve`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SolveOutput {
    solved: bool,
    solver: SolverKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    steps: Option<usize>,
    path: Vec<String>,
    stats: SearchStats,
}

/// Output format for `difficulty`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DifficultyOutput {
    difficulty: Difficulty,
    #[serde(skip_serializing_if = "Option::is_none")]
    unique_solution: Option<bool>,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Search(#[from] SearchError),
    #[error("must provide either a file path or --stdin")]
    NoInput,
    #[error("failed to read from stdin: {0}")]
    Stdin(io::Error),
    #[error("failed to encode output: {0}")]
    Output(serde_json::Error),
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match run(cli.command) {
        Ok(true) => process::exit(0),
        Ok(false) => process::exit(1),
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            process::exit(2);
        }
    }
}

/// Run one command. Returns whether the puzzle turned out solvable.
fn run(command: Commands) -> Result<bool, CliError> {
    match command {
        Commands::Solve {
            input,
            solver,
            limits,
        } => {
            let config = limits.to_config();
            let output = match read_puzzle(&input)? {
                LoadedPuzzle::WordLadder(p) => solve(p, solver, &config)?,
                LoadedPuzzle::Sudoku(p) => solve(p, solver, &config)?,
            };
            print_json(&output)?;
            Ok(output.solved)
        }
        Commands::Difficulty { input, limits } => {
            let config = limits.to_config();
            let output = match read_puzzle(&input)? {
                LoadedPuzzle::WordLadder(p) => DifficultyOutput {
                    difficulty: p.difficulty(&config)?,
                    unique_solution: None,
                },
                LoadedPuzzle::Sudoku(p) => DifficultyOutput {
                    unique_solution: Some(p.has_unique_solution(&config)?),
                    difficulty: classify(p, &config)?,
                },
            };
            print_json(&output)?;
            Ok(output.difficulty != Difficulty::Impossible)
        }
    }
}

fn read_puzzle(input: &InputArgs) -> Result<LoadedPuzzle, CliError> {
    let (document, base_dir) = if input.stdin {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(CliError::Stdin)?;
        (PuzzleDocument::from_json(&buffer)?, None)
    } else if let Some(path) = &input.file {
        (PuzzleDocument::read(path)?, path.parent())
    } else {
        return Err(CliError::NoInput);
    };
    info!("loaded puzzle document: {:?}", document);
    Ok(document.load(base_dir.filter(|dir| !dir.as_os_str().is_empty()))?)
}

fn solve<P: Puzzle>(
    puzzle: P,
    solver: SolverKind,
    config: &SolverConfig,
) -> Result<SolveOutput, SearchError> {
    let outcome = solver.search(config, puzzle, None)?;
    info!(
        "{:?} search finished: {} states expanded in {}ms",
        solver, outcome.stats.states_expanded, outcome.stats.time_elapsed_ms
    );
    Ok(SolveOutput {
        solved: outcome.is_solved(),
        solver,
        steps: outcome.steps(),
        path: outcome.path.iter().map(Puzzle::fingerprint).collect(),
        stats: outcome.stats,
    })
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(value).map_err(CliError::Output)?;
    println!("{}", json);
    Ok(())
}
