//! CLI entry point for the picross puzzle model.
//!
//! Usage:
//!   picross verify <puzzle> <grid>
//!   picross verify <puzzle> --stdin
//!   picross derive <grid> [--json]
//!   picross show <puzzle> [--json]
//!
//! Puzzles and grids may be given as text or as JSON; JSON input is
//! recognized by a `.json` extension or by its leading `{` / `[`.
//! Set `RUST_LOG=debug` for diagnostic output on stderr.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;
use thiserror::Error;

use picross::{Grid, Line, Puzzle};

#[derive(Parser)]
#[command(name = "picross")]
#[command(about = "Build Picross/Nonogram puzzles and verify candidate solutions")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether a grid satisfies every clue of a puzzle
    Verify {
        /// Path to the puzzle
        #[arg(value_name = "PUZZLE")]
        puzzle: PathBuf,

        /// Path to the candidate grid (use --stdin to read it from stdin)
        #[arg(value_name = "GRID", required_unless_present = "stdin")]
        grid: Option<PathBuf>,

        /// Read the grid from stdin instead of a file
        #[arg(long)]
        stdin: bool,
    },
    /// Derive the clues of a known solution grid
    Derive {
        /// Path to the solution grid (use --stdin to read it from stdin)
        #[arg(value_name = "GRID", required_unless_present = "stdin")]
        grid: Option<PathBuf>,

        /// Read the grid from stdin instead of a file
        #[arg(long)]
        stdin: bool,

        /// Print the puzzle as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Parse a puzzle and print its dimensions and clues
    Show {
        /// Path to the puzzle (use --stdin to read it from stdin)
        #[arg(value_name = "PUZZLE", required_unless_present = "stdin")]
        puzzle: Option<PathBuf>,

        /// Read the puzzle from stdin instead of a file
        #[arg(long)]
        stdin: bool,

        /// Print the puzzle as JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[derive(Error, Debug)]
enum CliError {
    #[error("failed to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to read stdin: {0}")]
    Stdin(io::Error),
    #[error("{}: {source}", .path.display())]
    Invalid { path: PathBuf, source: picross::Error },
    #[error("{}: {source}", .path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to write JSON: {0}")]
    Output(#[from] serde_json::Error),
}

/// Output format for verification result
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VerificationOutput {
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    mismatched_lines: Vec<Line>,
    width: usize,
    height: usize,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match run(cli.command) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(2)
        }
    }
}

fn run(command: Commands) -> Result<ExitCode, CliError> {
    match command {
        Commands::Verify {
            puzzle,
            grid,
            stdin,
        } => {
            let puzzle = load_puzzle(Some(puzzle.as_path()), false)?;
            let grid = load_grid(grid.as_deref(), stdin)?;

            let output = verify(&puzzle, &grid);
            println!("{}", serde_json::to_string_pretty(&output)?);

            // Exit with appropriate code
            Ok(if output.valid {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Commands::Derive { grid, stdin, json } => {
            let (path, content) = read_input(grid.as_deref(), stdin)?;
            let grid = parse_grid(&path, &content)?;
            let puzzle = Puzzle::from_solution(&grid)
                .map_err(|source| CliError::Invalid { path, source })?;
            print_puzzle(&puzzle, json)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Show {
            puzzle,
            stdin,
            json,
        } => {
            let puzzle = load_puzzle(puzzle.as_deref(), stdin)?;
            if !json {
                println!("Dimensions (w×h) = {}×{}", puzzle.width(), puzzle.height());
            }
            print_puzzle(&puzzle, json)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn verify(puzzle: &Puzzle, grid: &Grid) -> VerificationOutput {
    let (valid, reason, mismatched_lines) = match puzzle.mismatched_lines(grid) {
        None => (
            false,
            Some(format!(
                "grid is {}×{} but puzzle is {}×{}",
                grid.width(),
                grid.height(),
                puzzle.width(),
                puzzle.height()
            )),
            vec![],
        ),
        Some(lines) if lines.is_empty() => (true, None, lines),
        Some(lines) => (
            false,
            Some(format!("{} line(s) do not match their clues", lines.len())),
            lines,
        ),
    };
    debug_assert_eq!(valid, puzzle.verify_solution(grid));

    VerificationOutput {
        valid,
        reason,
        mismatched_lines,
        width: puzzle.width(),
        height: puzzle.height(),
    }
}

fn print_puzzle(puzzle: &Puzzle, json: bool) -> Result<(), CliError> {
    if json {
        println!("{}", serde_json::to_string_pretty(puzzle)?);
    } else {
        print!("{puzzle}");
    }
    Ok(())
}

/// Read a file, or stdin when `stdin` is set.
fn read_input(path: Option<&Path>, stdin: bool) -> Result<(PathBuf, String), CliError> {
    match path {
        Some(path) if !stdin => {
            let content = fs::read_to_string(path).map_err(|source| CliError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            Ok((path.to_path_buf(), content))
        }
        _ => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(CliError::Stdin)?;
            Ok((PathBuf::from("<stdin>"), buffer))
        }
    }
}

fn is_json(path: &Path, content: &str) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
        || content.trim_start().starts_with(['{', '['])
}

fn load_puzzle(path: Option<&Path>, stdin: bool) -> Result<Puzzle, CliError> {
    let (path, content) = read_input(path, stdin)?;
    log::debug!("Loading puzzle from {}", path.display());
    if is_json(&path, &content) {
        serde_json::from_str(&content).map_err(|source| CliError::Json { path, source })
    } else {
        Puzzle::parse(&content).map_err(|source| CliError::Invalid { path, source })
    }
}

fn load_grid(path: Option<&Path>, stdin: bool) -> Result<Grid, CliError> {
    let (path, content) = read_input(path, stdin)?;
    parse_grid(&path, &content)
}

fn parse_grid(path: &Path, content: &str) -> Result<Grid, CliError> {
    log::debug!("Loading grid from {}", path.display());
    let path = path.to_path_buf();
    if is_json(&path, content) {
        serde_json::from_str(content).map_err(|source| CliError::Json { path, source })
    } else {
        Grid::parse(content).map_err(|source| CliError::Invalid { path, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solution() -> Grid {
        Grid::parse("##.\n..#\n").unwrap()
    }

    #[test]
    fn test_verify_valid_grid() {
        let puzzle = Puzzle::from_solution(&solution()).unwrap();
        let output = verify(&puzzle, &solution());
        assert!(output.valid);
        assert_eq!(output.reason, None);
        assert!(output.mismatched_lines.is_empty());
    }

    #[test]
    fn test_verify_reports_mismatched_lines() {
        let puzzle = Puzzle::from_solution(&solution()).unwrap();
        let output = verify(&puzzle, &Grid::parse("#.#\n..#\n").unwrap());
        assert!(!output.valid);
        assert_eq!(
            output.mismatched_lines,
            vec![Line::Column(1), Line::Column(2), Line::Row(0)]
        );
    }

    #[test]
    fn test_verify_dimension_mismatch() {
        let puzzle = Puzzle::from_solution(&solution()).unwrap();
        let output = verify(&puzzle, &Grid::parse("##\n..\n").unwrap());
        assert!(!output.valid);
        assert_eq!(output.reason.as_deref(), Some("grid is 2×2 but puzzle is 3×2"));
    }

    #[test]
    fn test_verify_report_json() {
        let puzzle = Puzzle::from_solution(&solution()).unwrap();
        let output = verify(&puzzle, &Grid::parse(".#.\n..#\n").unwrap());
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["valid"], false);
        assert_eq!(json["mismatchedLines"][0]["column"], 0);
        assert_eq!(json["width"], 3);

        let json = serde_json::to_value(verify(&puzzle, &solution())).unwrap();
        assert_eq!(json["valid"], true);
        assert!(json.get("reason").is_none());
        assert!(json.get("mismatchedLines").is_none());
    }

    #[test]
    fn test_json_detection() {
        assert!(is_json(Path::new("p.json"), "1\n"));
        assert!(is_json(Path::new("p.txt"), "  {\"width\": 1}"));
        assert!(is_json(Path::new("g.txt"), "[[true]]"));
        assert!(!is_json(Path::new("p.txt"), "1\n\n1\n"));
    }
}
