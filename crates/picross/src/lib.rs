//! Picross (Nonogram) puzzle model.
//!
//! This crate holds a puzzle's dimensions and its row and column clues,
//! builds puzzles from explicit clues, from text, or from a known solution,
//! and checks whether a candidate grid satisfies every clue. Solving is left
//! to external implementations of [`Solver`].

pub mod error;
pub mod grid;
mod parser;
pub mod puzzle;
pub mod runs;
pub mod solver;

// Re-export main types
pub use error::{Error, FormatError, FormatErrorKind, Result};
pub use grid::Grid;
pub use puzzle::{Line, Puzzle};
pub use runs::{run_lengths, Clue};
pub use solver::{run_solver, PartialSolution, SolveOutcome, SolveReport, Solver, Touch};
