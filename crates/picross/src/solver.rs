//! Contract between a puzzle and an external solver.
//!
//! Solving is not done in this crate. A solver reads the puzzle through its
//! public accessors, reports each pixel as soon as it is determined, and
//! finishes either solved or stuck on a contradictory line. [`run_solver`]
//! drives any [`Solver`] and collects what it reported.

use crate::grid::Grid;
use crate::puzzle::{Line, Puzzle};

/// One pixel resolved by a solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Touch {
    /// Column index
    pub x: usize,
    /// Row index
    pub y: usize,
    pub filled: bool,
}

/// Terminal status of a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveOutcome {
    /// Every pixel was determined.
    Solved,
    /// The puzzle has no solution; this is the first line proven infeasible.
    Contradiction(Line),
}

/// A puzzle-solving algorithm.
pub trait Solver {
    /// Solve `puzzle`, calling `touch` once per pixel in the order pixels
    /// become determined.
    fn solve(&mut self, puzzle: &Puzzle, touch: &mut dyn FnMut(Touch)) -> SolveOutcome;
}

/// Pixels collected from a solver, each either known or still unknown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialSolution {
    width: usize,
    height: usize,
    cells: Vec<Option<bool>>,
}

impl PartialSolution {
    fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width * height],
        }
    }

    /// State of the cell at column `x`, row `y`: `None` if unknown or out of
    /// bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<bool> {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x]
        } else {
            None
        }
    }

    /// Number of determined cells.
    pub fn known_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// The determined grid, if every cell is known.
    pub fn to_grid(&self) -> Option<Grid> {
        let rows = (0..self.height)
            .map(|y| (0..self.width).map(|x| self.get(x, y)).collect::<Option<Vec<bool>>>())
            .collect::<Option<Vec<_>>>()?;
        Grid::from_rows(rows).ok()
    }

    fn apply(&mut self, touch: Touch) -> bool {
        if touch.x < self.width && touch.y < self.height {
            self.cells[touch.y * self.width + touch.x] = Some(touch.filled);
            true
        } else {
            false
        }
    }
}

/// Everything a solver reported for one puzzle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveReport {
    pub cells: PartialSolution,
    pub touches: Vec<Touch>,
    pub outcome: SolveOutcome,
}

impl SolveReport {
    /// The solved grid, if the solver finished without contradiction and
    /// determined every pixel.
    pub fn solution(&self) -> Option<Grid> {
        match self.outcome {
            SolveOutcome::Solved => self.cells.to_grid(),
            SolveOutcome::Contradiction(_) => None,
        }
    }
}

/// Run `solver` on `puzzle`, recording every touch in order.
///
/// Touches outside the puzzle are recorded but not applied to the cells.
pub fn run_solver<S: Solver + ?Sized>(solver: &mut S, puzzle: &Puzzle) -> SolveReport {
    let mut cells = PartialSolution::new(puzzle.width(), puzzle.height());
    let mut touches = Vec::new();
    let outcome = solver.solve(puzzle, &mut |touch: Touch| {
        if !cells.apply(touch) {
            log::warn!(
                target: "solver",
                "Ignoring touch at ({}, {}) outside {}×{} puzzle",
                touch.x,
                touch.y,
                puzzle.width(),
                puzzle.height()
            );
        }
        touches.push(touch);
    });

    match outcome {
        SolveOutcome::Solved => log::debug!(
            target: "solver",
            "Solver finished with {}/{} cells known",
            cells.known_count(),
            puzzle.width() * puzzle.height()
        ),
        SolveOutcome::Contradiction(line) => {
            log::debug!(target: "solver", "Solver found a contradiction in {line}");
        }
    }

    SolveReport {
        cells,
        touches,
        outcome,
    }
}
