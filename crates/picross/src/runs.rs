//! Run-length derivation over a single line of cells.
//!
//! This is the one place where a line of booleans is turned into its clue.
//! Both deriving a puzzle from a solution and verifying a candidate grid go
//! through [`run_lengths`], so the two can never disagree.

use smallvec::SmallVec;

/// Run lengths along one row or column. Never contains a zero.
pub type Clue = SmallVec<[usize; 4]>;

/// Lengths of the consecutive filled runs in `line`, in reading order.
///
/// A line with no filled cells yields the empty clue.
pub fn run_lengths<I>(line: I) -> Clue
where
    I: IntoIterator<Item = bool>,
{
    let mut runs = Clue::new();
    let mut current = 0;
    for filled in line {
        if filled {
            current += 1;
        } else if current != 0 {
            runs.push(current);
            current = 0;
        }
    }
    if current != 0 {
        runs.push(current);
    }
    runs
}
