#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The solver interface and the values it produces.
//!
//! A solver consumes a [`Cnf`] and answers with a [`Verdict`]: a total model when the
//! formula is satisfiable, `Unsat` when the search space was exhausted, or `Unknown`
//! when an externally imposed [`SearchLimits`] budget ran out first.

use crate::sat::cnf::Cnf;
use crate::sat::literal::{Literal, Variable};
use itertools::Itertools;
use std::fmt::{Display, Formatter};

/// A total assignment: one value per variable, variable `i` stored at position `i - 1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Solutions(Vec<bool>);

impl Solutions {
    #[must_use]
    pub const fn new(values: Vec<bool>) -> Self {
        Self(values)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Value of a 1-based variable, `None` when out of range.
    #[must_use]
    pub fn value(&self, var: Variable) -> Option<bool> {
        let slot = (var as usize).checked_sub(1)?;
        self.0.get(slot).copied()
    }

    /// Signed literals in ascending variable order: positive for true, negative for false.
    #[allow(clippy::cast_possible_truncation)]
    pub fn literals(&self) -> impl Iterator<Item = Literal> + '_ {
        self.0
            .iter()
            .enumerate()
            .map(|(slot, &value)| Literal::new(slot as Variable + 1, value))
    }

    pub fn iter(&self) -> impl Iterator<Item = &bool> {
        self.0.iter()
    }
}

/// Renders the model line: every literal followed by a trailing `0`.
impl Display for Solutions {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "0");
        }
        write!(f, "{} 0", self.literals().join(" "))
    }
}

/// The final answer of a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Sat(Solutions),
    Unsat,
    /// The search budget ran out before a terminal state was reached.
    Unknown,
}

impl Verdict {
    #[must_use]
    pub const fn is_sat(&self) -> bool {
        matches!(self, Self::Sat(_))
    }

    #[must_use]
    pub const fn is_unsat(&self) -> bool {
        matches!(self, Self::Unsat)
    }

    #[must_use]
    pub const fn solutions(&self) -> Option<&Solutions> {
        match self {
            Self::Sat(solutions) => Some(solutions),
            _ => None,
        }
    }
}

impl Display for Verdict {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sat(solutions) => write!(f, "SAT\n{solutions}"),
            Self::Unsat => write!(f, "UNSAT"),
            Self::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// Counters collected while searching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SolutionStats {
    /// Loop iterations of the search driver.
    pub steps: u64,
    /// Variables assigned `false` by the decision maker.
    pub decisions: u64,
    /// Times a falsified clause was found.
    pub conflicts: u64,
    /// Assigned variables switched to their untried polarity.
    pub flips: u64,
    /// Variables unassigned by the backtracker.
    pub retractions: u64,
    /// Largest number of simultaneously assigned variables.
    pub max_depth: usize,
}

/// External budget on the search. The default is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchLimits {
    /// Maximum number of driver steps before giving up with [`Verdict::Unknown`].
    pub max_steps: Option<u64>,
}

impl SearchLimits {
    #[must_use]
    pub const fn unbounded() -> Self {
        Self { max_steps: None }
    }

    #[must_use]
    pub const fn steps(max_steps: u64) -> Self {
        Self {
            max_steps: Some(max_steps),
        }
    }
}

pub trait Solver {
    fn new(cnf: Cnf) -> Self;
    fn solve(&mut self) -> Verdict;
    fn stats(&self) -> SolutionStats;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solutions_display() {
        let solutions = Solutions::new(vec![true, false, true]);
        assert_eq!(solutions.to_string(), "1 -2 3 0");
        assert_eq!(Solutions::default().to_string(), "0");
    }

    #[test]
    fn test_solutions_value() {
        let solutions = Solutions::new(vec![false, true]);
        assert_eq!(solutions.value(1), Some(false));
        assert_eq!(solutions.value(2), Some(true));
        assert_eq!(solutions.value(0), None);
        assert_eq!(solutions.value(3), None);
    }

    #[test]
    fn test_verdict_display() {
        let sat = Verdict::Sat(Solutions::new(vec![false, true]));
        assert_eq!(sat.to_string(), "SAT\n-1 2 0");
        assert_eq!(Verdict::Unsat.to_string(), "UNSAT");
        assert_eq!(Verdict::Unknown.to_string(), "UNKNOWN");
    }

    #[test]
    fn test_verdict_accessors() {
        let sat = Verdict::Sat(Solutions::new(vec![true]));
        assert!(sat.is_sat());
        assert_eq!(sat.solutions(), Some(&Solutions::new(vec![true])));
        assert!(Verdict::Unsat.is_unsat());
        assert!(Verdict::Unknown.solutions().is_none());
    }
}
