#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The immutable formula handed to the search.
//!
//! A `Cnf` is a set of clauses, each a set of literals. Both levels use set semantics:
//! duplicate literals inside a clause and duplicate clauses inside the formula collapse
//! when the formula is built. Clauses are stored in ascending clause order, which is the
//! order the conflict scan visits them in, so two formulas built from the same clause
//! set are searched identically.

use crate::sat::clause::Clause;
use crate::sat::error::FormulaError;
use crate::sat::literal::Literal;
use crate::sat::solver::Solutions;
use core::ops::Index;
use rustc_hash::FxHashSet;
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cnf {
    /// Number of variables `n`; every literal has a magnitude in `[1, n]`.
    pub num_vars: usize,
    /// Distinct clauses in ascending order.
    pub clauses: Vec<Clause>,
    /// Clause count announced by the input header, if there was one. Informational only.
    pub declared_clauses: Option<usize>,
}

impl Cnf {
    /// Builds a formula whose variable count is the largest variable mentioned.
    ///
    /// `0` entries are dropped, as in a DIMACS clause line.
    ///
    /// # Panics
    ///
    /// If a clause contains `i32::MIN`, whose variable does not fit in a literal.
    /// [`Cnf::with_num_vars`] reports it as an error instead.
    pub fn new<I, J>(clauses: I) -> Self
    where
        I: IntoIterator<Item = J>,
        J: IntoIterator<Item = i32>,
    {
        let clauses: BTreeSet<Clause> = clauses
            .into_iter()
            .map(|c| {
                c.into_iter()
                    .filter(|&value| value != 0)
                    .map(|value| Literal::from_i32(value).expect("literal out of range"))
                    .collect()
            })
            .collect();

        let num_vars = clauses
            .iter()
            .map(Clause::max_variable)
            .max()
            .unwrap_or(0) as usize;

        Self {
            num_vars,
            clauses: clauses.into_iter().collect(),
            declared_clauses: None,
        }
    }

    /// Builds a formula over exactly `num_vars` variables.
    ///
    /// # Errors
    ///
    /// `FormulaError::ZeroLiteral` if a clause contains `0`, and
    /// `FormulaError::LiteralOutOfRange` if a literal's magnitude exceeds `num_vars` or
    /// cannot be represented at all (`i32::MIN`).
    pub fn with_num_vars<I, J>(num_vars: usize, clauses: I) -> Result<Self, FormulaError>
    where
        I: IntoIterator<Item = J>,
        J: IntoIterator<Item = i32>,
    {
        let mut set = BTreeSet::new();
        for clause in clauses {
            let clause = clause
                .into_iter()
                .map(|value| {
                    if value == 0 {
                        return Err(FormulaError::ZeroLiteral);
                    }
                    match Literal::from_i32(value) {
                        Some(lit) if lit.variable() as usize <= num_vars => Ok(lit),
                        _ => Err(FormulaError::LiteralOutOfRange {
                            literal: i64::from(value),
                            num_vars,
                        }),
                    }
                })
                .collect::<Result<Clause, _>>()?;
            set.insert(clause);
        }

        Ok(Self {
            num_vars,
            clauses: set.into_iter().collect(),
            declared_clauses: None,
        })
    }

    #[must_use]
    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    /// Total literal occurrences over all clauses.
    #[must_use]
    pub fn num_literals(&self) -> usize {
        self.clauses.iter().map(Clause::len).sum()
    }

    /// Number of distinct variables that occur in at least one clause.
    #[must_use]
    pub fn num_used_vars(&self) -> usize {
        self.clauses
            .iter()
            .flat_map(Clause::iter)
            .map(|lit| lit.variable())
            .collect::<FxHashSet<_>>()
            .len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.iter()
    }

    /// Checks that `solutions` assigns every variable and satisfies every clause.
    #[must_use]
    pub fn verify(&self, solutions: &Solutions) -> bool {
        solutions.len() == self.num_vars && self.iter().all(|c| c.is_satisfied_by(solutions))
    }
}

impl Index<usize> for Cnf {
    type Output = Clause;

    fn index(&self, index: usize) -> &Self::Output {
        &self.clauses[index]
    }
}

impl From<Vec<Vec<i32>>> for Cnf {
    fn from(clauses: Vec<Vec<i32>>) -> Self {
        Self::new(clauses)
    }
}

/// DIMACS rendering: a `p cnf` header followed by one line per clause.
impl Display for Cnf {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "p cnf {} {}", self.num_vars, self.num_clauses())?;
        for clause in &self.clauses {
            writeln!(f, "{clause}")?;
        }
        Ok(())
    }
}
