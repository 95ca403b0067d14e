#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Detection of clauses falsified by a partial assignment.
//!
//! A clause is falsified when every one of its literals is assigned and false. A clause
//! with an unassigned literal can still be satisfied later and is never reported, and
//! the empty clause is always falsified.

use crate::sat::assignment::Assignment;
use crate::sat::clause::Clause;
use crate::sat::cnf::Cnf;

/// Scans the clause in ascending literal order, counting literals that disagree with the
/// assignment. The scan stops at the first unassigned literal, since the count can then
/// no longer reach the clause size.
#[must_use]
pub fn is_falsified(clause: &Clause, assignment: &Assignment) -> bool {
    let mut disagreements = 0;
    for &lit in clause.iter() {
        match assignment.literal_value(lit) {
            None => return false,
            Some(false) => disagreements += 1,
            Some(true) => {}
        }
    }
    disagreements == clause.len()
}

/// Position of the first falsified clause in formula order, if any.
#[must_use]
pub fn find_conflict(cnf: &Cnf, assignment: &Assignment) -> Option<usize> {
    cnf.iter().position(|clause| is_falsified(clause, assignment))
}
