#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
use crate::sat::literal::Literal;
use crate::sat::solver::Solutions;
use core::ops::Index;
use itertools::Itertools;
use smallvec::SmallVec;
use std::fmt::{Display, Formatter};

/// A disjunction of distinct literals.
///
/// Literals are kept sorted by ascending value with duplicates removed, so two clauses
/// built from the same literal set compare equal and `Ord` is lexicographic over the
/// sorted literals. A clause holding both `l` and `-l` is kept as is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Clause {
    literals: SmallVec<[Literal; 8]>,
}

impl Clause {
    pub fn new<I: IntoIterator<Item = Literal>>(literals: I) -> Self {
        Self {
            literals: literals.into_iter().sorted_unstable().dedup().collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Literal> {
        self.literals.iter()
    }

    /// True when the clause contains a literal and its negation.
    #[must_use]
    pub fn is_tautology(&self) -> bool {
        self.literals
            .iter()
            .any(|lit| self.literals.binary_search(&lit.negated()).is_ok())
    }

    #[must_use]
    pub fn is_satisfied_by(&self, solutions: &Solutions) -> bool {
        self.iter()
            .any(|&lit| solutions.value(lit.variable()) == Some(lit.polarity()))
    }

    /// Largest variable index mentioned, `0` for the empty clause.
    #[must_use]
    pub fn max_variable(&self) -> u32 {
        self.iter().map(|lit| lit.variable()).max().unwrap_or(0)
    }
}

impl Index<usize> for Clause {
    type Output = Literal;

    fn index(&self, index: usize) -> &Self::Output {
        &self.literals[index]
    }
}

impl FromIterator<Literal> for Clause {
    fn from_iter<T: IntoIterator<Item = Literal>>(iter: T) -> Self {
        Self::new(iter)
    }
}

/// Zero entries are clause terminators and are skipped.
///
/// # Panics
///
/// On `i32::MIN`, which names no representable variable.
impl From<&[i32]> for Clause {
    fn from(literals: &[i32]) -> Self {
        Self::new(
            literals
                .iter()
                .filter(|&&value| value != 0)
                .map(|&value| Literal::from_i32(value).expect("literal out of range")),
        )
    }
}

impl From<Vec<i32>> for Clause {
    fn from(literals: Vec<i32>) -> Self {
        Self::from(literals.as_slice())
    }
}

impl Display for Clause {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for lit in self.iter() {
            write!(f, "{lit} ")?;
        }
        write!(f, "0")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(clause: &Clause) -> Vec<i32> {
        clause.iter().map(|l| l.to_i32()).collect()
    }

    #[test]
    fn test_new_sorts_and_dedups() {
        let clause = Clause::from(vec![3, -1, 3, 2, -1]);
        assert_eq!(clause.len(), 3);
        assert_eq!(values(&clause), vec![-1, 2, 3]);
    }

    #[test]
    fn test_zero_is_dropped() {
        let clause = Clause::from(vec![1, 2, 0]);
        assert_eq!(values(&clause), vec![1, 2]);
        assert!(Clause::from(vec![0]).is_empty());
    }

    #[test]
    #[should_panic(expected = "literal out of range")]
    fn test_min_literal_panics() {
        let _ = Clause::from(vec![1, i32::MIN]);
    }

    #[test]
    fn test_same_set_is_equal() {
        assert_eq!(Clause::from(vec![2, 1]), Clause::from(vec![1, 2, 1]));
    }

    #[test]
    fn test_order_is_lexicographic() {
        assert!(Clause::from(vec![-2, -1]) < Clause::from(vec![1, 2]));
        assert!(Clause::from(vec![1]) < Clause::from(vec![1, 2]));
        assert!(Clause::from(vec![1, 2]) < Clause::from(vec![2]));
    }

    #[test]
    fn test_tautology() {
        assert!(Clause::from(vec![1, -1]).is_tautology());
        assert!(Clause::from(vec![-3, 2, 3]).is_tautology());
        assert!(!Clause::from(vec![1, 2]).is_tautology());
        assert!(!Clause::default().is_tautology());
    }

    #[test]
    fn test_index_and_display() {
        let clause = Clause::from(vec![4, -2]);
        assert_eq!(clause[0], Literal::from_i32(-2).unwrap());
        assert_eq!(clause.to_string(), "-2 4 0");
        assert_eq!(clause.max_variable(), 4);
    }

    #[test]
    fn test_is_satisfied_by() {
        let solutions = Solutions::new(vec![false, true]);
        assert!(Clause::from(vec![-1, 2]).is_satisfied_by(&solutions));
        assert!(Clause::from(vec![1, 2]).is_satisfied_by(&solutions));
        assert!(!Clause::from(vec![1, -2]).is_satisfied_by(&solutions));
        assert!(!Clause::default().is_satisfied_by(&solutions));
    }
}
