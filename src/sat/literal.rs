#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
use core::ops::{Neg, Not};
use std::fmt::{Display, Formatter};

/// 1-based variable index.
pub type Variable = u32;

/// A signed literal: the magnitude is the variable, the sign the polarity that satisfies it.
///
/// Ordering follows the signed integer, so sorting a clause puts its literals in
/// ascending literal value (negative literals first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Literal(i32);

impl Literal {
    /// # Panics
    ///
    /// If `var` is zero or does not fit in an `i32`.
    #[must_use]
    pub fn new(var: Variable, polarity: bool) -> Self {
        assert!(var != 0, "variable indices are 1-based");
        let var = i32::try_from(var).expect("literal variable overflowed");

        if polarity { Self(var) } else { Self(-var) }
    }

    /// Returns `None` for `0`, which is a clause terminator rather than a literal.
    #[must_use]
    pub const fn from_i32(value: i32) -> Option<Self> {
        if value == 0 || value == i32::MIN {
            None
        } else {
            Some(Self(value))
        }
    }

    #[must_use]
    pub const fn to_i32(self) -> i32 {
        self.0
    }

    #[must_use]
    pub const fn variable(self) -> Variable {
        self.0.unsigned_abs()
    }

    /// 0-based slot of the variable in the assignment and trail.
    #[must_use]
    pub const fn index(self) -> usize {
        self.variable() as usize - 1
    }

    #[must_use]
    pub const fn polarity(self) -> bool {
        self.0 > 0
    }

    #[must_use]
    pub const fn negated(self) -> Self {
        Self(-self.0)
    }

    /// The value this literal takes when its variable is set to `value`.
    #[must_use]
    pub const fn evaluate(self, value: bool) -> bool {
        value == self.polarity()
    }
}

impl Neg for Literal {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.negated()
    }
}

impl Not for Literal {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.negated()
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_neg() {
        assert_eq!(Literal::new(1, false).negated(), Literal::new(1, true));
        assert_eq!(-Literal::new(3, true), Literal::new(3, false));
        assert_eq!(!Literal::new(3, false), Literal::new(3, true));
    }

    #[test]
    fn test_from_i32() {
        let lit = Literal::from_i32(-4).unwrap();
        assert_eq!(lit.variable(), 4);
        assert_eq!(lit.index(), 3);
        assert!(!lit.polarity());
        assert_eq!(lit.to_i32(), -4);
        assert_eq!(Literal::from_i32(0), None);
    }

    #[test]
    fn test_evaluate() {
        assert!(Literal::new(2, true).evaluate(true));
        assert!(!Literal::new(2, true).evaluate(false));
        assert!(Literal::new(2, false).evaluate(false));
    }

    #[test]
    fn test_order_is_signed() {
        let mut lits = vec![
            Literal::new(1, true),
            Literal::new(2, false),
            Literal::new(1, false),
        ];
        lits.sort();
        let values: Vec<i32> = lits.into_iter().map(Literal::to_i32).collect();
        assert_eq!(values, vec![-2, -1, 1]);
    }
}
