//! Error types for building formulas and loading them from text.
//!
//! The search itself cannot fail: every error here is raised before a formula
//! reaches the solver.

use std::path::PathBuf;
use thiserror::Error;

/// A clause list that does not form a valid formula over `num_vars` variables.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormulaError {
    /// A literal names a variable outside `[1, num_vars]`.
    #[error("literal {literal} is outside the declared {num_vars} variables")]
    LiteralOutOfRange { literal: i64, num_vars: usize },

    /// `0` appeared inside a clause handed to the formula directly.
    #[error("0 is not a literal")]
    ZeroLiteral,
}

/// Failure to turn DIMACS-style text into a formula.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The text violates the input grammar.
    #[error("malformed input on line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    /// The input source could not be opened or read.
    #[error("cannot read {}: {source}", path.display())]
    ResourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading from an already open source failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The parsed clauses do not fit the header.
    #[error(transparent)]
    Formula(#[from] FormulaError),

    /// Strict mode only: the header's clause count disagrees with the clause lines read.
    #[error("header declares {declared} clauses but {parsed} clause lines were read")]
    ClauseCountMismatch { declared: usize, parsed: usize },
}

impl LoadError {
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Self::Malformed {
            line,
            reason: reason.into(),
        }
    }
}

/// Convenient Result type alias for the loader.
pub type Result<T> = std::result::Result<T, LoadError>;
