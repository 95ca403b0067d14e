//! An exhaustive SAT checker for CNF formulas.
//!
//! The search assigns variables in ascending index order, always trying `false` before
//! `true`, and backtracks chronologically whenever a clause is falsified. It either
//! returns a total satisfying assignment or proves that none exists.
//!
//! ```
//! use sat_backtrack::sat::cnf::Cnf;
//! use sat_backtrack::sat::search::solve;
//! use sat_backtrack::sat::solver::Verdict;
//!
//! let cnf = Cnf::new(vec![vec![1, 2], vec![-1, -2]]);
//! let verdict = solve(cnf);
//! assert_eq!(verdict.to_string(), "SAT\n1 -2 0");
//! assert_ne!(verdict, Verdict::Unsat);
//! ```

/// The `sat` module holds the formula model, the search engine and the DIMACS loader.
pub mod sat;
