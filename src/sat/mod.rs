#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
pub mod assignment;
pub mod backtrack;
pub mod clause;
pub mod cnf;
pub mod conflict;
pub mod decision;
pub mod dimacs;
pub mod error;
pub mod literal;
pub mod search;
pub mod solver;
pub mod state;
pub mod trail;
